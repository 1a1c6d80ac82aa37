//! Sample-directory resolution and audio-file validation.

use crate::errors::{CloneError, CloneResult};
use crate::pathguard::{expand_home, soft_canonicalize};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension to MIME-type table; its key set doubles as the extension
/// allow-list.
const MIME_TYPES: [(&str, &str); 6] = [
    ("flac", "audio/flac"),
    ("m4a", "audio/x-m4a"),
    ("mp3", "audio/mpeg"),
    ("ogg", "audio/ogg"),
    ("wav", "audio/wav"),
    ("webm", "audio/webm"),
];

/// Per-file size ceiling.
pub const MAX_FILE_MB: u64 = 50;

const DEFAULT_SAMPLE_SUBDIR: &str = ".openclaw/elevenlabs/voiceclone-samples";

/// A validated audio input: resolved under the sample base,
/// allow-listed and within the size ceiling.
#[derive(Debug, Clone)]
pub struct AudioSample {
    pub path: PathBuf,
    pub file_name: String,
    pub mime: &'static str,
    pub size: u64,
}

/// MIME type for an audio extension (lowercase, without the dot).
pub fn mime_for(ext: &str) -> Option<&'static str> {
    MIME_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

fn allowed_list() -> String {
    MIME_TYPES
        .iter()
        .map(|(e, _)| format!(".{e}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Resolves the sample base directory, creating it if missing.
pub fn resolve_sample_base(explicit: Option<&Path>) -> CloneResult<PathBuf> {
    let dir = match explicit {
        Some(dir) => expand_home(dir),
        None => dirs::home_dir()
            .map(|home| home.join(DEFAULT_SAMPLE_SUBDIR))
            .ok_or(CloneError::NoHomeDir)?,
    };
    fs::create_dir_all(&dir)?;
    Ok(soft_canonicalize(&dir)?)
}

/// Resolves an input path against the sample base.
///
/// Relative paths are interpreted under `base`, not the working
/// directory. The result must be equal to or a descendant of the
/// canonical base.
pub fn resolve_sample(file_path: &str, base: &Path) -> CloneResult<PathBuf> {
    let input = expand_home(Path::new(file_path));
    let canon_base = soft_canonicalize(base)?;
    let joined = if input.is_absolute() {
        input
    } else {
        canon_base.join(input)
    };
    let resolved = soft_canonicalize(&joined)?;
    if resolved.starts_with(&canon_base) {
        Ok(resolved)
    } else {
        Err(CloneError::OutsideSampleDir {
            path: file_path.to_string(),
            base: canon_base,
        })
    }
}

/// Resolves and fully validates one input file.
pub fn validate_sample(file_path: &str, base: &Path) -> CloneResult<AudioSample> {
    let path = resolve_sample(file_path, base)?;
    if !path.exists() {
        return Err(CloneError::NotFound(file_path.to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    let mime = mime_for(&ext).ok_or_else(|| CloneError::UnsupportedType {
        ext: ext.clone(),
        allowed: allowed_list(),
    })?;

    let size = fs::metadata(&path)?.len();
    if size > MAX_FILE_MB * 1024 * 1024 {
        return Err(CloneError::FileTooLarge {
            path: file_path.to_string(),
            size_mb: size as f64 / (1024.0 * 1024.0),
            limit_mb: MAX_FILE_MB,
        });
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.to_string());
    Ok(AudioSample {
        path,
        file_name,
        mime,
        size,
    })
}
