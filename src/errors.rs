use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CloneError {
    #[error("ELEVENLABS_API_KEY not set")]
    MissingApiKey,
    #[error("could not determine home directory")]
    NoHomeDir,
    #[error(
        "path '{path}' resolves to '{}' which is outside allowed directories: {roots}",
        .resolved.display()
    )]
    PathOutsideRoots {
        path: String,
        resolved: PathBuf,
        roots: String,
    },
    #[error("refusing to read '{path}': samples must live under {}", .base.display())]
    OutsideSampleDir { path: String, base: PathBuf },
    #[error("audio file not found: {0}")]
    NotFound(String),
    #[error("unsupported file type '.{ext}' (allowed: {allowed})")]
    UnsupportedType { ext: String, allowed: String },
    #[error("file too large: {path} ({size_mb:.1} MB > {limit_mb} MB)")]
    FileTooLarge {
        path: String,
        size_mb: f64,
        limit_mb: u64,
    },
    #[error("api error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CloneResult<T> = Result<T, CloneError>;
