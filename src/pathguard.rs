//! Path confinement for file-system access.
//!
//! Resolves raw paths and verifies they stay inside an approved set of
//! root directories: the workspace root, the system temp directory and
//! `$TMPDIR` when set.

use crate::errors::{CloneError, CloneResult};
use std::env;
use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

/// Environment overrides for the workspace root, in precedence order.
pub const WORKSPACE_ENV_VARS: [&str; 2] = ["ELEVENLABS_WORKSPACE", "OPENCLAW_WORKSPACE"];
const TMPDIR_ENV: &str = "TMPDIR";
/// Subdirectory whose presence marks the workspace root.
const WORKSPACE_MARKER: &str = "skills";
const MAX_PARENT_STEPS: usize = 6;

static ALLOWED_ROOTS: OnceLock<Vec<PathBuf>> = OnceLock::new();

/// Process-wide allowed-root set, computed once on first use.
pub fn allowed_roots() -> &'static [PathBuf] {
    ALLOWED_ROOTS.get_or_init(compute_allowed_roots)
}

/// Computes the allowed-root set from the current environment. Exposed
/// separately from [`allowed_roots`] so callers can build an uncached
/// set.
pub fn compute_allowed_roots() -> Vec<PathBuf> {
    let mut roots = vec![find_workspace_root()];
    push_root(&mut roots, &env::temp_dir());
    if let Some(tmp) = env::var_os(TMPDIR_ENV) {
        push_root(&mut roots, Path::new(&tmp));
    }
    roots
}

fn push_root(roots: &mut Vec<PathBuf>, dir: &Path) {
    if let Ok(canon) = soft_canonicalize(dir) {
        if !roots.contains(&canon) {
            roots.push(canon);
        }
    }
}

/// Resolves `raw` and verifies it is equal to or a descendant of one of
/// the process-wide allowed roots. Returns the canonical path.
pub fn confine(raw: &str) -> CloneResult<PathBuf> {
    confine_within(raw, allowed_roots())
}

/// [`confine`] against an explicit root set.
pub fn confine_within(raw: &str, roots: &[PathBuf]) -> CloneResult<PathBuf> {
    let resolved = soft_canonicalize(&expand_home(Path::new(raw)))?;
    if roots.iter().any(|root| resolved.starts_with(root)) {
        return Ok(resolved);
    }
    let roots_list = roots
        .iter()
        .map(|r| r.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(CloneError::PathOutsideRoots {
        path: raw.to_string(),
        resolved,
        roots: roots_list,
    })
}

/// Workspace root: environment override, else the cwd when it carries
/// the marker subdirectory, else an upward walk from the executable's
/// directory bounded to [`MAX_PARENT_STEPS`], else the cwd.
fn find_workspace_root() -> PathBuf {
    for var in WORKSPACE_ENV_VARS {
        if let Some(ws) = env::var_os(var) {
            let ws = expand_home(Path::new(&ws));
            return soft_canonicalize(&ws).unwrap_or(ws);
        }
    }

    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    if cwd.join(WORKSPACE_MARKER).is_dir() {
        return cwd;
    }

    if let Ok(exe) = env::current_exe() {
        if let Some(start) = exe.parent() {
            let mut dir = start.to_path_buf();
            for _ in 0..MAX_PARENT_STEPS {
                if dir.join(WORKSPACE_MARKER).is_dir() {
                    return dir;
                }
                match dir.parent() {
                    Some(parent) => dir = parent.to_path_buf(),
                    None => break,
                }
            }
        }
    }
    cwd
}

/// Expands a leading `~` component to the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

/// Canonicalizes a path whose leaf components may not exist yet:
/// symlinks and `..` are resolved over the existing prefix and the
/// remainder is appended after lexical normalization.
pub fn soft_canonicalize(path: &Path) -> io::Result<PathBuf> {
    let abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    };
    let normalized = lexical_normalize(&abs);

    let mut base = normalized.as_path();
    let mut tail: Vec<OsString> = Vec::new();
    loop {
        match dunce::canonicalize(base) {
            Ok(mut canon) => {
                for part in tail.iter().rev() {
                    canon.push(part);
                }
                return Ok(canon);
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                match (base.file_name(), base.parent()) {
                    (Some(name), Some(parent)) => {
                        tail.push(name.to_os_string());
                        base = parent;
                    }
                    _ => return Err(err),
                }
            }
            Err(err) => return Err(err),
        }
    }
}

fn lexical_normalize(abs: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in abs.components() {
        match comp {
            Component::Prefix(_) | Component::RootDir => out.push(comp.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(name) => out.push(name),
        }
    }
    out
}
