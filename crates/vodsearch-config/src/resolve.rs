//! Path resolution for configured artifact paths.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a configured path to an absolute path.
///
/// `~` and `~/...` expand to the home directory, relative paths are joined onto
/// `config_dir`, and absolute paths pass through. The path does not need to exist yet: a
/// corpus may be produced after the config is written, and a missing artifact is reported
/// when the corpus is opened.
pub fn resolve_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;
    if expanded.is_absolute() {
        return Ok(expanded);
    }
    Ok(config_dir.join(expanded))
}

/// Expands a leading tilde to the home directory.
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    match path.strip_prefix('~') {
        Some("") => home_dir(),
        Some(rest) if rest.starts_with('/') => Ok(home_dir()?.join(&rest[1..])),
        _ => Ok(PathBuf::from(path)),
    }
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}
