//! Configuration file parsing.
//!
//! Parses individual `.vodsearch.toml` files into `RawConfig` structures whose fields are all
//! optional, so that partial files can be merged by precedence.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::{ConfigError, CorpusFormat};

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Corpus section.
    pub corpus: Option<RawCorpusSettings>,
    /// Output section.
    pub output: Option<RawOutputSettings>,
}

/// Raw `[corpus]` section. Paths are unresolved.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCorpusSettings {
    /// Corpus file or database, relative to the config file or `~`-prefixed.
    pub path: Option<String>,
    /// Full-text companion file for JSON corpora.
    pub full_text: Option<String>,
    /// Artifact encoding.
    pub format: Option<CorpusFormat>,
}

/// Raw `[output]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawOutputSettings {
    /// Seconds subtracted from clip starts in links.
    pub lead_in: Option<u64>,
    /// Playback link prefix.
    pub video_url: Option<String>,
    /// Whether to highlight matches.
    pub highlight: Option<bool>,
    /// Words listed by `vodsearch top`.
    pub top_limit: Option<usize>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed; discovery keeps walking in that case
/// and the broken file is reported when it is actually loaded.
pub fn is_root_config(path: &Path) -> bool {
    fs::read_to_string(path)
        .ok()
        .and_then(|contents| toml::from_str::<RawConfig>(&contents).ok())
        .is_some_and(|config| config.root == Some(true))
}
