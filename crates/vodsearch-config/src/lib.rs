//! Configuration system for vodsearch.
//!
//! vodsearch uses TOML configuration files named `.vodsearch.toml`. Configuration is resolved
//! by walking up the directory tree from the current working directory, collecting any
//! `.vodsearch.toml` files found, then loading `~/.vodsearch.toml` as the global config with
//! lowest precedence.
//!
//! The configuration answers two questions: where the corpus artifact lives (and how it is
//! encoded), and how clips are presented.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

pub use discovery::{
    CONFIG_FILENAME, discover_config_files, format_path_for_display, global_config_path,
    is_global_config,
};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawCorpusSettings, RawOutputSettings, parse_config_file, parse_config_str,
};
pub use resolve::resolve_path;
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Default number of seconds subtracted from a clip's start when building playback links.
pub const DEFAULT_LEAD_IN: u64 = 3;

/// Default prefix for video playback links; the video id is appended.
pub const DEFAULT_VIDEO_URL: &str = "https://youtube.com/watch?v=";

/// Default number of words listed by `vodsearch top`.
pub const DEFAULT_TOP_LIMIT: usize = 20;

/// Top-level merged configuration for vodsearch.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.vodsearch.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Where the corpus artifact lives.
    pub corpus: CorpusSettings,
    /// How results are rendered.
    pub output: OutputSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.vodsearch.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                Ok(ParsedConfig {
                    path: path.clone(),
                    config: parse_config_file(path)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output uses the same layout as a `.vodsearch.toml` file, with resolved absolute
    /// paths in place of whatever relative paths the source files used.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            corpus: &self.corpus,
            output: &self.output,
        };
        toml::to_string_pretty(&serializable).map_err(ConfigError::SerializeToml)
    }
}

/// Encoding of the corpus artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusFormat {
    /// Pick by file extension: `.db`, `.sqlite` and `.sqlite3` are SQLite, anything else JSON.
    #[default]
    Auto,
    /// A JSON corpus file plus an optional full-text companion file.
    Json,
    /// A single SQLite database.
    Sqlite,
}

impl CorpusFormat {
    /// Resolves `Auto` against the artifact path; explicit formats are returned unchanged.
    pub fn resolve(self, path: &Path) -> Self {
        if self != Self::Auto {
            return self;
        }
        let is_sqlite = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| matches!(ext, "db" | "sqlite" | "sqlite3"));
        if is_sqlite { Self::Sqlite } else { Self::Json }
    }
}

impl fmt::Display for CorpusFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Json => "json",
            Self::Sqlite => "sqlite",
        })
    }
}

impl FromStr for CorpusFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "json" => Ok(Self::Json),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(format!(
                "unknown corpus format '{other}' (expected auto, json or sqlite)"
            )),
        }
    }
}

/// Location and encoding of the corpus artifact.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CorpusSettings {
    /// Resolved path to the corpus file or database.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Resolved path to the full-text companion of a JSON corpus.
    ///
    /// When unset, `<stem>_full.json` next to the corpus file is used if it exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_text: Option<PathBuf>,
    /// Artifact encoding.
    pub format: CorpusFormat,
}

/// Presentation settings for search output.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Seconds subtracted from a clip's start time in playback links.
    pub lead_in: u64,
    /// Prefix of playback links; the video id is appended.
    pub video_url: String,
    /// Whether matches are highlighted in terminal output.
    pub highlight: bool,
    /// Number of words listed by `vodsearch top`.
    pub top_limit: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            lead_in: DEFAULT_LEAD_IN,
            video_url: DEFAULT_VIDEO_URL.to_string(),
            highlight: true,
            top_limit: DEFAULT_TOP_LIMIT,
        }
    }
}

/// Internal view of the settings for TOML serialization.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Corpus location.
    corpus: &'a CorpusSettings,
    /// Output settings.
    output: &'a OutputSettings,
}
