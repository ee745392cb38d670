//! Configuration validation.
//!
//! Reports non-fatal problems with a loaded configuration.

use std::{fmt, path::PathBuf};

use crate::{Config, CorpusFormat};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No `[corpus] path` is set anywhere.
    NoCorpusConfigured,
    /// The configured corpus path does not exist.
    CorpusMissing {
        /// Path that doesn't exist.
        path: PathBuf,
    },
    /// The configured corpus path exists but is a directory.
    CorpusNotFile {
        /// Offending path.
        path: PathBuf,
    },
    /// An explicitly configured full-text companion does not exist.
    FullTextMissing {
        /// Path that doesn't exist.
        path: PathBuf,
    },
    /// A full-text companion is configured for a SQLite corpus, which ignores it.
    FullTextIgnored {
        /// The configured companion path.
        path: PathBuf,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCorpusConfigured => write!(f, "no corpus path is configured"),
            Self::CorpusMissing { path } => write!(f, "corpus does not exist: {}", path.display()),
            Self::CorpusNotFile { path } => {
                write!(f, "corpus path is not a file: {}", path.display())
            }
            Self::FullTextMissing { path } => {
                write!(f, "full-text file does not exist: {}", path.display())
            }
            Self::FullTextIgnored { path } => write!(
                f,
                "full-text file is ignored for sqlite corpora: {}",
                path.display()
            ),
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let Some(path) = &config.corpus.path else {
        return vec![ConfigWarning::NoCorpusConfigured];
    };

    let mut warnings = Vec::new();
    if !path.exists() {
        warnings.push(ConfigWarning::CorpusMissing { path: path.clone() });
    } else if !path.is_file() {
        warnings.push(ConfigWarning::CorpusNotFile { path: path.clone() });
    }

    if let Some(full_text) = &config.corpus.full_text {
        if config.corpus.format.resolve(path) == CorpusFormat::Sqlite {
            warnings.push(ConfigWarning::FullTextIgnored {
                path: full_text.clone(),
            });
        } else if !full_text.is_file() {
            warnings.push(ConfigWarning::FullTextMissing {
                path: full_text.clone(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CorpusSettings, test_support::TestDir};

    /// Builds a config pointing at the given corpus files.
    fn config_with(path: Option<PathBuf>, full_text: Option<PathBuf>) -> Config {
        Config {
            corpus: CorpusSettings {
                path,
                full_text,
                format: CorpusFormat::Auto,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_no_corpus() {
        let warnings = validate_config(&Config::default());
        assert_eq!(warnings, vec![ConfigWarning::NoCorpusConfigured]);
    }

    #[test]
    fn test_valid_corpus() {
        let dir = TestDir::new();
        let corpus = dir.create_file("squeex.json");
        let full = dir.create_file("squeex_full.json");

        let config = config_with(Some(corpus), Some(full));
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn test_missing_corpus_and_full_text() {
        let dir = TestDir::new();
        let corpus = dir.path().join("gone.json");
        let full = dir.path().join("gone_full.json");

        let warnings = validate_config(&config_with(Some(corpus.clone()), Some(full.clone())));
        assert_eq!(
            warnings,
            vec![
                ConfigWarning::CorpusMissing { path: corpus },
                ConfigWarning::FullTextMissing { path: full },
            ]
        );
    }

    #[test]
    fn test_corpus_is_directory() {
        let dir = TestDir::new();
        let corpus = dir.create_dir("corpus.json");

        let warnings = validate_config(&config_with(Some(corpus.clone()), None));
        let expected = ConfigWarning::CorpusNotFile { path: corpus };
        assert_eq!(warnings, vec![expected]);
    }

    #[test]
    fn test_full_text_ignored_for_sqlite() {
        let dir = TestDir::new();
        let corpus = dir.create_file("squeex.db");
        let full = dir.create_file("squeex_full.json");

        let warnings = validate_config(&config_with(Some(corpus), Some(full.clone())));
        let expected = ConfigWarning::FullTextIgnored { path: full };
        assert_eq!(warnings, vec![expected]);
    }

    #[test]
    fn test_warning_display() {
        let warning = ConfigWarning::CorpusMissing {
            path: PathBuf::from("/data/x.db"),
        };
        assert_eq!(warning.to_string(), "corpus does not exist: /data/x.db");
    }
}
