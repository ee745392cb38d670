//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use vodsearch_config::Config;
use vodsearch_index::{Engine, open_engine};

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (default if no config files were found).
    pub config: Config,
    /// Corpus loaded on first use.
    engine: Option<Engine>,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self {
            cwd,
            config,
            engine: None,
        })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// `init` uses this so it still works when an existing config file is broken.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
            engine: None,
        })
    }

    /// Fails unless a corpus path is configured, optionally pointing at `init`.
    pub fn require_corpus(&self, show_init_hint: bool) -> Result<(), ExitCode> {
        if self.config.corpus.path.is_none() {
            eprintln!("error: no corpus configured");
            if show_init_hint {
                eprintln!(
                    "Run 'vodsearch init' to create a configuration file, then set [corpus] path."
                );
            }
            return Err(ExitCode::FAILURE);
        }
        Ok(())
    }

    /// The loaded corpus, reading it on first call.
    pub fn engine(&mut self) -> Result<&Engine, ExitCode> {
        if self.engine.is_none() {
            self.require_corpus(true)?;
            let engine = open_engine(&self.config).map_err(|e| {
                eprintln!("error: failed to load corpus: {e}");
                ExitCode::FAILURE
            })?;
            self.engine = Some(engine);
        }
        self.engine.as_ref().ok_or(ExitCode::FAILURE)
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
