//! Configuration merging.
//!
//! Folds parsed config files into a single `Config`. Files arrive highest precedence first;
//! they are applied lowest first so that closer files overwrite farther ones field by field.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, CorpusSettings, OutputSettings,
    parse::{RawConfig, RawCorpusSettings, RawOutputSettings},
    resolve::resolve_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory that relative paths in this file are resolved against.
    fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Merges configuration files into a resolved `Config`.
///
/// Every field is taken from the highest-precedence file that sets it. The one exception is
/// `corpus.full_text`: a companion only applies to the corpus declared in the same file, so a
/// file that sets `corpus.path` alone drops any inherited companion. Paths are resolved
/// relative to the file that declared them, so a global config can point at
/// `~/corpus/squeex.db` while a project config points at `./data/squeex.json`.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    let mut corpus = CorpusSettings::default();
    let mut output = OutputSettings::default();

    for parsed in configs.iter().rev() {
        if let Some(raw) = &parsed.config.corpus {
            apply_corpus(&mut corpus, raw, parsed.base_dir())?;
        }
        if let Some(raw) = &parsed.config.output {
            apply_output(&mut output, raw);
        }
    }

    Ok(Config {
        corpus,
        output,
        config_root: configs.first().map(|c| c.base_dir().to_path_buf()),
    })
}

/// Overlays a raw `[corpus]` section onto the accumulated settings.
fn apply_corpus(
    result: &mut CorpusSettings,
    raw: &RawCorpusSettings,
    base_dir: &Path,
) -> Result<(), ConfigError> {
    if let Some(path) = &raw.path {
        result.path = Some(resolve_path(path, base_dir)?);
        result.full_text = None;
    }
    if let Some(full_text) = &raw.full_text {
        result.full_text = Some(resolve_path(full_text, base_dir)?);
    }
    if let Some(format) = raw.format {
        result.format = format;
    }
    Ok(())
}

/// Overlays a raw `[output]` section onto the accumulated settings.
fn apply_output(result: &mut OutputSettings, raw: &RawOutputSettings) {
    if let Some(v) = raw.lead_in {
        result.lead_in = v;
    }
    if let Some(v) = &raw.video_url {
        result.video_url.clone_from(v);
    }
    if let Some(v) = raw.highlight {
        result.highlight = v;
    }
    if let Some(v) = raw.top_limit {
        result.top_limit = v;
    }
}
