//! Implementation of `vodsearch status`.

use std::process::ExitCode;

use vodsearch_config::{ConfigWarning, discover_config_files, format_path_for_display};
use vodsearch_index::CorpusSource;

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, success, warning},
};

/// Shows configuration files, the corpus, its statistics, and validation warnings.
pub fn run(ctx: &mut CommandContext) -> ExitCode {
    let cwd = ctx.cwd.clone();

    let config_files = discover_config_files(&cwd);
    if config_files.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("vodsearch init")
        );
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader("Config files:"));
    for path in &config_files {
        println!("   {}", format_path_for_display(path, &cwd));
    }
    println!();

    let mut load_failed = false;
    println!("{}", subheader("Corpus:"));
    match CorpusSource::from_config(&ctx.config) {
        Ok(source) => {
            let present = source.path.is_file();
            let display_path = format_path_for_display(&source.path, &cwd);
            let marker = if present {
                String::new()
            } else {
                format!(" {}", warning("[missing]"))
            };
            println!(
                "   {display_path} {}{marker}",
                dim(&format!("({})", source.resolved_format()))
            );
            if let Some(full) = source.full_text_path() {
                println!(
                    "   {} {}",
                    dim("full text:"),
                    format_path_for_display(&full, &cwd)
                );
            }
            println!();
            if present {
                load_failed = print_stats(ctx).is_err();
            }
        }
        Err(_) => {
            println!("   {}", dim("(none configured)"));
            println!();
        }
    }

    let warnings = ctx.config.validate();
    if warnings.is_empty() && !load_failed {
        println!("{}", success("No issues found."));
        return ExitCode::SUCCESS;
    }

    if !warnings.is_empty() {
        println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
        for w in &warnings {
            println!("   {}", warning(&w.to_string()));
        }
        println!();
        print_hints(&warnings);
    }

    ExitCode::FAILURE
}

/// Loads the corpus and prints its counts.
fn print_stats(ctx: &mut CommandContext) -> Result<(), ExitCode> {
    let stats = ctx.engine()?.stats();
    println!("{}", subheader("Statistics:"));
    println!("   Videos:           {}", stats.videos);
    println!("   With transcript:  {}", stats.videos_with_text);
    println!("   Segments:         {}", stats.segments);
    println!("   Indexed words:    {}", stats.words);
    println!("   Updated:          {}", stats.updated_at);
    println!();
    Ok(())
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<&str> = warnings
        .iter()
        .map(|w| match w {
            ConfigWarning::NoCorpusConfigured => "Set [corpus] path in .vodsearch.toml.",
            ConfigWarning::CorpusMissing { .. } | ConfigWarning::CorpusNotFile { .. } => {
                "Point [corpus] path at a corpus .json file or SQLite database."
            }
            ConfigWarning::FullTextMissing { .. } => {
                "Fix [corpus] full_text, or remove it to use <stem>_full.json."
            }
            ConfigWarning::FullTextIgnored { .. } => {
                "SQLite corpora store full text themselves; remove [corpus] full_text."
            }
        })
        .collect();

    hints.sort_unstable();
    hints.dedup();

    println!("Hints:");
    for hint in hints {
        println!("  - {hint}");
    }
}
