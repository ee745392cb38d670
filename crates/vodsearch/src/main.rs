//! `vodsearch`: find what was said, and when, across a streamer's VOD transcripts.

use std::process::ExitCode;

use clap::Parser;
use vodsearch::cli::{
    CommandContext,
    args::{Cli, Commands},
    commands, logging,
};

/// Parses arguments, installs logging, and runs the selected command.
fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let loaded = if matches!(cli.command, Commands::Init(_)) {
        CommandContext::load_cwd_only()
    } else {
        CommandContext::load()
    };
    let mut ctx = match loaded {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &mut ctx)
}
