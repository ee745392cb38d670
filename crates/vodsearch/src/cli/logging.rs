//! Log output for the CLI.
//!
//! Library crates emit `tracing` events; this installs the subscriber that prints them to
//! stderr, keeping stdout clean for `--json`.

use std::io;

use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding a filter directive, e.g. `vodsearch_index=debug`.
pub const LOG_ENV: &str = "VODSEARCH_LOG";

/// The level implied by `-q` and `-v` flags.
pub fn level_for(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Installs the stderr subscriber. `VODSEARCH_LOG` wins over the flags.
pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose, quiet)));
    let installed = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
    if let Err(e) = installed {
        eprintln!("warning: could not initialize logging: {e}");
    }
}
