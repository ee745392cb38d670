//! Implementation of `vodsearch top`.

use std::process::ExitCode;

use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL_CONDENSED};

use crate::cli::{args::TopCommand, context::CommandContext, output::print_json};

/// Lists the most-mentioned indexed words.
pub fn run(ctx: &mut CommandContext, cmd: &TopCommand) -> ExitCode {
    let limit = cmd.limit.unwrap_or(ctx.config.output.top_limit);
    let engine = match ctx.engine() {
        Ok(engine) => engine,
        Err(code) => return code,
    };
    let words = engine.top_words(limit);

    if cmd.json {
        return print_json(&words);
    }

    if words.is_empty() {
        println!("No indexed words.");
        return ExitCode::SUCCESS;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["#", "Word", "Mentions"]);
    for (rank, entry) in words.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1).set_alignment(CellAlignment::Right),
            Cell::new(&entry.word),
            Cell::new(entry.count).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
    ExitCode::SUCCESS
}
