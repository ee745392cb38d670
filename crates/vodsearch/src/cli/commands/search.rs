//! Implementation of `vodsearch search`.

use std::process::ExitCode;

use crate::cli::{
    args::SearchCommand,
    context::CommandContext,
    output::{ResultView, output_query_result},
};

/// Looks the query up and prints the matching clips.
pub fn run(ctx: &mut CommandContext, cmd: &SearchCommand) -> ExitCode {
    let query = cmd.joined_query();
    let settings = ctx.config.output.clone();

    let engine = match ctx.engine() {
        Ok(engine) => engine,
        Err(code) => return code,
    };

    let answered = match cmd.forced_kind() {
        Some(kind) => engine.query_as(&query, kind),
        None => engine.query(&query),
    };
    let result = match answered {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error: search failed: {e}");
            return ExitCode::FAILURE;
        }
    };
    let matcher = match result.matcher() {
        Ok(matcher) => matcher,
        Err(e) => {
            eprintln!("error: search failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let metadata = engine.metadata();
    let updated = metadata.updated_at_datetime().map_or_else(
        || metadata.updated_at.clone(),
        |at| at.format("%Y-%m-%d %H:%M").to_string(),
    );

    let view = ResultView {
        result: &result,
        matcher: &matcher,
        settings: &settings,
        updated,
    };
    output_query_result(&view, cmd.output.mode())
}
