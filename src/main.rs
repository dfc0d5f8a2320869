//! slirc-expect - filter a stream of IRC lines through named reply patterns.
//!
//! Reads raw protocol lines from stdin and prints `<pattern>\t<line>` for
//! every configured pattern each line matches.

use slirc_expect::config::Config;
use slirc_expect::filter;
use std::io;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    init_logging();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "patterns.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    let patterns = config.compile().map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to compile patterns");
        e
    })?;

    info!(
        patterns = patterns.len(),
        casemapping = %patterns.casemapping(),
        "Loaded pattern set"
    );

    let stats = filter::run(&patterns, io::stdin().lock(), io::stdout().lock())?;
    info!(
        lines = stats.lines,
        skipped = stats.skipped,
        matched = stats.matched,
        "Finished"
    );
    Ok(())
}

/// Logs go to stderr; stdout carries matches.
/// `SLIRC_EXPECT_LOG_FORMAT=json` switches to one JSON object per event.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr);

    match std::env::var("SLIRC_EXPECT_LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}
