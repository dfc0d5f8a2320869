//! Stream filtering: run raw protocol lines through a [`PatternSet`].
//!
//! Input is read as bytes and split on `\n`. Servers are not obliged to
//! send UTF-8, so invalid sequences are replaced rather than ending the
//! stream. A line that does not tokenize is logged and skipped.

use std::io::{self, BufRead, Write};

use slirc_proto::Line;
use tracing::warn;

use crate::matching::PatternSet;

/// Counters for one filtering run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// Non-blank lines read.
    pub lines: usize,
    /// Lines that failed to tokenize.
    pub skipped: usize,
    /// Lines at least one pattern matched.
    pub matched: usize,
}

/// Write `<name>\t<line>` to `out` for every pattern each input line matches.
///
/// Only I/O errors end the run.
pub fn run(
    patterns: &PatternSet,
    input: impl BufRead,
    mut out: impl Write,
) -> io::Result<FilterStats> {
    let mut stats = FilterStats::default();

    for (index, chunk) in input.split(b'\n').enumerate() {
        let chunk = chunk?;
        let chunk = chunk.strip_suffix(b"\r").unwrap_or(&chunk);
        let raw = String::from_utf8_lossy(chunk);
        if raw.trim().is_empty() {
            continue;
        }
        stats.lines += 1;

        let line: Line = match raw.parse() {
            Ok(line) => line,
            Err(e) => {
                warn!(line = index + 1, error = %e, "Skipping unparseable line");
                stats.skipped += 1;
                continue;
            }
        };

        let mut hit = false;
        for name in patterns.matching(&line) {
            writeln!(out, "{}\t{}", name, raw)?;
            hit = true;
        }
        if hit {
            stats.matched += 1;
        }
    }

    out.flush()?;
    Ok(stats)
}
