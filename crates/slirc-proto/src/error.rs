//! Error types for the IRC protocol library.

use thiserror::Error;

/// Failure to tokenize a raw protocol line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LineParseError {
    /// The line was empty (or only a line terminator).
    #[error("empty line")]
    Empty,

    /// The command token was missing or malformed.
    #[error("invalid command at byte {position} in {line:?}")]
    InvalidCommand {
        /// The offending input.
        line: String,
        /// Byte offset where the command was expected.
        position: usize,
    },
}

/// A `CASEMAPPING` value this library has no mapping for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown casemapping: {0}")]
pub struct UnknownCaseMapping(pub String);
