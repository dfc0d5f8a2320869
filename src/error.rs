//! Error types for pattern construction.
//!
//! Matching itself never fails: a line either satisfies a pattern or it
//! does not. The only errors are misbuilt patterns, reported eagerly.

use thiserror::Error;

// ============================================================================
// Pattern Errors (construction)
// ============================================================================

/// A pattern that could never be meaningfully evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern must accept at least one command")]
    EmptyCommands,

    #[error("alternation must hold at least one pattern")]
    EmptyAlternation,
}
