//! Predicates over a single positional parameter.

use std::fmt;

use slirc_proto::CaseFolder;

use super::folded::FoldedValue;

/// A constraint on one parameter of a reply line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamPredicate {
    /// Matches anything. Holds a slot that must exist but is unconstrained.
    Any,
    /// Exact, case-sensitive equality.
    Literal(String),
    /// Equality under the connection's case mapping.
    Folded(FoldedValue),
    /// Inverts the inner predicate.
    Not(Box<ParamPredicate>),
}

impl ParamPredicate {
    pub fn any() -> Self {
        Self::Any
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    pub fn folded(value: impl Into<String>) -> Self {
        Self::Folded(FoldedValue::new(value))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(inner: ParamPredicate) -> Self {
        Self::Not(Box::new(inner))
    }

    /// Test one parameter value.
    pub fn matches(&self, folder: &dyn CaseFolder, arg: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Literal(value) => value == arg,
            Self::Folded(value) => value.matches(folder, arg),
            Self::Not(inner) => !inner.matches(folder, arg),
        }
    }
}

impl From<&str> for ParamPredicate {
    fn from(value: &str) -> Self {
        Self::literal(value)
    }
}

impl From<String> for ParamPredicate {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl fmt::Display for ParamPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any()"),
            Self::Literal(value) => write!(f, "{:?}", value),
            Self::Folded(value) => write!(f, "FoldString({:?})", value.as_str()),
            Self::Not(inner) => write!(f, "Not({})", inner),
        }
    }
}
