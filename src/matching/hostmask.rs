//! Predicates over a line's sender.

use std::fmt;

use slirc_proto::{CaseFolder, Prefix};

use super::folded::FoldedValue;

/// A constraint on who sent a reply line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityPredicate {
    /// Folded nickname equality; user and host are ignored (`nick!*@*`).
    Nickname(FoldedValue),
}

impl IdentityPredicate {
    pub fn nickname(nickname: impl Into<String>) -> Self {
        Self::Nickname(FoldedValue::new(nickname))
    }

    pub fn matches(&self, folder: &dyn CaseFolder, sender: &Prefix) -> bool {
        match self {
            Self::Nickname(nickname) => nickname.matches(folder, sender.nickname()),
        }
    }
}

impl fmt::Display for IdentityPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nickname(nickname) => write!(f, "Hostmask(\"{}!*@*\")", nickname.as_str()),
        }
    }
}
