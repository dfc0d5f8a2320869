//! IRC case-mapping functions.
//!
//! IRC uses a special case-insensitive comparison where some characters
//! are considered equivalent (e.g., `[` and `{`). Which characters fold
//! together is negotiated per connection through the `CASEMAPPING`
//! ISUPPORT token; [`CaseMapping`] covers the three mappings servers
//! advertise in practice.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::UnknownCaseMapping;

/// Something that can normalize protocol identifiers for comparison.
///
/// Implementations must be a pure function of their argument at any given
/// moment. The mapping itself may change over a connection's lifetime
/// (e.g., after a new `RPL_ISUPPORT`).
pub trait CaseFolder {
    /// Fold `text` into its case-normalized form.
    fn casefold(&self, text: &str) -> String;
}

impl<T: CaseFolder + ?Sized> CaseFolder for &T {
    fn casefold(&self, text: &str) -> String {
        (**self).casefold(text)
    }
}

impl<T: CaseFolder + ?Sized> CaseFolder for Box<T> {
    fn casefold(&self, text: &str) -> String {
        (**self).casefold(text)
    }
}

impl<T: CaseFolder + ?Sized> CaseFolder for Arc<T> {
    fn casefold(&self, text: &str) -> String {
        (**self).casefold(text)
    }
}

/// Case-mapping rule advertised by a server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum CaseMapping {
    /// Only `A-Z` fold to `a-z`.
    Ascii,
    /// ASCII plus `[]\~` folding to `{}|^`.
    #[default]
    Rfc1459,
    /// ASCII plus `[]\` folding to `{}|`.
    StrictRfc1459,
}

impl CaseMapping {
    /// Look up a mapping from the value of a `CASEMAPPING` ISUPPORT token.
    ///
    /// Returns `None` for mappings this library does not implement
    /// (e.g., `rfc7613`).
    pub fn from_isupport(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("ascii") {
            Some(Self::Ascii)
        } else if value.eq_ignore_ascii_case("rfc1459") {
            Some(Self::Rfc1459)
        } else if value.eq_ignore_ascii_case("strict-rfc1459") {
            Some(Self::StrictRfc1459)
        } else {
            None
        }
    }

    /// The ISUPPORT spelling of this mapping.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Rfc1459 => "rfc1459",
            Self::StrictRfc1459 => "strict-rfc1459",
        }
    }

    /// Fold a single character under this mapping.
    #[inline]
    pub const fn lower_char(self, c: char) -> char {
        match (self, c) {
            (_, 'A'..='Z') => (c as u8 + 32) as char,
            (Self::Ascii, _) => c,
            (_, '[') => '{',
            (_, ']') => '}',
            (_, '\\') => '|',
            (Self::Rfc1459, '~') => '^',
            _ => c,
        }
    }

    /// Fold a string under this mapping.
    pub fn to_lower(self, s: &str) -> String {
        s.chars().map(|c| self.lower_char(c)).collect()
    }

    /// Compare two strings under this mapping without allocating.
    pub fn fold_eq(self, a: &str, b: &str) -> bool {
        if a.len() != b.len() {
            return false;
        }

        a.chars()
            .zip(b.chars())
            .all(|(ca, cb)| self.lower_char(ca) == self.lower_char(cb))
    }
}

impl CaseFolder for CaseMapping {
    fn casefold(&self, text: &str) -> String {
        self.to_lower(text)
    }
}

impl fmt::Display for CaseMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CaseMapping {
    type Err = UnknownCaseMapping;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_isupport(s).ok_or_else(|| UnknownCaseMapping(s.to_owned()))
    }
}

/// Convert a single character to IRC lowercase using RFC 1459 case mapping.
#[inline]
pub const fn irc_lower_char(c: char) -> char {
    CaseMapping::Rfc1459.lower_char(c)
}

/// Convert a string to IRC lowercase using RFC 1459 case mapping.
pub fn irc_to_lower(s: &str) -> String {
    CaseMapping::Rfc1459.to_lower(s)
}

/// Compare two strings using RFC 1459 case-insensitive comparison.
pub fn irc_eq(a: &str, b: &str) -> bool {
    CaseMapping::Rfc1459.fold_eq(a, b)
}
