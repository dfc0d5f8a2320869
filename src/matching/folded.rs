//! Case-folded constants with a write-once cache.

use std::fmt;
use std::sync::OnceLock;

use slirc_proto::CaseFolder;

/// A constant compared under the connection's case mapping.
///
/// The folded form is computed on first comparison and kept for the
/// lifetime of the value. A later change of case mapping does not refold
/// it: a pattern is bound to the mapping in effect when it first ran.
#[derive(Clone)]
pub struct FoldedValue {
    value: String,
    folded: OnceLock<String>,
}

impl FoldedValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            folded: OnceLock::new(),
        }
    }

    /// The value as originally written.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The cached folded form, if a comparison has run yet.
    pub fn cached(&self) -> Option<&str> {
        self.folded.get().map(String::as_str)
    }

    /// Compare `other` against this value under `folder`.
    ///
    /// `other` is folded on every call.
    pub fn matches(&self, folder: &dyn CaseFolder, other: &str) -> bool {
        let folded = self.folded.get_or_init(|| folder.casefold(&self.value));
        *folded == folder.casefold(other)
    }
}

impl fmt::Debug for FoldedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FoldedValue")
            .field("value", &self.value)
            .field("folded", &self.folded.get())
            .finish()
    }
}

impl PartialEq for FoldedValue {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for FoldedValue {}
