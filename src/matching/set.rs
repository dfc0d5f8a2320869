//! Named pattern collections evaluated under one case mapping.

use slirc_proto::{CaseMapping, Line};

use super::response::MatchResponse;

/// An ordered set of named patterns sharing a case mapping.
#[derive(Debug, Default)]
pub struct PatternSet {
    casemapping: CaseMapping,
    patterns: Vec<(String, Box<dyn MatchResponse>)>,
}

impl PatternSet {
    pub fn new(casemapping: CaseMapping) -> Self {
        Self {
            casemapping,
            patterns: Vec::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, pattern: impl MatchResponse + 'static) {
        self.patterns.push((name.into(), Box::new(pattern)));
    }

    pub fn casemapping(&self) -> CaseMapping {
        self.casemapping
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&dyn MatchResponse> {
        self.patterns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p.as_ref())
    }

    /// Names of the patterns `line` satisfies, in insertion order.
    pub fn matching<'a>(&'a self, line: &'a Line) -> impl Iterator<Item = &'a str> + 'a {
        self.patterns
            .iter()
            .filter(move |(_, pattern)| pattern.matches(&self.casemapping, line))
            .map(|(name, _)| name.as_str())
    }
}
