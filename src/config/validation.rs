//! Configuration validation.
//!
//! Catches patterns that could never be built before any are compiled,
//! so every problem in a file is reported at once.

use super::Config;
use std::collections::HashSet;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("pattern.name is required")]
    EmptyName,
    #[error("pattern name '{0}' is used more than once")]
    DuplicateName(String),
    #[error("pattern '{0}' has no any_of entries")]
    NoAlternatives(String),
    #[error("pattern '{pattern}' any_of[{index}] has no commands")]
    EmptyCommands { pattern: String, index: usize },
    #[error("pattern '{pattern}' any_of[{index}] has a blank command")]
    BlankCommand { pattern: String, index: usize },
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for pattern in &config.patterns {
        if pattern.name.is_empty() {
            errors.push(ValidationError::EmptyName);
        } else if !seen.insert(pattern.name.as_str()) {
            errors.push(ValidationError::DuplicateName(pattern.name.clone()));
        }

        if pattern.any_of.is_empty() {
            errors.push(ValidationError::NoAlternatives(pattern.name.clone()));
        }

        for (index, response) in pattern.any_of.iter().enumerate() {
            if response.commands.is_empty() {
                errors.push(ValidationError::EmptyCommands {
                    pattern: pattern.name.clone(),
                    index,
                });
            } else if response.commands.iter().any(|c| c.trim().is_empty()) {
                errors.push(ValidationError::BlankCommand {
                    pattern: pattern.name.clone(),
                    index,
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
