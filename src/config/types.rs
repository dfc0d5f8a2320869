//! Core config struct definitions and loading.

use serde::Deserialize;
use slirc_proto::CaseMapping;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use super::validation::{self, ValidationError};
use crate::error::PatternError;
use crate::matching::{
    IdentityPredicate, MatchResponse, ParamPredicate, PatternSet, ResponseOr, Responses,
};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
    #[error("invalid pattern: {0}")]
    Pattern(#[from] PatternError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A named set of reply patterns.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Case mapping used to fold nicknames and channel names.
    #[serde(default)]
    pub casemapping: CaseMapping,
    /// Patterns, evaluated in file order.
    #[serde(default, rename = "pattern")]
    pub patterns: Vec<PatternConfig>,
}

/// One named pattern: a line matches if any alternative does.
#[derive(Debug, Clone, Deserialize)]
pub struct PatternConfig {
    pub name: String,
    #[serde(default)]
    pub any_of: Vec<ResponseConfig>,
}

/// A single `Responses` pattern.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseConfig {
    /// Accepted commands or numerics.
    pub commands: Vec<String>,
    /// Positional parameter constraints.
    #[serde(default)]
    pub params: Vec<ParamConfig>,
    /// Required sender nickname (user and host are not checked).
    pub sender: Option<String>,
}

/// A parameter constraint, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParamConfig {
    Any,
    Literal { value: String },
    Folded { value: String },
    Not { inner: Box<ParamConfig> },
}

impl From<&ParamConfig> for ParamPredicate {
    fn from(config: &ParamConfig) -> Self {
        match config {
            ParamConfig::Any => ParamPredicate::any(),
            ParamConfig::Literal { value } => ParamPredicate::literal(value.as_str()),
            ParamConfig::Folded { value } => ParamPredicate::folded(value.as_str()),
            ParamConfig::Not { inner } => ParamPredicate::not(inner.as_ref().into()),
        }
    }
}

impl ResponseConfig {
    fn build(&self) -> Result<Responses, PatternError> {
        Responses::new(
            self.commands.iter().cloned(),
            self.params.iter().map(ParamPredicate::from).collect(),
            self.sender.as_deref().map(IdentityPredicate::nickname),
        )
    }
}

impl PatternConfig {
    /// Build the matcher: a bare `Responses` for one alternative, a
    /// `ResponseOr` for several.
    pub fn build(&self) -> Result<Box<dyn MatchResponse>, PatternError> {
        match self.any_of.as_slice() {
            [] => Err(PatternError::EmptyAlternation),
            [single] => Ok(Box::new(single.build()?)),
            many => {
                let responses = many
                    .iter()
                    .map(|r| r.build().map(|p| Box::new(p) as Box<dyn MatchResponse>))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Box::new(ResponseOr::new(responses)?))
            }
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Validate and build every pattern.
    pub fn compile(&self) -> Result<PatternSet, ConfigError> {
        validation::validate(self).map_err(ConfigError::Invalid)?;

        let mut set = PatternSet::new(self.casemapping);
        for pattern in &self.patterns {
            let built = pattern.build()?;
            debug!(name = %pattern.name, pattern = %built, "compiled pattern");
            set.insert(pattern.name.clone(), built);
        }
        Ok(set)
    }
}
