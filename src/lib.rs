//! slirc-expect - declarative reply matching for IRC clients.
//!
//! A client that sends a command must recognise which of the lines the
//! server sends back answer it. [`matching`] describes acceptable replies
//! up front and tests each inbound line with a single boolean decision;
//! [`config`] loads named pattern sets from TOML and [`filter`] runs a
//! line stream through them.

pub mod config;
pub mod error;
pub mod filter;
pub mod matching;

pub use error::PatternError;
pub use matching::{
    IdentityPredicate, MatchResponse, ParamPredicate, PatternSet, Response, ResponseOr, Responses,
};
