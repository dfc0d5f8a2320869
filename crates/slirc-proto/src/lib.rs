//! # slirc-proto
//!
//! Protocol types shared by reply matching: case mappings, message
//! prefixes and tokenized lines.
//!
//! ## Quick Start
//!
//! ```rust
//! use slirc_proto::{CaseFolder, CaseMapping, Line};
//!
//! let line: Line = ":irc.example.com 353 me = #Chan :alice bob".parse().unwrap();
//! assert_eq!(line.command, "353");
//!
//! let mapping = CaseMapping::from_isupport("rfc1459").unwrap();
//! assert_eq!(mapping.casefold(&line.params[2]), "#chan");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod casemap;
pub mod error;
pub mod line;
pub mod prefix;

pub use self::casemap::{irc_eq, irc_lower_char, irc_to_lower, CaseFolder, CaseMapping};
pub use self::error::{LineParseError, UnknownCaseMapping};
pub use self::line::Line;
pub use self::prefix::Prefix;
