//! Declarative matching of server replies.
//!
//! A client that sends a command builds a pattern describing the replies
//! it expects, then tests each inbound [`Line`](slirc_proto::Line) against
//! it until one matches.
//!
//! ```
//! use slirc_expect::matching::{MatchResponse, ParamPredicate, Response};
//! use slirc_proto::{CaseMapping, Line};
//!
//! let names = Response::new(
//!     "353",
//!     vec![ParamPredicate::any(), ParamPredicate::any(), ParamPredicate::folded("#rust")],
//!     None,
//! );
//! let line: Line = ":irc.example.com 353 me = #Rust :alice bob".parse().unwrap();
//! assert!(names.matches(&CaseMapping::Rfc1459, &line));
//! ```
//!
//! Folded constants are cached on first use, so a pattern stays bound to
//! the case mapping it first ran under. Build fresh patterns after the
//! server's `CASEMAPPING` changes.

mod folded;
mod hostmask;
mod param;
mod response;
mod set;

pub use folded::FoldedValue;
pub use hostmask::IdentityPredicate;
pub use param::ParamPredicate;
pub use response::{MatchResponse, Response, ResponseOr, Responses};
pub use set::PatternSet;
