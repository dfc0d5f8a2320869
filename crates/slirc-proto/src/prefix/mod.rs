//! Message sources.
//!
//! A line's source is either a server name or a `nick!user@host` mask.
//! Reply matching only ever looks at the name in the nickname position,
//! so that is what [`Prefix`] exposes; the rest of the mask is kept for
//! re-serialization.
//!
//! # Reference
//! - RFC 2812 Section 2.3.1: Message format

use std::fmt;
use std::str::FromStr;

use nom::{
    bytes::complete::take_till,
    character::complete::char,
    combinator::{opt, rest},
    sequence::{preceded, tuple},
    IResult,
};

/// Who sent a line.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Prefix {
    /// Server name (e.g., "irc.example.com")
    ServerName(String),
    /// User mask: (nickname, username, hostname); absent parts are empty
    Nickname(String, String, String),
}

/// `name [ "!" user ] [ "@" host ]`. The host runs to the end of input.
fn split_mask(input: &str) -> IResult<&str, (&str, Option<&str>, Option<&str>)> {
    tuple((
        take_till(|c: char| c == '!' || c == '@'),
        opt(preceded(char('!'), take_till(|c: char| c == '@'))),
        opt(preceded(char('@'), rest)),
    ))(input)
}

impl Prefix {
    /// Parse a source without validating its parts.
    ///
    /// A bare name containing a dot is taken to be a server.
    pub fn new_from_str(s: &str) -> Self {
        let (name, user, host) = match split_mask(s) {
            Ok((_, parts)) => parts,
            Err(_) => (s, None, None),
        };

        if user.is_none() && host.is_none() && name.contains('.') {
            return Prefix::ServerName(name.to_owned());
        }
        Prefix::Nickname(
            name.to_owned(),
            user.unwrap_or_default().to_owned(),
            host.unwrap_or_default().to_owned(),
        )
    }

    /// Build a user mask.
    ///
    /// ```
    /// use slirc_proto::Prefix;
    ///
    /// let bob = Prefix::new("bob", "b", "example.com");
    /// assert_eq!(bob.nickname(), "bob");
    /// assert_eq!(bob.to_string(), "bob!b@example.com");
    /// ```
    pub fn new(nick: impl Into<String>, user: impl Into<String>, host: impl Into<String>) -> Self {
        Prefix::Nickname(nick.into(), user.into(), host.into())
    }

    /// The name in the nickname position of the mask.
    ///
    /// For a server this is the server name, so a line sourced from
    /// `irc.example.com` can be matched by nickname like any other sender.
    pub fn nickname(&self) -> &str {
        match self {
            Prefix::ServerName(name) | Prefix::Nickname(name, _, _) => name,
        }
    }

    /// Whether this source is a server rather than a user.
    pub fn is_server(&self) -> bool {
        matches!(self, Prefix::ServerName(_))
    }
}

impl FromStr for Prefix {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Prefix::new_from_str(s))
    }
}

impl From<&str> for Prefix {
    fn from(s: &str) -> Self {
        Prefix::new_from_str(s)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, user, host) = match self {
            Prefix::ServerName(name) => return f.write_str(name),
            Prefix::Nickname(name, user, host) => (name, user, host),
        };
        f.write_str(name)?;
        if !user.is_empty() {
            write!(f, "!{}", user)?;
        }
        if !host.is_empty() {
            write!(f, "@{}", host)?;
        }
        Ok(())
    }
}
