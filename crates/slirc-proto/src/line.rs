//! Tokenized inbound protocol lines.
//!
//! A [`Line`] is the flat view of a message that reply matching works on:
//! a command token, its positional parameters, and the optional sender.
//!
//! ```text
//! [@tags] [:prefix] <command> [params...] [:trailing]
//! ```

use std::fmt;
use std::str::FromStr;

use nom::{
    bytes::complete::{take_until, take_while1},
    character::complete::{char, space0},
    combinator::opt,
    error::ErrorKind,
    sequence::preceded,
    IResult,
};
use smallvec::SmallVec;

use crate::error::LineParseError;
use crate::prefix::Prefix;

/// RFC 2812: at most 15 parameters.
pub const MAX_PARAMS: usize = 15;

/// One parsed protocol line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// Raw IRCv3 tags section, without the leading `@`.
    pub tags: Option<String>,
    /// Message source, if the line carried one.
    pub prefix: Option<Prefix>,
    /// Command name or three-digit numeric, uppercased.
    pub command: String,
    /// Positional parameters, trailing included.
    pub params: Vec<String>,
}

impl Line {
    /// Build a line from a command and its parameters.
    pub fn new<I, S>(command: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Line {
            tags: None,
            prefix: None,
            command: command.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Attach a source to this line.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<Prefix>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// The sender identity, if any.
    pub fn sender(&self) -> Option<&Prefix> {
        self.prefix.as_ref()
    }

    /// Parameter at `index`, if the line has that many.
    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }
}

/// Parse IRCv3 message tags (the part after `@` and before the first space).
fn parse_tags(input: &str) -> IResult<&str, &str> {
    preceded(char('@'), take_until(" "))(input)
}

/// Parse message prefix (the part after `:` and before the first space).
fn parse_prefix(input: &str) -> IResult<&str, &str> {
    preceded(char(':'), take_while1(|c| c != ' '))(input)
}

/// Parse the command name (1*letter or 3digit).
fn parse_command(input: &str) -> IResult<&str, &str> {
    let (rest, cmd) = take_while1(|c: char| c.is_ascii_alphanumeric())(input)?;

    let is_all_letters = cmd.chars().all(|c| c.is_ascii_alphabetic());
    let is_three_digits = cmd.len() == 3 && cmd.chars().all(|c| c.is_ascii_digit());

    if is_all_letters || is_three_digits {
        Ok((rest, cmd))
    } else {
        Err(nom::Err::Error(nom::error::Error::new(
            input,
            ErrorKind::AlphaNumeric,
        )))
    }
}

/// Split the parameter section. Runs of spaces separate, a leading `:`
/// starts the trailing parameter.
fn parse_params(input: &str) -> SmallVec<[&str; MAX_PARAMS]> {
    let mut params: SmallVec<[&str; MAX_PARAMS]> = SmallVec::new();
    let mut rest = input;

    while rest.starts_with(' ') && params.len() < MAX_PARAMS {
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            break;
        }

        if let Some(trailing) = rest.strip_prefix(':') {
            params.push(trailing);
            break;
        }

        let end = rest.find(' ').unwrap_or(rest.len());
        params.push(&rest[..end]);
        rest = &rest[end..];
    }

    params
}

fn parse_line(input: &str) -> IResult<&str, (Option<&str>, Option<&str>, &str)> {
    let (input, tags) = opt(parse_tags)(input)?;
    let (input, _) = space0(input)?;
    let (input, prefix) = opt(parse_prefix)(input)?;
    let (input, _) = space0(input)?;
    let (input, command) = parse_command(input)?;
    Ok((input, (tags, prefix, command)))
}

impl FromStr for Line {
    type Err = LineParseError;

    fn from_str(s: &str) -> Result<Line, Self::Err> {
        let s = s.trim_end_matches(['\r', '\n']);
        if s.is_empty() {
            return Err(LineParseError::Empty);
        }

        let (rest, (tags, prefix, command)) = parse_line(s).map_err(|e| {
            let position = match e {
                nom::Err::Error(e) | nom::Err::Failure(e) => s.len() - e.input.len(),
                nom::Err::Incomplete(_) => s.len(),
            };
            LineParseError::InvalidCommand {
                line: s.to_owned(),
                position,
            }
        })?;

        // Junk glued to the command (e.g. "PRIVMSG#chan") is not a command
        if !rest.is_empty() && !rest.starts_with(' ') {
            return Err(LineParseError::InvalidCommand {
                line: s.to_owned(),
                position: s.len() - rest.len(),
            });
        }

        Ok(Line {
            tags: tags.map(str::to_owned),
            prefix: prefix.map(Prefix::new_from_str),
            command: command.to_ascii_uppercase(),
            params: parse_params(rest).into_iter().map(str::to_owned).collect(),
        })
    }
}

/// Wire form of the line.
///
/// Only the last parameter can be written as a trailing, so a middle
/// parameter that is empty, contains a space, or starts with `:` has no
/// wire form and will not survive a reparse. Parsed lines never hold one.
impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tags) = &self.tags {
            write!(f, "@{} ", tags)?;
        }
        if let Some(prefix) = &self.prefix {
            write!(f, ":{} ", prefix)?;
        }
        f.write_str(&self.command)?;

        if let Some((last, middle)) = self.params.split_last() {
            for param in middle {
                write!(f, " {}", param)?;
            }
            if last.is_empty() || last.contains(' ') || last.starts_with(':') {
                write!(f, " :{}", last)?;
            } else {
                write!(f, " {}", last)?;
            }
        }
        Ok(())
    }
}
