//! Whole-line reply patterns.

use std::fmt;

use slirc_proto::{CaseFolder, Line};
use tracing::trace;

use super::hostmask::IdentityPredicate;
use super::param::ParamPredicate;
use crate::error::PatternError;

/// A declarative test for whether an inbound line answers a request.
pub trait MatchResponse: fmt::Debug + fmt::Display + Send + Sync {
    fn matches(&self, folder: &dyn CaseFolder, line: &Line) -> bool;
}

impl<T: MatchResponse + ?Sized> MatchResponse for Box<T> {
    fn matches(&self, folder: &dyn CaseFolder, line: &Line) -> bool {
        (**self).matches(folder, line)
    }
}

/// Accepts any of several commands, with positional parameter constraints
/// and an optional sender constraint.
///
/// Commands are compared exactly; [`Line`]'s parser uppercases them.
#[derive(Debug, Clone)]
pub struct Responses {
    commands: Vec<String>,
    params: Vec<ParamPredicate>,
    source: Option<IdentityPredicate>,
}

impl Responses {
    /// Fails with [`PatternError::EmptyCommands`] if `commands` is empty.
    pub fn new<I, S>(
        commands: I,
        params: Vec<ParamPredicate>,
        source: Option<IdentityPredicate>,
    ) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let commands: Vec<String> = commands.into_iter().map(Into::into).collect();
        if commands.is_empty() {
            return Err(PatternError::EmptyCommands);
        }
        Ok(Self {
            commands,
            params,
            source,
        })
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn params(&self) -> &[ParamPredicate] {
        &self.params
    }

    pub fn source(&self) -> Option<&IdentityPredicate> {
        self.source.as_ref()
    }

    /// Every constrained slot must exist on the line and pass its predicate.
    fn scan(&self, folder: &dyn CaseFolder, line: &Line) -> bool {
        self.params.iter().enumerate().all(|(i, param)| {
            line.params
                .get(i)
                .is_some_and(|arg| param.matches(folder, arg))
        })
    }

    fn source_matches(&self, folder: &dyn CaseFolder, line: &Line) -> bool {
        match &self.source {
            None => true,
            Some(source) => line
                .sender()
                .is_some_and(|sender| source.matches(folder, sender)),
        }
    }
}

impl MatchResponse for Responses {
    fn matches(&self, folder: &dyn CaseFolder, line: &Line) -> bool {
        for command in &self.commands {
            if line.command != *command || !self.source_matches(folder, line) {
                continue;
            }
            if self.scan(folder, line) {
                trace!(pattern = %self, command = %line.command, "reply matched");
                return true;
            }
        }
        false
    }
}

fn write_params(f: &mut fmt::Formatter<'_>, params: &[ParamPredicate]) -> fmt::Result {
    f.write_str("[")?;
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", param)?;
    }
    f.write_str("]")
}

impl fmt::Display for Responses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Responses({:?}: ", self.commands)?;
        write_params(f, &self.params)?;
        if let Some(source) = &self.source {
            write!(f, " from {}", source)?;
        }
        f.write_str(")")
    }
}

/// Single-command form of [`Responses`].
#[derive(Debug, Clone)]
pub struct Response(Responses);

impl Response {
    pub fn new(
        command: impl Into<String>,
        params: Vec<ParamPredicate>,
        source: Option<IdentityPredicate>,
    ) -> Self {
        Self(Responses {
            commands: vec![command.into()],
            params,
            source,
        })
    }

    pub fn command(&self) -> &str {
        &self.0.commands[0]
    }

    pub fn into_responses(self) -> Responses {
        self.0
    }
}

impl MatchResponse for Response {
    fn matches(&self, folder: &dyn CaseFolder, line: &Line) -> bool {
        self.0.matches(folder, line)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Response({}: ", self.command())?;
        write_params(f, &self.0.params)?;
        if let Some(source) = &self.0.source {
            write!(f, " from {}", source)?;
        }
        f.write_str(")")
    }
}

/// Matches when any of its patterns does, tried in order.
#[derive(Debug)]
pub struct ResponseOr {
    responses: Vec<Box<dyn MatchResponse>>,
}

impl ResponseOr {
    /// Fails with [`PatternError::EmptyAlternation`] if `responses` is empty.
    pub fn new(
        responses: impl IntoIterator<Item = Box<dyn MatchResponse>>,
    ) -> Result<Self, PatternError> {
        let responses: Vec<_> = responses.into_iter().collect();
        if responses.is_empty() {
            return Err(PatternError::EmptyAlternation);
        }
        Ok(Self { responses })
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

impl MatchResponse for ResponseOr {
    fn matches(&self, folder: &dyn CaseFolder, line: &Line) -> bool {
        self.responses
            .iter()
            .any(|response| response.matches(folder, line))
    }
}

impl fmt::Display for ResponseOr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResponseOr(")?;
        for (i, response) in self.responses.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", response)?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slirc_proto::{CaseMapping, Prefix};

    const FOLDER: CaseMapping = CaseMapping::Rfc1459;

    fn names_reply(params: &[&str]) -> Line {
        Line::new("353", params.iter().copied()).with_prefix("irc.example.com")
    }

    #[test]
    fn empty_params_match_any_arity() {
        let welcome = Response::new("001", vec![], None);
        assert!(welcome.matches(&FOLDER, &Line::new("001", Vec::<String>::new())));
        assert!(welcome.matches(&FOLDER, &Line::new("001", ["me", "Welcome"])));
        assert!(!welcome.matches(&FOLDER, &Line::new("002", ["me"])));
    }

    #[test]
    fn positional_folded_slot() {
        let names = Response::new(
            "353",
            vec![ParamPredicate::any(), ParamPredicate::folded("#chan")],
            None,
        );
        assert!(names.matches(&FOLDER, &names_reply(&["mynick", "#CHAN"])));
        assert!(!names.matches(&FOLDER, &names_reply(&["mynick", "#other"])));
    }

    #[test]
    fn short_line_is_a_mismatch() {
        let names = Response::new(
            "353",
            vec![ParamPredicate::any(), ParamPredicate::folded("#chan")],
            None,
        );
        assert!(!names.matches(&FOLDER, &names_reply(&["mynick"])));

        // even when the missing slot is unconstrained
        let any2 = Response::new(
            "353",
            vec![ParamPredicate::any(), ParamPredicate::any()],
            None,
        );
        assert!(!any2.matches(&FOLDER, &names_reply(&["mynick"])));
    }

    #[test]
    fn extra_params_are_ignored() {
        let p = Response::new("353", vec![ParamPredicate::any()], None);
        assert!(p.matches(&FOLDER, &names_reply(&["me", "=", "#chan", "a b"])));
    }

    #[test]
    fn sender_required_when_set() {
        let p = Response::new("NICK", vec![], Some(IdentityPredicate::nickname("bob")));
        let unsourced = Line::new("NICK", ["robert"]);
        assert!(!p.matches(&FOLDER, &unsourced));

        let from_bob = unsourced.clone().with_prefix(Prefix::new("Bob", "b", "host"));
        assert!(p.matches(&FOLDER, &from_bob));

        let from_alice = unsourced.with_prefix(Prefix::new("alice", "bob", "bob"));
        assert!(!p.matches(&FOLDER, &from_alice));
    }

    #[test]
    fn any_command_may_match() {
        let p = Responses::new(
            ["482", "MODE"],
            vec![ParamPredicate::folded("#chan")],
            None,
        )
        .unwrap();
        assert!(p.matches(&FOLDER, &Line::new("MODE", ["#Chan", "+o", "bob"])));
        assert!(!p.matches(&FOLDER, &Line::new("482", ["me", "#chan"])));
        assert!(!p.matches(&FOLDER, &Line::new("KICK", ["#chan", "bob"])));
    }

    #[test]
    fn literal_params_compare_exactly() {
        let p = Response::new("CAP", vec![ParamPredicate::any(), "ACK".into()], None);
        assert!(p.matches(&FOLDER, &Line::new("CAP", ["*", "ACK", "sasl"])));
        assert!(!p.matches(&FOLDER, &Line::new("CAP", ["*", "ack", "sasl"])));
    }

    #[test]
    fn empty_commands_rejected() {
        let err = Responses::new(Vec::<String>::new(), vec![], None).unwrap_err();
        assert_eq!(err, PatternError::EmptyCommands);
    }

    #[test]
    fn alternation() {
        let or = ResponseOr::new([
            Box::new(Response::new("JOIN", vec![ParamPredicate::folded("#chan")], None))
                as Box<dyn MatchResponse>,
            Box::new(Response::new(
                "474",
                vec![ParamPredicate::any(), ParamPredicate::folded("#chan")],
                None,
            )) as Box<dyn MatchResponse>,
        ])
        .unwrap();
        assert_eq!(or.len(), 2);
        assert!(or.matches(&FOLDER, &Line::new("JOIN", ["#Chan"])));
        assert!(or.matches(&FOLDER, &Line::new("474", ["me", "#chan", "banned"])));
        assert!(!or.matches(&FOLDER, &Line::new("473", ["me", "#chan"])));
    }

    #[test]
    fn empty_alternation_rejected() {
        let err = ResponseOr::new(Vec::new()).unwrap_err();
        assert_eq!(err, PatternError::EmptyAlternation);
    }

    #[test]
    fn display() {
        let p = Response::new(
            "353",
            vec![ParamPredicate::any(), ParamPredicate::folded("#chan")],
            Some(IdentityPredicate::nickname("irc.example.com")),
        );
        assert_eq!(
            p.to_string(),
            "Response(353: [Any(), FoldString(\"#chan\")] from Hostmask(\"irc.example.com!*@*\"))"
        );

        let ps = Responses::new(["001", "002"], vec![], None).unwrap();
        assert_eq!(ps.to_string(), "Responses([\"001\", \"002\"]: [])");

        let or = ResponseOr::new([Box::new(ps) as Box<dyn MatchResponse>]).unwrap();
        assert_eq!(or.to_string(), "ResponseOr(Responses([\"001\", \"002\"]: []))");
    }
}
