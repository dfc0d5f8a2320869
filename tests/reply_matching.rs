//! Reply matching against parsed server output.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use slirc_expect::{
    IdentityPredicate, MatchResponse, ParamPredicate, Response, ResponseOr, Responses,
};
use slirc_proto::{CaseFolder, CaseMapping, Line};

fn parse(raw: &str) -> Line {
    raw.parse().expect("valid line")
}

/// A folder whose mapping can be swapped mid-session.
struct SwitchableFolder {
    strict: AtomicBool,
}

impl CaseFolder for SwitchableFolder {
    fn casefold(&self, text: &str) -> String {
        if self.strict.load(Ordering::SeqCst) {
            CaseMapping::StrictRfc1459.casefold(text)
        } else {
            CaseMapping::Rfc1459.casefold(text)
        }
    }
}

#[test]
fn welcome_matches_regardless_of_params() {
    let welcome = Response::new("001", vec![], None);
    let folder = CaseMapping::Rfc1459;
    assert!(welcome.matches(&folder, &parse(":irc.example.com 001 me :Welcome to IRC")));
    assert!(welcome.matches(&folder, &parse("001")));
    assert!(!welcome.matches(&folder, &parse(":irc.example.com 002 me :Your host")));
}

#[test]
fn names_reply_for_one_channel() {
    let names = Response::new(
        "353",
        vec![
            ParamPredicate::any(),
            ParamPredicate::any(),
            ParamPredicate::folded("#Rust[dev]"),
        ],
        Some(IdentityPredicate::nickname("irc.example.com")),
    );
    let folder = CaseMapping::Rfc1459;

    assert!(names.matches(&folder, &parse(":irc.example.com 353 me = #rust{dev} :alice bob")));
    assert!(!names.matches(&folder, &parse(":irc.example.com 353 me = #go :alice")));
    // no source
    assert!(!names.matches(&folder, &parse("353 me = #rust{dev} :alice")));
    // source is another server
    assert!(!names.matches(&folder, &parse(":irc.other.net 353 me = #rust{dev} :alice")));
    // truncated
    assert!(!names.matches(&folder, &parse(":irc.example.com 353 me =")));
}

#[test]
fn join_or_failure_numerics() {
    let channel = "#chan";
    let joined = Response::new(
        "JOIN",
        vec![ParamPredicate::folded(channel)],
        Some(IdentityPredicate::nickname("me")),
    );
    let failed = Responses::new(
        ["471", "473", "474", "475"],
        vec![ParamPredicate::any(), ParamPredicate::folded(channel)],
        None,
    )
    .unwrap();
    let wait = ResponseOr::new([
        Box::new(joined) as Box<dyn MatchResponse>,
        Box::new(failed) as Box<dyn MatchResponse>,
    ])
    .unwrap();
    let folder = CaseMapping::Rfc1459;

    let stream = [
        ":irc.example.com NOTICE me :*** Looking up your hostname",
        ":other!o@h JOIN #chan",
        ":me!m@h JOIN #other",
        ":irc.example.com 474 me #Chan :Cannot join channel (+b)",
    ];
    let first = stream
        .iter()
        .position(|raw| wait.matches(&folder, &parse(raw)));
    assert_eq!(first, Some(3));

    assert!(wait.matches(&folder, &parse(":ME!m@h JOIN :#CHAN")));
}

#[test]
fn nested_alternation() {
    let inner = ResponseOr::new([
        Box::new(Response::new("PONG", vec![], None)) as Box<dyn MatchResponse>,
    ])
    .unwrap();
    let outer = ResponseOr::new([
        Box::new(inner) as Box<dyn MatchResponse>,
        Box::new(Response::new("ERROR", vec![], None)) as Box<dyn MatchResponse>,
    ])
    .unwrap();
    let folder = CaseMapping::Ascii;
    assert!(outer.matches(&folder, &parse("PONG irc.example.com :token")));
    assert!(outer.matches(&folder, &parse("ERROR :Closing link")));
    assert!(!outer.matches(&folder, &parse("PING :token")));
}

#[test]
fn negated_parameter() {
    // a mode change on #chan that is not a ban
    let pattern = Response::new(
        "MODE",
        vec![
            ParamPredicate::folded("#chan"),
            ParamPredicate::not(ParamPredicate::literal("+b")),
        ],
        None,
    );
    let folder = CaseMapping::Rfc1459;
    assert!(pattern.matches(&folder, &parse(":op!o@h MODE #Chan +o bob")));
    assert!(!pattern.matches(&folder, &parse(":op!o@h MODE #Chan +b *!*@bad")));
    assert!(!pattern.matches(&folder, &parse(":op!o@h MODE #Chan")));
}

#[test]
fn folded_constant_is_bound_at_first_use() {
    let folder = SwitchableFolder {
        strict: AtomicBool::new(false),
    };
    let pattern = Response::new("JOIN", vec![ParamPredicate::folded("#A~")], None);

    // rfc1459: "#A~" folds to "#a^"
    assert!(pattern.matches(&folder, &Line::new("JOIN", ["#a^"])));

    folder.strict.store(true, Ordering::SeqCst);

    // the argument is now folded under strict-rfc1459, the constant is not
    assert!(pattern.matches(&folder, &Line::new("JOIN", ["#a^"])));
    assert!(!pattern.matches(&folder, &Line::new("JOIN", ["#a~"])));

    // a pattern built after the change uses the new mapping
    let fresh = Response::new("JOIN", vec![ParamPredicate::folded("#A~")], None);
    assert!(fresh.matches(&folder, &Line::new("JOIN", ["#a~"])));
    assert!(!fresh.matches(&folder, &Line::new("JOIN", ["#a^"])));
}

#[test]
fn shared_pattern_across_threads() {
    let pattern = Arc::new(Response::new(
        "PRIVMSG",
        vec![ParamPredicate::folded("#Chan[1]")],
        Some(IdentityPredicate::nickname("Bob")),
    ));
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let pattern = Arc::clone(&pattern);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let line = Line::new("PRIVMSG", ["#CHAN{1}", "hi"]).with_prefix("bob!b@h");
                let other = Line::new("PRIVMSG", [format!("#chan{i}"), "hi".into()])
                    .with_prefix("bob!b@h");
                (0..100).all(|_| {
                    pattern.matches(&CaseMapping::Rfc1459, &line)
                        && !pattern.matches(&CaseMapping::Rfc1459, &other)
                })
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().expect("thread panicked"));
    }
}
