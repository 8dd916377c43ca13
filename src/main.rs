#![deny(unused_must_use)]

use libctxerr::{
    make_context_error, make_context_error_between, make_error_at, Error, Position,
};
use nom::{character::complete::char, combinator::cut, error::context, sequence::delimited};
use nom_ctxerr::{FinishInContext, Res, Span};
use tracing_subscriber::EnvFilter;

fn main() {
    human_panic::setup_panic!();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    for (title, err) in examples() {
        println!("# {title}");
        println!("{}", err.render_styled());
    }
}

fn examples() -> Vec<(&'static str, Error)> {
    let mut out = vec![(
        "An error that says where it happened",
        make_error_at("main.rs, main()", "Example error"),
    )];

    let word = "examplle";
    out.push((
        "A bad character in some context",
        make_context_error(word, Position::clamped(word, 5), "Misspelling"),
    ));
    out.push((
        "A bad substring, endpoints in either order",
        make_context_error_between(
            word,
            Position::clamped(word, 7),
            Position::clamped(word, 5),
            "Misspelling",
        ),
    ));

    let long = "This is a long sentience we can use to demonstrate trimming.";
    out.push((
        "Long contexts are trimmed around the mark",
        make_context_error(long, Position::clamped(long, 19), "Misspelling"),
    ));

    let longer = "This is an even longer sentence we can use to demonstriate trimming \
                  from both ends of the string.";
    out.push((
        "Trimming from both ends",
        make_context_error(longer, Position::clamped(longer, 54), "Misspelling"),
    ));

    let src = "[one, two; three]";
    if let Err(err) = bracketed(Span::new(src)).finish_in_context(src) {
        out.push(("A failed `nom` parse", err));
    }

    out
}

fn bracketed(i: Span) -> Res<Span> {
    context(
        "bracketed words",
        delimited(
            char('['),
            nom::bytes::complete::take_while(|c: char| c.is_alphabetic() || c == ',' || c == ' '),
            cut(char(']')),
        ),
    )(i)
}
