//! # `nom_ctxerr`
//!
//! Turns `nom` failures over [`LocatedSpan`] input into [`libctxerr::Error`]s
//! that mark the spot in the source where the parser gave up.
//!
//! The `context` string handed to these functions must be the very string the
//! spans were created from; span offsets are interpreted against it.

#![deny(unused_must_use)]

use libctxerr::{ContextMarker, Error, Position, Range};
use nom::{
    error::{VerboseError, VerboseErrorKind},
    IResult, Needed,
};
use nom_locate::LocatedSpan;

pub type Span<'i> = LocatedSpan<&'i str>;
pub type PErr<'i> = VerboseError<Span<'i>>;
pub type Res<'i, O = ()> = IResult<Span<'i>, O, PErr<'i>>;

/// Where `at` begins within `context`.
pub fn position_of<'c>(context: &'c str, at: &Span) -> Option<Position<'c>> {
    Position::from_byte_offset(context, at.location_offset())
}

/// The range of `context` covered by `fragment`.
pub fn fragment_range<'c>(context: &'c str, fragment: &Span) -> Option<Range<'c>> {
    let start = position_of(context, fragment)?;
    let end_offset = fragment.location_offset() + fragment.fragment().len();
    let end = Position::from_byte_offset(context, end_offset)?;
    Some(Range::new(start, end))
}

fn describe(kind: &VerboseErrorKind) -> String {
    match kind {
        VerboseErrorKind::Context(ctx) => ctx.to_string(),
        VerboseErrorKind::Char(c) => format!("expected '{c}'"),
        VerboseErrorKind::Nom(kind) => format!("failed to match {kind:?}"),
    }
}

/// The innermost cause, followed by every `context(...)` label the failure
/// passed through on its way out.
pub fn problem_of(err: &PErr) -> String {
    let mut kinds = err.errors.iter().map(|(_, kind)| kind);
    let Some(innermost) = kinds.next() else {
        return "parse failed".into();
    };

    let mut problem = describe(innermost);
    for kind in kinds {
        if let VerboseErrorKind::Context(ctx) = kind {
            problem.push_str(" while parsing ");
            problem.push_str(ctx);
        }
    }
    problem
}

/// A context error pointing at the innermost failure of `err`.
pub fn from_verbose(context: &str, err: &PErr, marker: &ContextMarker) -> Error {
    let at = err
        .errors
        .first()
        .and_then(|(input, _)| position_of(context, input))
        .unwrap_or_else(|| Position::end(context));
    marker.char_error(context, at, problem_of(err))
}

fn incomplete(needed: Needed) -> String {
    match needed {
        Needed::Unknown => "incomplete input".into(),
        Needed::Size(n) => format!("incomplete input, {n} more bytes needed"),
    }
}

/// Like [`nom::Finish`], but failures come out as [`Error`]s marked inside
/// `context`.
pub trait FinishInContext<'i, O> {
    fn finish_in_context(self, context: &'i str) -> Result<(Span<'i>, O), Error>;

    fn finish_with(
        self,
        context: &'i str,
        marker: &ContextMarker,
    ) -> Result<(Span<'i>, O), Error>;
}

impl<'i, O> FinishInContext<'i, O> for Res<'i, O> {
    fn finish_in_context(self, context: &'i str) -> Result<(Span<'i>, O), Error> {
        self.finish_with(context, &ContextMarker::default())
    }

    fn finish_with(
        self,
        context: &'i str,
        marker: &ContextMarker,
    ) -> Result<(Span<'i>, O), Error> {
        match self {
            Ok(done) => Ok(done),
            Err(nom::Err::Error(e) | nom::Err::Failure(e)) => {
                Err(from_verbose(context, &e, marker))
            }
            Err(nom::Err::Incomplete(needed)) => Err(Error::new(
                "nom_ctxerr::finish_in_context",
                incomplete(needed),
            )),
        }
    }
}
