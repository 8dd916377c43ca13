//! # `libctxerr`
//!
//! Short diagnostics that point at a character or substring inside a larger
//! context string:
//!
//! ```text
//!
//! ctxerr::context_error
//!   Where: string 'll' in context 'examp > ll < e'.
//!   What: Misspelling.
//! ```
//!
//! The marked context is trimmed to a bounded length, but the marked text and
//! its markers always survive.

#![deny(unused_must_use)]

pub mod err;
pub mod marker;
pub mod pos;
pub mod resource;

pub use crate::{
    err::{Error, ErrorKind, Res},
    marker::{ContextMarker, MarkedContext, DEFAULT_MAX_LEN},
    pos::{Position, Range},
};

/// An error with nothing but a description of the problem.
pub fn make_error(problem: impl Into<String>) -> Error {
    Error::from_problem(problem)
}

/// An error saying where and what.
pub fn make_error_at(location: impl Into<String>, problem: impl Into<String>) -> Error {
    Error::new(location, problem)
}

/// An error about the character at `at` within `context`, trimmed to
/// [`DEFAULT_MAX_LEN`].
///
/// `at` must have been made from `context` itself (not a copy of it).
pub fn make_context_error(context: &str, at: Position, problem: impl Into<String>) -> Error {
    ContextMarker::default().char_error(context, at, problem)
}

/// An error about the text between `start` and `end` (in either order) within
/// `context`, trimmed to [`DEFAULT_MAX_LEN`].
///
/// ```
/// use libctxerr::{make_context_error_between, Position};
///
/// let ctx = "examplle";
/// let err = make_context_error_between(
///     ctx,
///     Position::clamped(ctx, 7),
///     Position::clamped(ctx, 5),
///     "Misspelling",
/// );
/// assert_eq!(err.location(), "string 'll' in context 'examp > ll < e'");
/// ```
pub fn make_context_error_between(
    context: &str,
    start: Position,
    end: Position,
    problem: impl Into<String>,
) -> Error {
    ContextMarker::default().span_error(context, start, end, problem)
}
