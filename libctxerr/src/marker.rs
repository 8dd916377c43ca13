//! Marking a span inside a context string and cutting the result down to a
//! readable length.
//!
//! The pipeline is: [`extract`] the offending text, [`mark`] it inside a copy
//! of the context, [`trim`] the marked copy, then wrap both in an [`Error`].

use std::fmt;

use tracing::trace;

use crate::{
    err::{Error, ErrorKind},
    pos::{byte_offset, char_len, Position, Range},
};

/// Inserted right before the marked span.
pub const OPEN_MARK: &str = " > ";

/// Inserted right after the marked span.
pub const CLOSE_MARK: &str = " < ";

/// Stands in for trimmed-away context.
pub const ELLIPSIS: &str = "...";

pub const DEFAULT_MAX_LEN: usize = 50;

const MARK_LEN: usize = 3;

/// The text denoted by `range`, left to right as it appears in `context`.
///
/// Never fails: anything that doesn't name real characters comes back empty.
pub fn extract(context: &str, range: &Range) -> String {
    let (start, end) = range.raw(context);

    if start == end {
        return context.chars().nth(start).map(String::from).unwrap_or_default();
    }

    let len = char_len(context);
    if len == 0 || start == len || end == len {
        return String::new();
    }

    let (lo, hi) = (start.min(end), start.max(end));
    context.chars().skip(lo).take(hi - lo).collect()
}

/// A copy of a context string with [`OPEN_MARK`] and [`CLOSE_MARK`] around
/// one span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkedContext {
    text: String,
    /// Char index where [`OPEN_MARK`] starts.
    open: usize,
    /// Char index where [`CLOSE_MARK`] starts.
    close: usize,
}

impl MarkedContext {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length in characters, markers included.
    pub fn char_len(&self) -> usize {
        char_len(&self.text)
    }

    /// Length in characters of the marked span, markers excluded.
    pub fn span_len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.close - self.open - MARK_LEN
        }
    }

    /// Characters of unmarked context before [`OPEN_MARK`].
    fn before(&self) -> usize {
        self.open
    }

    /// Characters of unmarked context after [`CLOSE_MARK`].
    fn after(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.char_len() - self.close - MARK_LEN
        }
    }
}

impl fmt::Display for MarkedContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Copies `context` and surrounds the span denoted by `range` with markers.
///
/// ```
/// use libctxerr::{marker::mark, Position, Range};
///
/// let ctx = "examplle";
/// let range = Range::new(Position::clamped(ctx, 5), Position::clamped(ctx, 6));
/// assert_eq!(mark(ctx, &range).as_str(), "examp > l < le");
/// ```
pub fn mark(context: &str, range: &Range) -> MarkedContext {
    if context.is_empty() {
        return MarkedContext::default();
    }

    let (lo, hi) = range.span(context);
    let mut text = context.to_owned();
    text.insert_str(byte_offset(context, lo), OPEN_MARK);
    // The close mark goes in after the open mark shifted everything right.
    text.insert_str(byte_offset(context, hi) + OPEN_MARK.len(), CLOSE_MARK);

    MarkedContext {
        text,
        open: lo,
        close: hi + MARK_LEN,
    }
}

/// Shortens `marked` to about `max_len` characters by cutting unmarked
/// context from both ends, each cut replaced by [`ELLIPSIS`].
///
/// Each end loses `ceil((len - max_len) / 2)` characters. An end that runs
/// out of context hands the rest of its share to the other end. The markers
/// and the span between them are never cut, and a span that is itself
/// `max_len` or longer leaves the whole thing untouched.
pub fn trim(marked: &MarkedContext, max_len: usize) -> String {
    let len = marked.char_len();
    if marked.is_empty() || len < max_len {
        return marked.text.clone();
    }

    if marked.span_len() >= max_len {
        trace!(
            span_len = marked.span_len(),
            max_len,
            "marked span too long to trim around"
        );
        return marked.text.clone();
    }

    let excess = (len - max_len).div_ceil(2);
    let (before, after) = (marked.before(), marked.after());

    let mut cut_front = excess.min(before);
    let mut cut_back = excess.min(after);

    let mut leftover = 2 * excess - cut_front - cut_back;
    let extra = leftover.min(before - cut_front);
    cut_front += extra;
    leftover -= extra;
    cut_back += leftover.min(after - cut_back);

    trace!(len, max_len, cut_front, cut_back, "trimming marked context");

    let mut out = String::with_capacity(marked.text.len());
    if cut_front > 0 {
        out.push_str(ELLIPSIS);
    }
    out.extend(marked.text.chars().skip(cut_front).take(len - cut_front - cut_back));
    if cut_back > 0 {
        out.push_str(ELLIPSIS);
    }
    out
}

/// Builds context errors with a fixed maximum display length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextMarker {
    max_len: usize,
}

impl Default for ContextMarker {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_MAX_LEN,
        }
    }
}

impl ContextMarker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_len(max_len: usize) -> Self {
        Self { max_len }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// The marked and trimmed context that would appear in an error.
    pub fn display(&self, context: &str, range: &Range) -> String {
        trim(&mark(context, range), self.max_len)
    }

    /// A context error whose location reads
    /// `character 'x' in context '...'` or `string 'xyz' in context '...'`.
    pub fn build_message(&self, context: &str, range: &Range, problem: impl Into<String>) -> Error {
        let substring = extract(context, range);
        let display = self.display(context, range);
        let what = if range.width(context) > 1 {
            "string"
        } else {
            "character"
        };
        Error::with_kind(
            ErrorKind::Context,
            format!("{what} '{substring}' in context '{display}'"),
            problem,
        )
    }

    /// An error about the single character at `at`.
    pub fn char_error(&self, context: &str, at: Position, problem: impl Into<String>) -> Error {
        self.build_message(context, &Range::single(at), problem)
    }

    /// An error about the characters between `start` and `end`, given in
    /// either order.
    pub fn span_error(
        &self,
        context: &str,
        start: Position,
        end: Position,
        problem: impl Into<String>,
    ) -> Error {
        self.build_message(context, &Range::new(start, end), problem)
    }
}
