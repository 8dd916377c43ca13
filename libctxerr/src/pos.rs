//! Positions and ranges over a context string.
//!
//! A [`Position`] is a character index (not a byte offset) that remembers the
//! exact string it was made from. Positions are only ever interpreted against
//! that string; handed a different one, they resolve to its end.

use std::{fmt, ptr};

use tracing::warn;

#[derive(Clone, Copy)]
pub struct Position<'c> {
    src: &'c str,
    idx: usize,
}

impl<'c> Position<'c> {
    /// The position of the `idx`th character of `src`. `idx` may equal the
    /// character count (the end-of-string position) but not exceed it.
    pub fn new(src: &'c str, idx: usize) -> Option<Self> {
        (idx <= char_len(src)).then_some(Self { src, idx })
    }

    /// Like [`Position::new`], but an index past the end becomes the
    /// end-of-string position.
    pub fn clamped(src: &'c str, idx: usize) -> Self {
        Self {
            src,
            idx: idx.min(char_len(src)),
        }
    }

    pub fn start(src: &'c str) -> Self {
        Self { src, idx: 0 }
    }

    pub fn end(src: &'c str) -> Self {
        Self {
            src,
            idx: char_len(src),
        }
    }

    /// Converts a byte offset (as reported by most lexers) into a position.
    /// Offsets that fall inside a multi-byte character are rejected.
    pub fn from_byte_offset(src: &'c str, offset: usize) -> Option<Self> {
        if !src.is_char_boundary(offset) {
            return None;
        }
        Some(Self {
            src,
            idx: src[..offset].chars().count(),
        })
    }

    pub fn index(&self) -> usize {
        self.idx
    }

    pub fn is_end(&self) -> bool {
        self.idx == char_len(self.src)
    }

    /// The string this position was made from.
    pub fn source(&self) -> &'c str {
        self.src
    }

    /// True only for the very string (same memory, same length) this
    /// position was made from. Equal contents elsewhere don't count.
    pub fn belongs_to(&self, src: &str) -> bool {
        ptr::eq(self.src, src)
    }

    /// The character index to use against `context`.
    fn resolve(&self, context: &str) -> usize {
        if self.belongs_to(context) {
            self.idx
        } else {
            warn!(
                idx = self.idx,
                "position was made from a different string, using the end of the context"
            );
            char_len(context)
        }
    }
}

impl fmt::Debug for Position<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", self.idx)
    }
}

impl PartialEq for Position<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.idx == other.idx && ptr::eq(self.src, other.src)
    }
}

impl Eq for Position<'_> {}

/// Two positions in the same string, in either order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range<'c> {
    pub start: Position<'c>,
    pub end: Position<'c>,
}

impl<'c> Range<'c> {
    pub fn new(start: Position<'c>, end: Position<'c>) -> Self {
        Self { start, end }
    }

    /// The range made of a single position, i.e. the character at `at`.
    pub fn single(at: Position<'c>) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_single(&self) -> bool {
        self.start.idx == self.end.idx
    }

    /// Endpoints as character indices into `context`, still in the order they
    /// were given.
    pub(crate) fn raw(&self, context: &str) -> (usize, usize) {
        (self.start.resolve(context), self.end.resolve(context))
    }

    /// The half-open character span `[lo, hi)` this range covers in
    /// `context`. A single position covers one character, or nothing when it
    /// sits at the end of the string.
    pub(crate) fn span(&self, context: &str) -> (usize, usize) {
        let (a, b) = self.raw(context);
        if a == b {
            (a, (a + 1).min(char_len(context)))
        } else {
            (a.min(b), a.max(b))
        }
    }

    /// Number of characters covered in `context`.
    pub fn width(&self, context: &str) -> usize {
        let (lo, hi) = self.span(context);
        hi - lo
    }
}

impl<'c> From<Position<'c>> for Range<'c> {
    fn from(at: Position<'c>) -> Self {
        Self::single(at)
    }
}

pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of the `idx`th character of `s`, or `s.len()` past the end.
pub(crate) fn byte_offset(s: &str, idx: usize) -> usize {
    s.char_indices().nth(idx).map_or(s.len(), |(b, _)| b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn new_rejects_past_the_end() {
        let src = "abc";
        check!(Position::new(src, 3).is_some());
        check!(Position::new(src, 4).is_none());
        check!(Position::clamped(src, 17).is_end());
    }

    #[test]
    fn byte_offsets_become_char_indices() {
        let src = "héllo";
        check!(Position::from_byte_offset(src, 3).map(|p| p.index()) == Some(2));
        check!(Position::from_byte_offset(src, 2).is_none());
        check!(Position::from_byte_offset(src, 99).is_none());
        check!(Position::from_byte_offset(src, src.len()).map(|p| p.is_end()) == Some(true));
    }

    #[test]
    fn identity_not_contents() {
        let a = String::from("same");
        let b = a.clone();
        let p = Position::start(&a);
        check!(p.belongs_to(&a));
        check!(!p.belongs_to(&b));
        check!(!p.belongs_to(&a[..2]));
    }

    #[test]
    fn reversed_ranges_cover_the_same_span() {
        let src = "examplle";
        let (p5, p7) = (Position::clamped(src, 5), Position::clamped(src, 7));
        check!(Range::new(p5, p7).span(src) == (5, 7));
        check!(Range::new(p7, p5).span(src) == (5, 7));
    }

    #[test]
    fn single_positions_cover_one_char() {
        let src = "examplle";
        check!(Range::single(Position::clamped(src, 6)).span(src) == (6, 7));
        check!(Range::single(Position::end(src)).span(src) == (8, 8));
        check!(Range::single(Position::end(src)).width(src) == 0);
    }

    #[test]
    fn foreign_positions_resolve_to_the_end() {
        let other = String::from("elsewhere");
        let src = "examplle";
        let r = Range::single(Position::start(&other));
        check!(r.raw(src) == (8, 8));
    }

    #[test]
    fn byte_offset_of_char() {
        check!(byte_offset("héllo", 2) == 3);
        check!(byte_offset("héllo", 5) == 6);
        check!(byte_offset("", 0) == 0);
    }
}
