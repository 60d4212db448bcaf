//! Pattern matching over paragraph text with character offsets.
//!
//! Regex matches are reported in bytes; hosts address text by character.
//! Everything leaving this module is a char offset into the full string.

use std::fmt;

use regex::Regex;
use tracing::{instrument, trace};

use crate::domain::error::{DomainError, DomainResult};

/// Half-open character range `[start, end)` of a matched span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Boundary {
    pub start: usize,
    pub end: usize,
}

impl Boundary {
    /// Returns `None` for empty or inverted ranges.
    pub fn new(start: usize, end: usize) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn overlaps(&self, other: &Boundary) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Compile a pattern, mapping regex failures into the domain error.
pub fn compile(pattern: &str) -> DomainResult<Regex> {
    Regex::new(pattern).map_err(|source| DomainError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Byte offset of the `char_offset`-th character, or `None` past the end.
fn byte_offset(text: &str, char_offset: usize) -> Option<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .nth(char_offset)
}

fn char_offset(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].chars().count()
}

/// Find the first non-empty match of `pattern` starting at or after the
/// character offset `from`.
///
/// Zero-width matches are skipped by advancing one character, so a caller
/// looping on the returned `end` always makes progress.
pub fn find_next(text: &str, pattern: &Regex, from: usize) -> Option<Boundary> {
    let mut pos = byte_offset(text, from)?;

    while pos <= text.len() {
        let m = pattern.find_at(text, pos)?;
        if m.start() < m.end() {
            let start = char_offset(text, m.start());
            let end = start + m.as_str().chars().count();
            return Boundary::new(start, end);
        }
        // empty match: step over the next character
        pos = match text[m.start()..].chars().next() {
            Some(c) => m.start() + c.len_utf8(),
            None => return None,
        };
    }
    None
}

/// Collect every non-overlapping match of `pattern`, ordered by start.
#[instrument(level = "trace", skip(pattern))]
pub fn scan_all(text: &str, pattern: &Regex) -> Vec<Boundary> {
    let len = text.chars().count();
    let mut boundaries = Vec::new();
    let mut offset = 0;

    while offset < len {
        match find_next(text, pattern, offset) {
            Some(boundary) => {
                trace!("match at {}", boundary);
                offset = boundary.end;
                boundaries.push(boundary);
            }
            None => break,
        }
    }
    boundaries
}
