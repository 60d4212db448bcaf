//! Host document boundary.
//!
//! The host owns paragraphs; the core only reads and mutates them through
//! these traits. Offsets are character offsets into the current text.

use std::fmt;

use regex::Regex;

use crate::domain::boundary::Boundary;
use crate::domain::error::DomainResult;

/// Paragraph heading style, `Normal` meaning no heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum HeadingLevel {
    #[default]
    Normal,
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Heading6,
}

impl HeadingLevel {
    pub const MAX: usize = 6;

    /// Map a marker count to a heading; `None` outside `1..=6`.
    pub fn from_level(level: usize) -> Option<Self> {
        match level {
            1 => Some(Self::Heading1),
            2 => Some(Self::Heading2),
            3 => Some(Self::Heading3),
            4 => Some(Self::Heading4),
            5 => Some(Self::Heading5),
            6 => Some(Self::Heading6),
            _ => None,
        }
    }

    pub fn level(&self) -> usize {
        match self {
            Self::Normal => 0,
            Self::Heading1 => 1,
            Self::Heading2 => 2,
            Self::Heading3 => 3,
            Self::Heading4 => 4,
            Self::Heading5 => 5,
            Self::Heading6 => 6,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            other => write!(f, "HEADING{}", other.level()),
        }
    }
}

/// A mutable text block with heading and per-character bold styling.
pub trait Paragraph {
    /// Current text.
    fn text(&self) -> DomainResult<String>;

    /// Replace the whole text; styling of the old text is dropped.
    fn set_text(&mut self, text: &str) -> DomainResult<()>;

    fn heading(&self) -> HeadingLevel;

    fn set_heading(&mut self, level: HeadingLevel) -> DomainResult<()>;

    /// Set or clear bold over a range of the current text.
    fn set_bold(&mut self, range: Boundary, bold: bool) -> DomainResult<()>;

    /// Delete a range; styling of the remaining characters is kept.
    fn delete_text(&mut self, range: Boundary) -> DomainResult<()>;

    /// Replace every match of `pattern`; styling outside matches is kept.
    fn replace_text(&mut self, pattern: &Regex, replacement: &str) -> DomainResult<()>;

    /// Host-native nesting level (e.g. a list item's level), if the host tracks one.
    fn indent_level(&self) -> Option<usize> {
        None
    }
}

/// Ordered, index-addressable paragraph collection.
pub trait Document {
    type Paragraph: Paragraph;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn paragraph(&self, index: usize) -> Option<&Self::Paragraph>;

    fn paragraph_mut(&mut self, index: usize) -> Option<&mut Self::Paragraph>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_mapping() {
        for level in 1..=HeadingLevel::MAX {
            assert_eq!(HeadingLevel::from_level(level).unwrap().level(), level);
        }
        assert_eq!(HeadingLevel::from_level(0), None);
        assert_eq!(HeadingLevel::from_level(7), None);
        assert_eq!(HeadingLevel::Heading3.to_string(), "HEADING3");
    }
}
