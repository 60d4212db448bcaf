//! In-memory host document.
//!
//! Text is kept as characters with a parallel bold flag per character, so
//! deleting or replacing text carries the styling of surviving characters
//! along, the same way a word-processor body does.

use std::fs;
use std::path::Path;

use itertools::Itertools;
use regex::Regex;
use tracing::instrument;

use crate::domain::{Boundary, Document, DomainError, DomainResult, HeadingLevel, Paragraph};
use crate::infrastructure::error::{InfraError, InfraResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryParagraph {
    chars: Vec<char>,
    bold: Vec<bool>,
    heading: HeadingLevel,
    indent_level: Option<usize>,
}

/// A maximal stretch of text sharing one bold flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
}

impl MemoryParagraph {
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        Self {
            bold: vec![false; chars.len()],
            chars,
            heading: HeadingLevel::Normal,
            indent_level: None,
        }
    }

    /// Paragraph whose nesting level is tracked by the host.
    pub fn with_indent_level(mut self, level: usize) -> Self {
        self.indent_level = Some(level);
        self
    }

    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn is_bold(&self, offset: usize) -> bool {
        self.bold.get(offset).copied().unwrap_or(false)
    }

    /// Bold ranges of the current text.
    pub fn bold_ranges(&self) -> Vec<Boundary> {
        let mut ranges = Vec::new();
        let mut start = None;
        for (i, &flag) in self.bold.iter().chain(std::iter::once(&false)).enumerate() {
            match (flag, start) {
                (true, None) => start = Some(i),
                (false, Some(s)) => {
                    ranges.extend(Boundary::new(s, i));
                    start = None;
                }
                _ => {}
            }
        }
        ranges
    }

    pub fn runs(&self) -> Vec<TextRun> {
        self.chars
            .iter()
            .zip(self.bold.iter())
            .chunk_by(|(_, bold)| **bold)
            .into_iter()
            .map(|(bold, group)| TextRun {
                text: group.map(|(c, _)| *c).collect(),
                bold,
            })
            .collect()
    }

    fn check(&self, range: Boundary) -> DomainResult<()> {
        if range.is_empty() || range.end > self.chars.len() {
            return Err(DomainError::OutOfBounds {
                start: range.start,
                end: range.end,
                len: self.chars.len(),
            });
        }
        Ok(())
    }
}

impl Paragraph for MemoryParagraph {
    fn text(&self) -> DomainResult<String> {
        Ok(self.as_string())
    }

    fn set_text(&mut self, text: &str) -> DomainResult<()> {
        self.chars = text.chars().collect();
        self.bold = vec![false; self.chars.len()];
        Ok(())
    }

    fn heading(&self) -> HeadingLevel {
        self.heading
    }

    fn set_heading(&mut self, level: HeadingLevel) -> DomainResult<()> {
        self.heading = level;
        Ok(())
    }

    fn set_bold(&mut self, range: Boundary, bold: bool) -> DomainResult<()> {
        self.check(range)?;
        self.bold[range.start..range.end].fill(bold);
        Ok(())
    }

    fn delete_text(&mut self, range: Boundary) -> DomainResult<()> {
        self.check(range)?;
        self.chars.drain(range.start..range.end);
        self.bold.drain(range.start..range.end);
        Ok(())
    }

    fn replace_text(&mut self, pattern: &Regex, replacement: &str) -> DomainResult<()> {
        let text = self.as_string();
        let mut chars = Vec::with_capacity(self.chars.len());
        let mut bold = Vec::with_capacity(self.bold.len());
        let mut last_byte = 0;
        let mut last_char = 0;

        for m in pattern.find_iter(&text) {
            let start_char = last_char + text[last_byte..m.start()].chars().count();
            chars.extend_from_slice(&self.chars[last_char..start_char]);
            bold.extend_from_slice(&self.bold[last_char..start_char]);

            // inserted text inherits the style of the first replaced character
            let inherited = self.is_bold(start_char);
            for c in replacement.chars() {
                chars.push(c);
                bold.push(inherited);
            }
            last_char = start_char + m.as_str().chars().count();
            last_byte = m.end();
        }
        chars.extend_from_slice(&self.chars[last_char..]);
        bold.extend_from_slice(&self.bold[last_char..]);

        self.chars = chars;
        self.bold = bold;
        Ok(())
    }

    fn indent_level(&self) -> Option<usize> {
        self.indent_level
    }
}

/// Ordered paragraphs, one per line of the source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDocument {
    paragraphs: Vec<MemoryParagraph>,
    /// Source used `\r\n` line endings
    crlf: bool,
    trailing_newline: bool,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split on line endings; the ending style and a final newline are
    /// remembered for `to_file_text`.
    pub fn from_text(text: &str) -> Self {
        Self {
            paragraphs: text.lines().map(MemoryParagraph::new).collect(),
            crlf: text.contains("\r\n"),
            trailing_newline: text.ends_with('\n'),
        }
    }

    #[instrument(level = "debug")]
    pub fn load(path: &Path) -> InfraResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| InfraError::io(format!("read {}", path.display()), e))?;
        Ok(Self::from_text(&content))
    }

    /// Write one paragraph per line with the line endings of the source.
    #[instrument(level = "debug", skip(self))]
    pub fn save(&self, path: &Path) -> InfraResult<()> {
        fs::write(path, self.to_file_text())
            .map_err(|e| InfraError::io(format!("write {}", path.display()), e))
    }

    pub fn push(&mut self, paragraph: MemoryParagraph) {
        self.paragraphs.push(paragraph);
    }

    pub fn append_paragraph(&mut self, text: &str) -> &mut MemoryParagraph {
        self.paragraphs.push(MemoryParagraph::new(text));
        let last = self.paragraphs.len() - 1;
        &mut self.paragraphs[last]
    }

    pub fn paragraphs(&self) -> &[MemoryParagraph] {
        &self.paragraphs
    }

    pub fn to_plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(MemoryParagraph::as_string)
            .join("\n")
    }

    /// Plain text with the source's line endings and final newline restored.
    pub fn to_file_text(&self) -> String {
        let newline = if self.crlf { "\r\n" } else { "\n" };
        let mut text = self
            .paragraphs
            .iter()
            .map(MemoryParagraph::as_string)
            .join(newline);
        if self.trailing_newline {
            text.push_str(newline);
        }
        text
    }
}

impl Document for MemoryDocument {
    type Paragraph = MemoryParagraph;

    fn len(&self) -> usize {
        self.paragraphs.len()
    }

    fn paragraph(&self, index: usize) -> Option<&MemoryParagraph> {
        self.paragraphs.get(index)
    }

    fn paragraph_mut(&mut self, index: usize) -> Option<&mut MemoryParagraph> {
        self.paragraphs.get_mut(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_shifts_styles() {
        let mut p = MemoryParagraph::new("ab**cd**");
        p.set_bold(Boundary::new(2, 8).unwrap(), true).unwrap();
        p.delete_text(Boundary::new(6, 8).unwrap()).unwrap();
        p.delete_text(Boundary::new(2, 4).unwrap()).unwrap();
        assert_eq!(p.as_string(), "abcd");
        assert_eq!(p.bold_ranges(), vec![Boundary::new(2, 4).unwrap()]);
    }

    #[test]
    fn test_replace_text_keeps_styles_outside_matches() {
        let mut p = MemoryParagraph::new("##ab");
        p.set_bold(Boundary::new(3, 4).unwrap(), true).unwrap();
        p.replace_text(&Regex::new("^#+").unwrap(), "").unwrap();
        assert_eq!(p.as_string(), "ab");
        assert_eq!(p.bold_ranges(), vec![Boundary::new(1, 2).unwrap()]);
    }

    #[test]
    fn test_out_of_bounds_range_is_rejected() {
        let mut p = MemoryParagraph::new("abc");
        let err = p.set_bold(Boundary::new(1, 9).unwrap(), true).unwrap_err();
        assert!(matches!(err, DomainError::OutOfBounds { len: 3, .. }));
    }

    #[test]
    fn test_runs_group_by_bold() {
        let mut p = MemoryParagraph::new("a bold b");
        p.set_bold(Boundary::new(2, 6).unwrap(), true).unwrap();
        let runs = p.runs();
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[1], TextRun { text: "bold".into(), bold: true });
    }
}
