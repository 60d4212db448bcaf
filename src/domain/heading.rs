//! Leading-marker headings: `### Title` becomes a level-3 heading `Title`.

use regex::Regex;
use tracing::{debug, instrument};

use crate::domain::boundary::{compile, find_next};
use crate::domain::document::{HeadingLevel, Paragraph};
use crate::domain::error::DomainResult;

/// Detects a run of heading markers at the start of a paragraph,
/// strips it and applies the matching heading style.
#[derive(Debug, Clone)]
pub struct HeadingTransform {
    pattern: Regex,
    strip_overflow: bool,
}

impl HeadingTransform {
    /// `strip_overflow` controls whether runs longer than six markers are
    /// removed from the text (they are never styled).
    pub fn new(marker: char, strip_overflow: bool) -> DomainResult<Self> {
        let escaped = regex::escape(&marker.to_string());
        Ok(Self {
            pattern: compile(&format!("^(?:{escaped})+"))?,
            strip_overflow,
        })
    }

    /// Returns the counted marker run length, or `None` if the paragraph
    /// does not start with the marker.
    #[instrument(level = "debug", skip_all)]
    pub fn apply<P: Paragraph + ?Sized>(&self, paragraph: &mut P) -> DomainResult<Option<usize>> {
        let text = paragraph.text()?;
        let Some(run) = find_next(&text, &self.pattern, 0) else {
            return Ok(None);
        };
        let level = run.len();
        let heading = HeadingLevel::from_level(level);

        if heading.is_none() && !self.strip_overflow {
            debug!("level {} exceeds {}, left untouched", level, HeadingLevel::MAX);
            return Ok(Some(level));
        }

        paragraph.replace_text(&self.pattern, "")?;
        match heading {
            Some(heading) => {
                debug!("applying {}", heading);
                paragraph.set_heading(heading)?;
            }
            None => debug!("level {} exceeds {}, stripped without style", level, HeadingLevel::MAX),
        }
        Ok(Some(level))
    }
}
