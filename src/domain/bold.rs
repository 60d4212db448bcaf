//! Inline bold spans: `a **bold** b` becomes `a bold b` with `bold` styled.

use regex::Regex;
use tracing::{debug, instrument};

use crate::domain::boundary::{compile, scan_all, Boundary};
use crate::domain::document::Paragraph;
use crate::domain::error::DomainResult;

/// Finds doubled-marker delimited spans, styles them and strips the delimiters.
#[derive(Debug, Clone)]
pub struct BoldTransform {
    pattern: Regex,
}

impl BoldTransform {
    const DELIMITER_LEN: usize = 2;

    pub fn new(marker: char) -> DomainResult<Self> {
        let m = regex::escape(&marker.to_string());
        Ok(Self {
            // content never includes the marker, even when `\w` covers it
            pattern: compile(&format!(r"(?:{m}){{2}}[\w\s--{m}]*(?:{m}){{2}}"))?,
        })
    }

    /// Spans that `apply` would style, against the paragraph's current text.
    pub fn spans(&self, text: &str) -> Vec<Boundary> {
        scan_all(text, &self.pattern)
    }

    /// Returns the number of spans styled.
    ///
    /// All spans are styled against the unmodified text before any delimiter
    /// is removed; delimiters are then deleted back to front so the offsets
    /// of earlier spans remain valid.
    #[instrument(level = "debug", skip_all)]
    pub fn apply<P: Paragraph + ?Sized>(&self, paragraph: &mut P) -> DomainResult<usize> {
        let text = paragraph.text()?;
        let spans = self.spans(&text);
        if spans.is_empty() {
            return Ok(0);
        }

        for span in &spans {
            debug!("bold {}", span);
            paragraph.set_bold(*span, true)?;
        }

        for span in spans.iter().rev() {
            if let Some(closing) = Boundary::new(span.end - Self::DELIMITER_LEN, span.end) {
                paragraph.delete_text(closing)?;
            }
            if let Some(opening) = Boundary::new(span.start, span.start + Self::DELIMITER_LEN) {
                paragraph.delete_text(opening)?;
            }
        }
        Ok(spans.len())
    }
}
