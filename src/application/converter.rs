//! Whole-document conversion with per-paragraph failure isolation.

use tracing::{debug, info, instrument, warn};

use crate::application::error::ApplicationResult;
use crate::config::Settings;
use crate::domain::{
    BoldTransform, Document, DomainResult, HeadingLevel, HeadingTransform, ListBuilder, ListNode,
    ListTree, Paragraph,
};

/// A paragraph that could not be transformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphFailure {
    pub index: usize,
    /// Text before any transform ran
    pub original_text: String,
    pub message: String,
}

/// Outcome of one conversion pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub paragraphs: usize,
    pub headings: usize,
    pub bold_spans: usize,
    pub failures: Vec<ParagraphFailure>,
}

impl ConversionReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Applies the heading and bold transforms to every paragraph of a document.
#[derive(Debug, Clone)]
pub struct Converter {
    heading: HeadingTransform,
    bold: BoldTransform,
    list: ListBuilder,
}

impl Converter {
    pub fn new(heading: HeadingTransform, bold: BoldTransform, list: ListBuilder) -> Self {
        Self { heading, bold, list }
    }

    pub fn from_settings(settings: &Settings) -> ApplicationResult<Self> {
        Ok(Self::new(
            HeadingTransform::new(settings.heading.marker, settings.heading.strip_overflow)?,
            BoldTransform::new(settings.bold.marker)?,
            ListBuilder::new(settings.list.indent_width)?,
        ))
    }

    /// Transform every paragraph exactly once, in order.
    ///
    /// A failing paragraph is logged with its original text and skipped;
    /// the pass always runs to the end of the document.
    #[instrument(level = "debug", skip_all)]
    pub fn convert<D: Document>(&self, document: &mut D) -> ConversionReport {
        let mut report = ConversionReport::default();

        for index in 0..document.len() {
            let Some(paragraph) = document.paragraph_mut(index) else {
                continue;
            };
            report.paragraphs += 1;

            let original_text = match paragraph.text() {
                Ok(text) => text,
                Err(e) => {
                    warn!("Couldn't read paragraph {}: {}", index, e);
                    report.failures.push(ParagraphFailure {
                        index,
                        original_text: String::new(),
                        message: e.to_string(),
                    });
                    continue;
                }
            };
            match self.transform(paragraph) {
                Ok((heading, bold_spans)) => {
                    if heading {
                        report.headings += 1;
                    }
                    report.bold_spans += bold_spans;
                }
                Err(e) => {
                    warn!(
                        index,
                        original_text = %original_text,
                        error = %e,
                        "Couldn't transform paragraph"
                    );
                    report.failures.push(ParagraphFailure {
                        index,
                        original_text,
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(
            "converted {} paragraphs: {} headings, {} bold spans, {} failures",
            report.paragraphs,
            report.headings,
            report.bold_spans,
            report.failures.len()
        );
        report
    }

    fn transform<P: Paragraph>(&self, paragraph: &mut P) -> DomainResult<(bool, usize)> {
        let styled = self
            .heading
            .apply(paragraph)?
            .and_then(HeadingLevel::from_level)
            .is_some();
        let bold_spans = self.bold.apply(paragraph)?;
        debug!("heading: {}, bold spans: {}", styled, bold_spans);
        Ok((styled, bold_spans))
    }

    /// Separate pass: hierarchy of the document's list paragraphs.
    pub fn list_tree<D: Document>(&self, document: &D) -> ApplicationResult<ListTree<ListNode>> {
        Ok(self.list.build(document)?)
    }
}
