//! Convert a small Markdown subset embedded in document paragraphs into
//! rich-text structure: heading levels, bold spans and nested lists.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::{ConversionReport, Converter};
pub use domain::{Document, Paragraph};
pub use infrastructure::MemoryDocument;

/// Convert `document` in place with default settings.
pub fn convert<D: Document>(
    document: &mut D,
) -> application::ApplicationResult<ConversionReport> {
    let converter = Converter::from_settings(&config::Settings::default())?;
    Ok(converter.convert(document))
}
