//! Application layer: orchestration over the domain transforms

pub mod converter;
pub mod error;

pub use converter::{ConversionReport, Converter, ParagraphFailure};
pub use error::{ApplicationError, ApplicationResult};
