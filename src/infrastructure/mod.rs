//! Infrastructure layer: host document implementation and file I/O

pub mod error;
pub mod memory;

pub use error::{InfraError, InfraResult};
pub use memory::{MemoryDocument, MemoryParagraph, TextRun};
