//! Domain layer: markup detection, paragraph transforms and list trees
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod bold;
pub mod boundary;
pub mod document;
pub mod error;
pub mod heading;
pub mod list;
pub mod tree;

pub use bold::BoldTransform;
pub use boundary::{find_next, scan_all, Boundary};
pub use document::{Document, HeadingLevel, Paragraph};
pub use error::{DomainError, DomainResult};
pub use heading::HeadingTransform;
pub use list::{ListBuilder, ListItem, ListNode};
pub use tree::{ListTree, TraversalOrder, TreeNode, TreeNodeConvert};
