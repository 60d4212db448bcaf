//! Rebuild list hierarchy from a flat sequence of indented list paragraphs.

use std::fmt;

use generational_arena::Index;
use regex::Regex;
use tracing::{debug, instrument};

use crate::domain::boundary::compile;
use crate::domain::document::{Document, Paragraph};
use crate::domain::error::DomainResult;
use crate::domain::tree::ListTree;

/// One list paragraph. `position` is the paragraph index in the document,
/// which keeps items with equal text distinct under equality search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub position: usize,
    pub depth: usize,
    pub text: String,
}

/// Payload of a list tree: the synthetic root hosting all top-level items,
/// or an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListNode {
    Root,
    Item(ListItem),
}

impl fmt::Display for ListNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListNode::Root => write!(f, "."),
            ListNode::Item(item) => write!(f, "{}", item.text),
        }
    }
}

/// Builds a `ListTree<ListNode>` from a document.
#[derive(Debug, Clone)]
pub struct ListBuilder {
    indent_width: usize,
    item_regex: Regex,
}

impl ListBuilder {
    pub fn new(indent_width: usize) -> DomainResult<Self> {
        Ok(Self {
            indent_width: indent_width.max(1),
            item_regex: compile(r"^([ \t]*)(?:[*+-]|\d+[.)])\s+(.*)$")?,
        })
    }

    /// Indentation depth from leading whitespace; a tab is one full level.
    fn depth_of(&self, indent: &str) -> usize {
        let width: usize = indent
            .chars()
            .map(|c| if c == '\t' { self.indent_width } else { 1 })
            .sum();
        width / self.indent_width
    }

    /// Parse a paragraph as list item, `None` for non-list text.
    fn parse_item(
        &self,
        position: usize,
        text: &str,
        native_depth: Option<usize>,
    ) -> Option<ListItem> {
        let caps = self.item_regex.captures(text)?;
        let indent = caps.get(1).map_or("", |m| m.as_str());
        let content = caps.get(2).map_or("", |m| m.as_str());
        Some(ListItem {
            position,
            depth: native_depth.unwrap_or_else(|| self.depth_of(indent)),
            text: content.trim_end().to_string(),
        })
    }

    /// Each item's parent is the nearest preceding item with smaller depth;
    /// depth-0 items hang off the synthetic root.
    #[instrument(level = "debug", skip_all)]
    pub fn build<D: Document>(&self, document: &D) -> DomainResult<ListTree<ListNode>> {
        let mut tree = ListTree::new();
        let root = tree.insert_node(ListNode::Root, None)?;
        // open ancestors, shallowest first
        let mut stack: Vec<(usize, Index)> = Vec::new();

        for position in 0..document.len() {
            let Some(paragraph) = document.paragraph(position) else {
                continue;
            };
            let text = paragraph.text()?;
            let Some(item) = self.parse_item(position, &text, paragraph.indent_level()) else {
                debug!("paragraph {} is not a list item", position);
                continue;
            };

            while stack.last().is_some_and(|&(depth, _)| depth >= item.depth) {
                stack.pop();
            }
            let parent = stack.last().map_or(root, |&(_, idx)| idx);
            let depth = item.depth;
            let idx = tree.insert_node(ListNode::Item(item), Some(parent))?;
            stack.push((depth, idx));
        }
        Ok(tree)
    }

    /// Top-level items of a built tree, in document order.
    pub fn top_level(tree: &ListTree<ListNode>) -> Vec<&ListItem> {
        tree.root()
            .and_then(|root| tree.get_node(root))
            .map(|root| {
                root.children
                    .iter()
                    .filter_map(|&idx| tree.get_node(idx))
                    .filter_map(|node| match &node.data {
                        ListNode::Item(item) => Some(item),
                        ListNode::Root => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_of_spaces_and_tabs() {
        let builder = ListBuilder::new(2).unwrap();
        assert_eq!(builder.depth_of(""), 0);
        assert_eq!(builder.depth_of("  "), 1);
        assert_eq!(builder.depth_of("\t\t"), 2);
        assert_eq!(builder.depth_of("   "), 1);
    }

    #[test]
    fn test_parse_item_variants() {
        let builder = ListBuilder::new(2).unwrap();
        let item = builder.parse_item(3, "  - second  ", None).unwrap();
        assert_eq!(item, ListItem { position: 3, depth: 1, text: "second".into() });
        assert_eq!(builder.parse_item(0, "12. twelve", None).unwrap().text, "twelve");
        assert!(builder.parse_item(0, "plain paragraph", None).is_none());
        assert!(builder.parse_item(0, "**bold** start", None).is_none());
    }
}
