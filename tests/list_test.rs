//! Tests for building list hierarchies from indented paragraphs

use md2doc::domain::{ListBuilder, ListItem, ListNode, ListTree, TreeNodeConvert};
use md2doc::infrastructure::{MemoryDocument, MemoryParagraph};

fn texts(tree: &ListTree<ListNode>) -> Vec<String> {
    let mut seen = Vec::new();
    tree.traverse_breadth_first(|node| seen.push(node.to_string()));
    seen
}

fn children_of(tree: &ListTree<ListNode>, text: &str) -> Vec<String> {
    let idx = tree
        .iter()
        .find(|(_, node)| matches!(&node.data, ListNode::Item(item) if item.text == text))
        .map(|(idx, _)| idx)
        .unwrap();
    tree.get_node(idx)
        .unwrap()
        .children
        .iter()
        .map(|&c| tree.get_node(c).unwrap().data.to_string())
        .collect()
}

#[test]
fn given_multiple_top_level_items_when_building_then_hosted_by_synthetic_root() {
    let doc = MemoryDocument::from_text("* one\n* two\n* three");
    let tree = ListBuilder::new(2).unwrap().build(&doc).unwrap();

    let root = tree.get_node(tree.root().unwrap()).unwrap();
    assert_eq!(root.data, ListNode::Root);
    assert_eq!(root.children.len(), 3);
    let top_items = ListBuilder::top_level(&tree);
    let top: Vec<&str> = top_items
        .iter()
        .map(|item| item.text.as_str())
        .collect();
    assert_eq!(top, vec!["one", "two", "three"]);
}

#[test]
fn given_nested_items_when_building_then_parent_is_nearest_shallower_item() {
    let doc = MemoryDocument::from_text(
        "- fruit\n  - apple\n    - green\n  - pear\n- veg\n  - leek",
    );
    let tree = ListBuilder::new(2).unwrap().build(&doc).unwrap();

    assert_eq!(children_of(&tree, "fruit"), vec!["apple", "pear"]);
    assert_eq!(children_of(&tree, "apple"), vec!["green"]);
    assert_eq!(children_of(&tree, "veg"), vec!["leek"]);
    assert_eq!(tree.depth(), 4);
}

#[test]
fn given_non_list_paragraphs_when_building_then_they_are_skipped() {
    let doc = MemoryDocument::from_text("# Title\n\n* item\nsome prose\n  * child");
    let tree = ListBuilder::new(2).unwrap().build(&doc).unwrap();

    assert_eq!(texts(&tree), vec![".", "item", "child"]);
}

#[test]
fn given_depth_jump_when_building_then_attaches_to_nearest_shallower_item() {
    let doc = MemoryDocument::from_text("* top\n      * very deep\n  * normal");
    let tree = ListBuilder::new(2).unwrap().build(&doc).unwrap();

    assert_eq!(children_of(&tree, "top"), vec!["very deep", "normal"]);
}

#[test]
fn given_duplicate_item_text_when_building_then_items_stay_distinct() {
    let doc = MemoryDocument::from_text("* same\n  * same\n* same");
    let tree = ListBuilder::new(2).unwrap().build(&doc).unwrap();

    assert_eq!(tree.len(), 4);
    let nested = ListNode::Item(ListItem {
        position: 1,
        depth: 1,
        text: "same".to_string(),
    });
    assert!(tree.contains(&nested));
    assert_eq!(children_of(&tree, "same"), vec!["same"]);
}

#[test]
fn given_host_indent_levels_when_building_then_they_override_whitespace() {
    let mut doc = MemoryDocument::new();
    doc.push(MemoryParagraph::new("* a").with_indent_level(0));
    doc.push(MemoryParagraph::new("* b").with_indent_level(1));
    doc.push(MemoryParagraph::new("* c").with_indent_level(2));
    let tree = ListBuilder::new(2).unwrap().build(&doc).unwrap();

    assert_eq!(children_of(&tree, "a"), vec!["b"]);
    assert_eq!(children_of(&tree, "b"), vec!["c"]);
}

#[test]
fn given_ordered_and_tab_indented_items_when_building_then_nested() {
    let doc = MemoryDocument::from_text("1. first\n\t2) inner\n2. second");
    let tree = ListBuilder::new(4).unwrap().build(&doc).unwrap();

    assert_eq!(children_of(&tree, "first"), vec!["inner"]);
    assert_eq!(ListBuilder::top_level(&tree).len(), 2);
}

#[test]
fn given_list_when_pretty_printing_then_shows_nesting() {
    let doc = MemoryDocument::from_text("* a\n  * b\n* c");
    let tree = ListBuilder::new(2).unwrap().build(&doc).unwrap();

    let rendered = tree.to_tree_string().to_string();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], ".");
    assert!(lines[2].ends_with("b"));
}

#[test]
fn given_empty_document_when_building_then_only_synthetic_root() {
    let tree = ListBuilder::new(2).unwrap().build(&MemoryDocument::new()).unwrap();

    assert_eq!(tree.len(), 1);
    assert!(ListBuilder::top_level(&tree).is_empty());
}
