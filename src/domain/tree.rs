use std::collections::VecDeque;
use std::fmt;

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode<T> {
    /// Payload, compared by equality for search and removal
    pub data: T,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in insertion order
    pub children: Vec<Index>,
}

/// Depth-first visiting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    Pre,
    Post,
}

/// Arena-backed N-ary tree with at most one root.
///
/// Nodes are identified by data equality. When several nodes carry equal
/// data, search and removal resolve to the first one in breadth-first order.
#[derive(Debug)]
pub struct ListTree<T> {
    arena: Arena<TreeNode<T>>,
    root: Option<Index>,
}

impl<T> Default for ListTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListTree<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode<T>> {
        self.arena.get(idx)
    }

    /// Attach `data` under the node at `parent`, or make it the root.
    ///
    /// Fails with `RootAlreadySet` when no parent is given and a root exists,
    /// and with `ParentNotFound` for a stale parent index.
    #[instrument(level = "trace", skip(self, data))]
    pub fn insert_node(&mut self, data: T, parent: Option<Index>) -> DomainResult<Index> {
        match parent {
            None if self.root.is_some() => Err(DomainError::RootAlreadySet),
            None => {
                let idx = self.arena.insert(TreeNode {
                    data,
                    parent: None,
                    children: Vec::new(),
                });
                self.root = Some(idx);
                Ok(idx)
            }
            Some(parent_idx) => {
                if !self.arena.contains(parent_idx) {
                    return Err(DomainError::ParentNotFound(format!("{:?}", parent_idx)));
                }
                let idx = self.arena.insert(TreeNode {
                    data,
                    parent: Some(parent_idx),
                    children: Vec::new(),
                });
                if let Some(parent) = self.arena.get_mut(parent_idx) {
                    parent.children.push(idx);
                }
                Ok(idx)
            }
        }
    }

    /// Pre-order depth-first iterator.
    pub fn iter(&self) -> TreeIterator<'_, T> {
        TreeIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_, T> {
        PostOrderIterator::new(self)
    }

    /// Level by level, left to right within a level.
    pub fn iter_breadth_first(&self) -> BreadthFirstIterator<'_, T> {
        BreadthFirstIterator::new(self)
    }

    pub fn traverse_depth_first<F>(&self, order: TraversalOrder, mut visit: F)
    where
        F: FnMut(&T),
    {
        match order {
            TraversalOrder::Pre => self.iter().for_each(|(_, node)| visit(&node.data)),
            TraversalOrder::Post => self.iter_postorder().for_each(|(_, node)| visit(&node.data)),
        }
    }

    pub fn traverse_breadth_first<F>(&self, mut visit: F)
    where
        F: FnMut(&T),
    {
        self.iter_breadth_first().for_each(|(_, node)| visit(&node.data));
    }

    /// Number of levels; 0 for an empty tree.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut queue = VecDeque::new();
        if let Some(root) = self.root {
            queue.push_back((root, 1));
        }

        while let Some((idx, depth)) = queue.pop_front() {
            max_depth = max_depth.max(depth);
            if let Some(node) = self.arena.get(idx) {
                for &child in &node.children {
                    queue.push_back((child, depth + 1));
                }
            }
        }
        max_depth
    }

    /// Data of all nodes without children, left to right.
    pub fn leaf_nodes(&self) -> Vec<&T> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(_, node)| &node.data)
            .collect()
    }

    /// Detach the subtree at `idx` and drop all of its nodes from the arena.
    fn remove_subtree(&mut self, idx: Index) {
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.arena.remove(current) {
                stack.extend(node.children);
            }
        }
    }
}

impl<T: PartialEq> ListTree<T> {
    /// First node carrying `data` in breadth-first order.
    pub fn find_index(&self, data: &T) -> Option<Index> {
        self.iter_breadth_first()
            .find(|(_, node)| node.data == *data)
            .map(|(idx, _)| idx)
    }

    pub fn find(&self, data: &T) -> Option<&TreeNode<T>> {
        self.find_index(data).and_then(|idx| self.arena.get(idx))
    }

    pub fn contains(&self, data: &T) -> bool {
        self.find_index(data).is_some()
    }

    /// Insert `data` as last child of the first node equal to `parent`,
    /// or as root when `parent` is `None`.
    pub fn insert(&mut self, data: T, parent: Option<&T>) -> DomainResult<Index>
    where
        T: fmt::Debug,
    {
        match parent {
            None => self.insert_node(data, None),
            Some(parent_data) => {
                let parent_idx = self
                    .find_index(parent_data)
                    .ok_or_else(|| DomainError::ParentNotFound(format!("{:?}", parent_data)))?;
                self.insert_node(data, Some(parent_idx))
            }
        }
    }

    /// Remove the first node equal to `data` together with its subtree.
    ///
    /// Removing the root clears the tree; unknown data is a no-op.
    #[instrument(level = "debug", skip_all)]
    pub fn remove(&mut self, data: &T) {
        let Some(idx) = self.find_index(data) else {
            return;
        };
        if Some(idx) == self.root {
            debug!("removing root, clearing tree");
            self.arena.clear();
            self.root = None;
            return;
        }

        let parent_idx = self.arena.get(idx).and_then(|node| node.parent);
        if let Some(parent) = parent_idx.and_then(|p| self.arena.get_mut(p)) {
            parent.children.retain(|&child| child != idx);
        }
        self.remove_subtree(idx);
    }
}

pub struct TreeIterator<'a, T> {
    tree: &'a ListTree<T>,
    stack: Vec<Index>,
}

impl<'a, T> TreeIterator<'a, T> {
    fn new(tree: &'a ListTree<T>) -> Self {
        Self {
            tree,
            stack: tree.root().into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for TreeIterator<'a, T> {
    type Item = (Index, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children.iter().rev());
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a, T> {
    tree: &'a ListTree<T>,
    stack: Vec<(Index, bool)>,
}

impl<'a, T> PostOrderIterator<'a, T> {
    fn new(tree: &'a ListTree<T>) -> Self {
        Self {
            tree,
            stack: tree.root().map(|root| (root, false)).into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for PostOrderIterator<'a, T> {
    type Item = (Index, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                if visited {
                    return Some((current_idx, node));
                }
                self.stack.push((current_idx, true));
                for &child in node.children.iter().rev() {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}

pub struct BreadthFirstIterator<'a, T> {
    tree: &'a ListTree<T>,
    queue: VecDeque<Index>,
}

impl<'a, T> BreadthFirstIterator<'a, T> {
    fn new(tree: &'a ListTree<T>) -> Self {
        Self {
            tree,
            queue: tree.root().into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for BreadthFirstIterator<'a, T> {
    type Item = (Index, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.queue.pop_front() {
            if let Some(node) = self.tree.get_node(current_idx) {
                self.queue.extend(node.children.iter().copied());
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<T: fmt::Display> TreeNodeConvert for ListTree<T> {
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree<T: fmt::Display>(tree: &ListTree<T>, node_idx: Index) -> Tree<String> {
            match tree.get_node(node_idx) {
                Some(node) => Tree::new(node.data.to_string()).with_leaves(
                    node.children
                        .iter()
                        .map(|&child_idx| build_tree(tree, child_idx)),
                ),
                None => Tree::new(String::new()),
            }
        }

        match self.root {
            Some(root_idx) => build_tree(self, root_idx),
            None => Tree::new("Empty tree".to_string()),
        }
    }
}
