//! Staging buffer for the nodes of a reduction.
//!
//! A [`SubTree`] holds nodes in pre-order: each node is followed by its
//! children, each child by its own children, and so on. A node's child
//! count is the number of child blocks following it. Nothing is stored in
//! the AST until the sub-tree is committed.

use hime_ir::SymbolRef;
use smallvec::{smallvec, SmallVec};
use tracing::debug;

use crate::ast::{Ast, AstCell, NodeId};

/// What happens to a staged node when its parent is committed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum TreeAction {
    /// The node becomes one child of its parent.
    #[default]
    Insert,
    /// The node is dropped and its children become children of its parent.
    Replace,
}

/// Cells adopted by a parent when a block is lowered.
type Adopted = SmallVec<[AstCell; 8]>;

/// Nodes of one reduction, with the action pending on each.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubTree {
    nodes: Vec<AstCell>,
    actions: Vec<TreeAction>,
}

impl SubTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        SubTree {
            nodes: Vec::with_capacity(capacity),
            actions: Vec::with_capacity(capacity),
        }
    }

    /// Stage a node without children; returns its index.
    pub fn push(&mut self, symbol: SymbolRef, action: TreeAction) -> usize {
        self.nodes.push(AstCell::new(symbol));
        self.actions.push(action);
        self.nodes.len() - 1
    }

    /// Stage a copy of every node of `other`, as one more child block.
    ///
    /// The parent's child count is not updated.
    pub fn append(&mut self, other: &SubTree) {
        self.nodes.extend_from_slice(&other.nodes);
        self.actions.extend_from_slice(&other.actions);
    }

    /// Number of staged nodes in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.actions.clear();
    }

    #[inline]
    pub fn label_at(&self, index: usize) -> SymbolRef {
        self.nodes[index].symbol
    }

    #[inline]
    pub fn action_at(&self, index: usize) -> TreeAction {
        self.actions[index]
    }

    #[inline]
    pub fn set_action_at(&mut self, index: usize, action: TreeAction) {
        self.actions[index] = action;
    }

    #[inline]
    pub fn child_count_at(&self, index: usize) -> usize {
        self.nodes[index].count as usize
    }

    #[inline]
    pub fn set_child_count_at(&mut self, index: usize, count: usize) {
        self.nodes[index].count = count as u32;
    }

    /// Number of nodes this sub-tree contributes over its top two levels.
    ///
    /// With an inserted root, that is the root and its children. With a
    /// replaced root, the root itself disappears and each child block
    /// counts its head and its children.
    ///
    /// # Panics
    /// Panics if the sub-tree is empty.
    pub fn size(&self) -> usize {
        let root = self.nodes[0];
        if self.actions[0] != TreeAction::Replace {
            return root.count as usize + 1;
        }
        let mut size = 0;
        let mut cursor = 1;
        for _ in 0..root.count {
            let block = self.nodes[cursor].count as usize + 1;
            size += block;
            cursor += block;
        }
        size
    }

    /// Store the block at `index` bottom-up and return what its parent
    /// adopts, plus the index following the block.
    fn lower(&self, index: usize, ast: &mut Ast<'_>) -> (Adopted, usize) {
        let mut children = Adopted::new();
        let mut cursor = index + 1;
        for _ in 0..self.nodes[index].count {
            let (adopted, next) = self.lower(cursor, ast);
            children.extend(adopted);
            cursor = next;
        }

        let adopted = match self.actions[index] {
            TreeAction::Replace => children,
            TreeAction::Insert => {
                let mut cell = AstCell::new(self.nodes[index].symbol);
                if !children.is_empty() {
                    cell.count = children.len() as u32;
                    cell.first = ast.store_children(&children);
                }
                smallvec![cell]
            }
        };
        (adopted, cursor)
    }

    /// Store every staged descendant of the root in `ast` and return the
    /// cells the enclosing parent adopts.
    ///
    /// That is the root cell, pointing at its stored children, or for a
    /// replaced root, the cells of its children.
    ///
    /// # Panics
    /// Panics if the sub-tree is empty.
    pub fn commit_into(&self, ast: &mut Ast<'_>) -> SmallVec<[AstCell; 8]> {
        assert!(!self.is_empty(), "cannot commit an empty sub-tree");
        let (adopted, end) = self.lower(0, ast);
        debug!(staged = end, adopted = adopted.len(), "committed sub-tree");
        adopted
    }

    /// Commit this sub-tree as the whole AST and return the root.
    ///
    /// # Panics
    /// Panics if the sub-tree is empty or its root is replaced.
    pub fn commit(self, ast: &mut Ast<'_>) -> NodeId {
        assert!(
            self.actions.first() == Some(&TreeAction::Insert),
            "the root of an AST must be an inserted node"
        );
        let adopted = self.commit_into(ast);
        ast.store_root(adopted[0])
    }
}

#[cfg(test)]
mod tests;
