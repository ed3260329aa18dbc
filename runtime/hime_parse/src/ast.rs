//! Flat storage for abstract syntax trees.
//!
//! An [`Ast`] stores nodes as [`AstCell`]s in a single array. It does not
//! borrow the tokenized text: the lexer is still appending to the text
//! while the parser builds the tree. Symbols and positions of token nodes
//! are resolved against the text afterwards, through an [`AstView`].

use std::fmt;

use hime_ir::{Lexeme, Symbol, SymbolRef, SymbolType, TextPosition, TextSpan};
use hime_lexer::TokenizedText;
use smallvec::SmallVec;
use tracing::debug;

/// Index of a node in an [`Ast`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// One stored node: its symbol and where its children are.
///
/// Children are `first..first + count`, in the node array (tree layout)
/// or in the adjacency array (graph layout).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct AstCell {
    pub symbol: SymbolRef,
    pub count: u32,
    pub first: u32,
}

impl AstCell {
    /// A node without children.
    #[inline]
    pub const fn new(symbol: SymbolRef) -> Self {
        AstCell {
            symbol,
            count: 0,
            first: 0,
        }
    }

    #[inline]
    pub const fn with_children(symbol: SymbolRef, count: u32, first: u32) -> Self {
        AstCell {
            symbol,
            count,
            first,
        }
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{AstCell, NodeId};
    hime_ir::static_assert_size!(AstCell, 12);
    hime_ir::static_assert_size!(NodeId, 4);
}

/// How children are reached from a node.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Layout {
    /// Children are a contiguous run in the node array.
    Tree,
    /// Children are a run of node ids in `adjacency`, so a node can be the
    /// child of several parents.
    Graph { adjacency: Vec<NodeId> },
}

/// The symbol of a node, resolved.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeSymbol {
    /// A token, with the text it matched.
    Token(Lexeme),
    Variable(Symbol),
    Virtual(Symbol),
}

impl NodeSymbol {
    /// The grammar symbol, for any kind of node.
    pub fn symbol(&self) -> Symbol {
        match self {
            NodeSymbol::Token(lexeme) => lexeme.symbol,
            NodeSymbol::Variable(symbol) | NodeSymbol::Virtual(symbol) => *symbol,
        }
    }
}

/// Tokens display their text, other symbols their name.
impl fmt::Display for NodeSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeSymbol::Token(lexeme) => lexeme.fmt(f),
            NodeSymbol::Variable(symbol) | NodeSymbol::Virtual(symbol) => symbol.fmt(f),
        }
    }
}

/// An abstract syntax tree under construction or finished.
///
/// `'s` is the lifetime of the parser's symbol tables.
#[derive(Clone, Debug)]
pub struct Ast<'s> {
    variables: &'s [Symbol],
    virtuals: &'s [Symbol],
    nodes: Vec<AstCell>,
    layout: Layout,
    root: Option<NodeId>,
}

impl<'s> Ast<'s> {
    fn with_layout(variables: &'s [Symbol], virtuals: &'s [Symbol], layout: Layout) -> Self {
        Ast {
            variables,
            virtuals,
            nodes: Vec::new(),
            layout,
            root: None,
        }
    }

    /// An AST whose children are stored as contiguous runs.
    pub fn tree(variables: &'s [Symbol], virtuals: &'s [Symbol]) -> Self {
        Self::with_layout(variables, virtuals, Layout::Tree)
    }

    /// An AST whose children are referenced through an adjacency array.
    pub fn graph(variables: &'s [Symbol], virtuals: &'s [Symbol]) -> Self {
        Self::with_layout(
            variables,
            virtuals,
            Layout::Graph {
                adjacency: Vec::new(),
            },
        )
    }

    #[inline]
    pub fn is_graph(&self) -> bool {
        matches!(self.layout, Layout::Graph { .. })
    }

    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    fn next_id(&self) -> NodeId {
        NodeId(self.nodes.len() as u32)
    }

    // === Storing ===

    /// Append already built nodes and return the id of the first one.
    pub fn store(&mut self, cells: &[AstCell]) -> NodeId {
        let first = self.next_id();
        self.nodes.extend_from_slice(cells);
        first
    }

    /// Store `cells` as the children of one parent, and return the `first`
    /// value the parent's cell must carry.
    pub fn store_children(&mut self, cells: &[AstCell]) -> u32 {
        if !self.is_graph() {
            return self.store(cells).raw();
        }
        let ids: SmallVec<[NodeId; 8]> = cells
            .iter()
            .map(|&cell| {
                let id = self.next_id();
                self.nodes.push(cell);
                id
            })
            .collect();
        self.store_adjacents(&ids)
    }

    /// Append the root node.
    pub fn store_root(&mut self, cell: AstCell) -> NodeId {
        let id = self.next_id();
        self.nodes.push(cell);
        self.root = Some(id);
        debug!(root = id.raw(), nodes = self.nodes.len(), "stored AST root");
        id
    }

    fn adjacency(&self) -> &[NodeId] {
        match &self.layout {
            Layout::Graph { adjacency } => adjacency,
            Layout::Tree => panic!("adjacency requires a graph-layout AST"),
        }
    }

    fn adjacency_mut(&mut self) -> &mut Vec<NodeId> {
        match &mut self.layout {
            Layout::Graph { adjacency } => adjacency,
            Layout::Tree => panic!("adjacency requires a graph-layout AST"),
        }
    }

    // === Graph layout ===
    // These panic on a tree-layout AST.

    /// Store a new childless node.
    pub fn store_symbol(&mut self, symbol: SymbolRef) -> NodeId {
        assert!(self.is_graph(), "store_symbol requires a graph-layout AST");
        let id = self.next_id();
        self.nodes.push(AstCell::new(symbol));
        id
    }

    /// Append adjacency entries and return the index of the first one.
    pub fn store_adjacents(&mut self, adjacents: &[NodeId]) -> u32 {
        let adjacency = self.adjacency_mut();
        let first = adjacency.len() as u32;
        adjacency.extend_from_slice(adjacents);
        first
    }

    /// Copy a node, sharing its children with the original.
    ///
    /// The copy gets its own adjacency entries, so the two can diverge
    /// later, but they point at the same child nodes.
    pub fn copy_node(&mut self, node: NodeId) -> NodeId {
        let origin = self.nodes[node.index()];
        let adjacency = self.adjacency_mut();
        let mut clone = AstCell::new(origin.symbol);
        if origin.count != 0 {
            let start = origin.first as usize;
            clone.first = adjacency.len() as u32;
            clone.count = origin.count;
            adjacency.extend_from_within(start..start + origin.count as usize);
        }
        let id = self.next_id();
        self.nodes.push(clone);
        id
    }

    /// Append the children of `node` to `buffer`; returns how many.
    pub fn adjacency_into(&self, node: NodeId, buffer: &mut Vec<NodeId>) -> usize {
        let cell = self.nodes[node.index()];
        let start = cell.first as usize;
        let count = cell.count as usize;
        buffer.extend_from_slice(&self.adjacency()[start..start + count]);
        count
    }

    /// Replace the children of a graph node with a new run of adjacents.
    pub fn set_adjacents(&mut self, node: NodeId, adjacents: &[NodeId]) {
        let first = self.store_adjacents(adjacents);
        let cell = &mut self.nodes[node.index()];
        cell.first = first;
        cell.count = adjacents.len() as u32;
    }

    // === Reading ===

    /// # Panics
    /// Panics if `node` was not stored in this AST.
    #[inline]
    pub fn cell(&self, node: NodeId) -> AstCell {
        self.nodes[node.index()]
    }

    #[inline]
    pub fn symbol_ref(&self, node: NodeId) -> SymbolRef {
        self.cell(node).symbol
    }

    #[inline]
    pub fn child_count(&self, node: NodeId) -> usize {
        self.cell(node).count as usize
    }

    /// The `i`-th child of `parent`.
    ///
    /// # Panics
    /// Panics if `i` is not below the child count of `parent`.
    pub fn child(&self, parent: NodeId, i: usize) -> NodeId {
        let cell = self.cell(parent);
        assert!(
            i < cell.count as usize,
            "child {i} of node {} which has {} children",
            parent.raw(),
            cell.count
        );
        let slot = cell.first as usize + i;
        match &self.layout {
            Layout::Tree => NodeId(slot as u32),
            Layout::Graph { adjacency } => adjacency[slot],
        }
    }

    /// Resolve the symbol of `node`; `None` for a node without symbol.
    pub fn symbol(&self, text: &TokenizedText<'_>, node: NodeId) -> Option<NodeSymbol> {
        let symbol = self.symbol_ref(node);
        match symbol.kind() {
            SymbolType::None => None,
            SymbolType::Token => Some(NodeSymbol::Token(text.at(symbol.index()))),
            SymbolType::Variable => Some(NodeSymbol::Variable(self.variables[symbol.index()])),
            SymbolType::Virtual => Some(NodeSymbol::Virtual(self.virtuals[symbol.index()])),
        }
    }

    /// Position of a token node; `None` for other nodes.
    pub fn position(&self, text: &TokenizedText<'_>, node: NodeId) -> Option<TextPosition> {
        let symbol = self.symbol_ref(node);
        (symbol.kind() == SymbolType::Token).then(|| text.position(symbol.index()))
    }

    /// Span of a token node; `None` for other nodes.
    pub fn span(&self, text: &TokenizedText<'_>, node: NodeId) -> Option<TextSpan> {
        let symbol = self.symbol_ref(node);
        (symbol.kind() == SymbolType::Token).then(|| text.span(symbol.index()))
    }

    /// Navigate this AST with symbols resolved against `text`.
    pub fn view<'a>(&'a self, text: &'a TokenizedText<'s>) -> AstView<'a, 's> {
        AstView { ast: self, text }
    }
}

/// An [`Ast`] together with the text its token nodes refer to.
#[derive(Copy, Clone)]
pub struct AstView<'a, 's> {
    ast: &'a Ast<'s>,
    text: &'a TokenizedText<'s>,
}

impl<'a, 's> AstView<'a, 's> {
    #[inline]
    pub fn ast(&self) -> &'a Ast<'s> {
        self.ast
    }

    #[inline]
    pub fn text(&self) -> &'a TokenizedText<'s> {
        self.text
    }

    pub fn root(&self) -> Option<AstNode<'a, 's>> {
        self.ast.root().map(|id| self.node(id))
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> AstNode<'a, 's> {
        AstNode { view: *self, id }
    }
}

impl fmt::Debug for AstView<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AstView")
            .field("nodes", &self.ast.node_count())
            .field("root", &self.ast.root())
            .finish_non_exhaustive()
    }
}

/// A node of an AST.
#[derive(Copy, Clone)]
pub struct AstNode<'a, 's> {
    view: AstView<'a, 's>,
    id: NodeId,
}

impl<'a, 's> AstNode<'a, 's> {
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn symbol(&self) -> Option<NodeSymbol> {
        self.view.ast.symbol(self.view.text, self.id)
    }

    /// Position in the input, for token nodes.
    pub fn position(&self) -> Option<TextPosition> {
        self.view.ast.position(self.view.text, self.id)
    }

    /// Span in the input, for token nodes.
    pub fn span(&self) -> Option<TextSpan> {
        self.view.ast.span(self.view.text, self.id)
    }

    #[inline]
    pub fn child_count(&self) -> usize {
        self.view.ast.child_count(self.id)
    }

    /// # Panics
    /// Panics if `i` is not below [`child_count`](Self::child_count).
    pub fn child(&self, i: usize) -> AstNode<'a, 's> {
        self.view.node(self.view.ast.child(self.id, i))
    }

    pub fn children(&self) -> Children<'a, 's> {
        Children {
            parent: *self,
            range: 0..self.child_count(),
        }
    }
}

impl PartialEq for AstNode<'_, '_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.view.ast, other.view.ast) && self.id == other.id
    }
}

impl Eq for AstNode<'_, '_> {}

impl fmt::Debug for AstNode<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AstNode({}, {:?})", self.id.raw(), self.view.ast.symbol_ref(self.id))
    }
}

/// Displays the resolved symbol, or nothing for a node without one.
impl fmt::Display for AstNode<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Some(symbol) => symbol.fmt(f),
            None => Ok(()),
        }
    }
}

/// Iterator over the children of a node.
#[derive(Clone)]
pub struct Children<'a, 's> {
    parent: AstNode<'a, 's>,
    range: std::ops::Range<usize>,
}

impl<'a, 's> Iterator for Children<'a, 's> {
    type Item = AstNode<'a, 's>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.range.next().map(|i| self.parent.child(i))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl DoubleEndedIterator for Children<'_, '_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.range.next_back().map(|i| self.parent.child(i))
    }
}

impl ExactSizeIterator for Children<'_, '_> {}
