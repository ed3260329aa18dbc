//! Parser-side runtime for Hime-generated parsers.
//!
//! Generated parsers decide what to shift and reduce; this crate gives
//! them the pieces around that decision:
//! - [`RewindableTokenStream`]: lookahead and backtracking over lexer output
//! - [`SubTree`]: the nodes of one reduction, staged before they are stored
//! - [`Ast`]: flat storage for the finished tree, as a tree or as a graph
//! - [`ParseResult`]: the errors, the tokenized input and the AST
//!
//! # Node Storage
//!
//! Nodes are [`AstCell`]s in one array, addressed by [`NodeId`]. A node's
//! children are the range `first..first + count`, either directly in the
//! node array (tree layout) or in an adjacency array of node ids (graph
//! layout, where subtrees can be shared).

mod ast;
mod result;
mod stream;
mod subtree;

pub use ast::{Ast, AstCell, AstNode, AstView, Children, NodeId, NodeSymbol};
pub use result::ParseResult;
pub use stream::{RewindableTokenStream, RING_SIZE};
pub use subtree::{SubTree, TreeAction};
