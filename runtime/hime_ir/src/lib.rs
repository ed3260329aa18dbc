//! Hime IR - shared runtime vocabulary
//!
//! This crate contains the plain value types every other runtime crate
//! speaks:
//! - Grammar symbols (`Symbol`) and the well-known terminal constants
//! - Packed symbol references (`SymbolRef`) used by AST nodes
//! - Tokens as handed from the lexer to a parser
//! - Text positions, spans and contexts
//!
//! # Design Philosophy
//!
//! - **Pack Everything**: a node's symbol is one `u32`, not an enum with a payload
//! - **Index, Don't Point**: tokens and nodes refer to tables by index
//! - **Tables Are Static**: symbol names come from generated code (`&'static str`)

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod symbol;
mod symbol_ref;
mod text;
mod token;

pub use symbol::{
    Lexeme, Symbol, SID_DOLLAR, SID_EPSILON, TERMINAL_DOLLAR, TERMINAL_EPSILON,
};
pub use symbol_ref::{SymbolRef, SymbolRefError, SymbolType};
pub use text::{TextContext, TextPosition, TextSpan};
pub use token::Token;
