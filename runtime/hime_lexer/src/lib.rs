//! Lexer for Hime-generated parsers.
//!
//! The [`Lexer`] walks a compiled automaton over an input held entirely in
//! memory and appends what it recognizes to a [`TokenizedText`]. Parsers
//! pull tokens one at a time through [`TokenSource`].
//!
//! Lexical errors never stop lexing: the offending character is reported
//! and skipped.

mod lexer;
mod text;
mod tokenized;

pub use lexer::{ErrorHandler, Lexer, TokenSource};
pub use text::Text;
pub use tokenized::TokenizedText;
