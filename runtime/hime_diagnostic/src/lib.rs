//! Error values reported while lexing and parsing.
//!
//! Errors here are data, not failures: the lexer recovers from every bad
//! character and the parser from every unexpected token. Each error is
//! handed to a handler as it happens and ends up in the parse result.
//!
//! Codes follow the phase convention:
//! - E0xxx: lexical errors
//! - E1xxx: syntactic errors

mod error;

pub use error::{ParseError, ParseErrorKind};
