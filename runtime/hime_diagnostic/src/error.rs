use std::fmt;

use hime_ir::{Symbol, TextPosition};

/// The kind of a parse error.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParseErrorKind {
    /// A character matched no lexer transition.
    UnexpectedChar,
    /// A token the parser could not accept.
    UnexpectedToken,
}

impl ParseErrorKind {
    /// Searchable error code.
    pub const fn code(self) -> &'static str {
        match self {
            ParseErrorKind::UnexpectedChar => "E0001",
            ParseErrorKind::UnexpectedToken => "E1001",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An error found in the input.
///
/// The `Display` form is the user-facing message, prefixed with the
/// position it refers to.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
pub enum ParseError {
    #[error("@{position} Unexpected character '{character}' (U+{:04X})", code_point(.character))]
    UnexpectedChar {
        character: char,
        position: TextPosition,
    },
    #[error("@{position} Unexpected token \"{value}\"{}", ExpectedList(.expected))]
    UnexpectedToken {
        /// Text of the offending token.
        value: String,
        position: TextPosition,
        /// Terminals that would have been accepted, in table order.
        expected: Vec<Symbol>,
    },
}

impl ParseError {
    pub fn unexpected_char(character: char, position: TextPosition) -> Self {
        ParseError::UnexpectedChar {
            character,
            position,
        }
    }

    pub fn unexpected_token(
        value: impl Into<String>,
        position: TextPosition,
        expected: Vec<Symbol>,
    ) -> Self {
        ParseError::UnexpectedToken {
            value: value.into(),
            position,
            expected,
        }
    }

    pub fn kind(&self) -> ParseErrorKind {
        match self {
            ParseError::UnexpectedChar { .. } => ParseErrorKind::UnexpectedChar,
            ParseError::UnexpectedToken { .. } => ParseErrorKind::UnexpectedToken,
        }
    }

    /// Where in the input the error occurred.
    pub fn position(&self) -> TextPosition {
        match self {
            ParseError::UnexpectedChar { position, .. }
            | ParseError::UnexpectedToken { position, .. } => *position,
        }
    }
}

fn code_point(c: &char) -> u32 {
    u32::from(*c)
}

/// Renders `; expected: a, b` or nothing when the list is empty.
struct ExpectedList<'a>(&'a [Symbol]);

impl fmt::Display for ExpectedList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, symbol) in self.0.iter().enumerate() {
            f.write_str(if i == 0 { "; expected: " } else { ", " })?;
            f.write_str(symbol.name)?;
        }
        Ok(())
    }
}
