//! Tokens handed from a lexer to a parser.

use std::fmt;

use crate::SID_EPSILON;

/// A token as an output element of a lexer.
///
/// Layout: 8 bytes. The token does not carry its text; `index` locates
/// it in the lexer's tokenized text.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// ID of the terminal symbol this token matched.
    pub terminal_id: u32,
    /// Index of the token in the tokenized text.
    pub index: u32,
}

impl Token {
    /// Returned by an exhausted lexer.
    pub const EPSILON: Token = Token {
        terminal_id: SID_EPSILON,
        index: 0,
    };

    #[inline]
    pub const fn new(terminal_id: u32, index: u32) -> Self {
        Token { terminal_id, index }
    }
}

impl Default for Token {
    fn default() -> Self {
        Token::EPSILON
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token(sid={}, #{})", self.terminal_id, self.index)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Token;
    crate::static_assert_size!(Token, 8);
}
