//! Positions, spans and contexts in an input text.
//!
//! All line and column numbers are 1-based.
//! Indices into the content are 0-based and count characters
//! (Unicode scalar values), not bytes.

use std::fmt;

/// A (line, column) position in an input text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextPosition {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
}

impl TextPosition {
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        TextPosition { line, column }
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.line, self.column)
    }
}

/// A run of characters in an input text: starting index and length.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextSpan {
    /// 0-based index of the first character.
    pub index: usize,
    /// Number of characters.
    pub length: usize,
}

impl TextSpan {
    #[inline]
    pub const fn new(index: usize, length: usize) -> Self {
        TextSpan { index, length }
    }

    /// Index one past the last character.
    #[inline]
    pub const fn end(&self) -> usize {
        self.index + self.length
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Convert to a `std::ops::Range`.
    #[inline]
    pub const fn to_range(&self) -> std::ops::Range<usize> {
        self.index..self.end()
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}+{}", self.index, self.length)
    }
}

/// The context of a position: the line it sits on, and a pointer line.
///
/// Given the line `public Struct Context` and a position on the second
/// word, the context is:
///
/// ```text
/// content = "public Struct Context"
/// pointer = "       ^"
/// ```
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct TextContext {
    /// The (trimmed) line content.
    pub content: String,
    /// Whitespace up to the position, then one caret per pointed character.
    pub pointer: String,
}

impl fmt::Display for TextContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.content)?;
        f.write_str(&self.pointer)
    }
}
