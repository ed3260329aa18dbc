//! The lexer's output: the input text plus one cell per emitted token.

use hime_ir::{Lexeme, Symbol, TextContext, TextPosition, TextSpan, Token};

use crate::text::Text;

/// Metadata of one token: which terminal, and where in the text.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
struct TokenCell {
    /// Index into the terminal table.
    terminal: u16,
    span: TextSpan,
}

/// A text together with the tokens found in it.
///
/// Tokens are only ever appended, by the lexer that owns this text.
#[derive(Debug, Clone)]
pub struct TokenizedText<'a> {
    text: Text,
    terminals: &'a [Symbol],
    cells: Vec<TokenCell>,
}

impl<'a> TokenizedText<'a> {
    pub fn new(text: Text, terminals: &'a [Symbol]) -> Self {
        TokenizedText {
            text,
            terminals,
            cells: Vec::new(),
        }
    }

    /// Append a token and return its index.
    pub(crate) fn push(&mut self, terminal: u16, span: TextSpan) -> u32 {
        let index = self.cells.len() as u32;
        self.cells.push(TokenCell { terminal, span });
        index
    }

    #[inline]
    pub fn text(&self) -> &Text {
        &self.text
    }

    #[inline]
    pub fn terminals(&self) -> &'a [Symbol] {
        self.terminals
    }

    // Text delegation methods

    #[inline]
    pub fn size(&self) -> usize {
        self.text.size()
    }

    #[inline]
    pub fn is_end(&self, index: usize) -> bool {
        self.text.is_end(index)
    }

    #[inline]
    pub fn char_at(&self, index: usize) -> char {
        self.text.char_at(index)
    }

    #[inline]
    pub fn value(&self, index: usize, length: usize) -> String {
        self.text.value(index, length)
    }

    #[inline]
    pub fn value_for(&self, span: TextSpan) -> String {
        self.text.value_for(span)
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.text.line_count()
    }

    #[inline]
    pub fn line_index(&self, line: usize) -> usize {
        self.text.line_index(line)
    }

    #[inline]
    pub fn line_length(&self, line: usize) -> usize {
        self.text.line_length(line)
    }

    #[inline]
    pub fn line_content(&self, line: usize) -> String {
        self.text.line_content(line)
    }

    #[inline]
    pub fn position_at(&self, index: usize) -> TextPosition {
        self.text.position_at(index)
    }

    #[inline]
    pub fn context_at(&self, position: TextPosition) -> TextContext {
        self.text.context_at(position)
    }

    #[inline]
    pub fn context_for(&self, position: TextPosition, length: usize) -> TextContext {
        self.text.context_for(position, length)
    }

    #[inline]
    pub fn context_of(&self, span: TextSpan) -> TextContext {
        self.text.context_of(span)
    }

    // Token queries. All panic on an index >= token_count().

    /// Number of tokens so far, including the end-of-input token once
    /// it has been emitted.
    #[inline]
    pub fn token_count(&self) -> usize {
        self.cells.len()
    }

    /// The terminal the token at `index` matched.
    pub fn terminal(&self, index: usize) -> Symbol {
        self.terminals[self.cells[index].terminal as usize]
    }

    /// The token at `index`, as a parser sees it.
    pub fn token(&self, index: usize) -> Token {
        Token::new(self.terminal(index).id, index as u32)
    }

    /// The token at `index` with its text.
    pub fn at(&self, index: usize) -> Lexeme {
        Lexeme::new(self.terminal(index), self.text.value_for(self.span(index)))
    }

    #[inline]
    pub fn span(&self, index: usize) -> TextSpan {
        self.cells[index].span
    }

    /// Position of the first character of the token at `index`.
    pub fn position(&self, index: usize) -> TextPosition {
        self.text.position_at(self.cells[index].span.index)
    }

    /// Context pointing at the whole token at `index`.
    pub fn context_of_token(&self, index: usize) -> TextContext {
        self.text.context_of(self.cells[index].span)
    }

    /// All tokens so far, in order.
    pub fn tokens(&self) -> impl ExactSizeIterator<Item = Token> + '_ {
        (0..self.cells.len()).map(|index| self.token(index))
    }
}
