//! The automaton-driven lexer.

use hime_diagnostic::ParseError;
use hime_ir::{Symbol, TextSpan, Token, TERMINAL_DOLLAR};
use hime_lexer_core::{run_dfa, Automaton};
use tracing::{debug, trace};

use crate::text::Text;
use crate::tokenized::TokenizedText;

/// Receives lexical errors as they are found.
pub type ErrorHandler<'a> = Box<dyn FnMut(ParseError) + 'a>;

/// A producer of tokens, pulled one at a time.
pub trait TokenSource {
    /// The next token. Once the input is exhausted, returns
    /// [`Token::EPSILON`] forever.
    fn next_token(&mut self) -> Token;
}

/// Lexer over an input held in memory.
///
/// Tokens of the separator terminal are matched but never emitted. On a
/// character that starts no token, the error is reported and the character
/// skipped, so lexing always runs to the end of the input. Errors go to
/// the registered handler, or are kept until [`Lexer::take_errors`].
pub struct Lexer<'a> {
    automaton: Automaton,
    /// Symbol ID of the separator terminal.
    separator: u32,
    output: TokenizedText<'a>,
    /// Index of the next character to match.
    input_index: usize,
    /// Set once the end-of-input token has been emitted.
    finished: bool,
    handler: Option<ErrorHandler<'a>>,
    errors: Vec<ParseError>,
}

impl<'a> Lexer<'a> {
    /// `terminals` must start with the ε and `$` terminals, in that order.
    ///
    /// # Panics
    /// Panics if `terminals` is missing the `$` terminal.
    pub fn new(
        automaton: Automaton,
        terminals: &'a [Symbol],
        separator: u32,
        input: &str,
    ) -> Self {
        assert!(
            terminals.len() > TERMINAL_DOLLAR as usize,
            "terminal table must start with epsilon and dollar"
        );
        Lexer {
            automaton,
            separator,
            output: TokenizedText::new(Text::new(input), terminals),
            input_index: 0,
            finished: false,
            handler: None,
            errors: Vec::new(),
        }
    }

    #[inline]
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    #[inline]
    pub fn terminals(&self) -> &'a [Symbol] {
        self.output.terminals()
    }

    /// The tokens found so far.
    #[inline]
    pub fn output(&self) -> &TokenizedText<'a> {
        &self.output
    }

    pub fn into_output(self) -> TokenizedText<'a> {
        self.output
    }

    /// Send subsequent lexical errors to `handler` instead of collecting them.
    pub fn register_error_handler(&mut self, handler: impl FnMut(ParseError) + 'a) {
        self.handler = Some(Box::new(handler));
    }

    /// Errors collected while no handler was registered.
    pub fn take_errors(&mut self) -> Vec<ParseError> {
        std::mem::take(&mut self.errors)
    }

    /// Lex the rest of the input at once.
    pub fn tokenize(&mut self) -> &TokenizedText<'a> {
        while !self.finished {
            self.next_token();
        }
        &self.output
    }

    fn report(&mut self, error: ParseError) {
        debug!(%error, "lexical error");
        match &mut self.handler {
            Some(handler) => handler(error),
            None => self.errors.push(error),
        }
    }

    /// The next token, skipping separators and bad characters.
    ///
    /// Ends with one token of the `$` terminal spanning zero characters at
    /// the end of the input, then [`Token::EPSILON`] forever.
    pub fn next_token(&mut self) -> Token {
        if self.finished {
            return Token::EPSILON;
        }
        loop {
            let size = self.output.size();
            if self.input_index >= size {
                let index = self
                    .output
                    .push(TERMINAL_DOLLAR, TextSpan::new(size, 0));
                self.finished = true;
                debug!(tokens = index + 1, "end of input");
                return self.output.token(index as usize);
            }

            let start = self.input_index;
            match run_dfa(&self.automaton, self.output.text().as_chars(), start) {
                Some(found) => {
                    self.input_index += found.length;
                    let symbol = self.output.terminals()[found.terminal as usize];
                    if symbol.id == self.separator {
                        continue;
                    }
                    let index = self
                        .output
                        .push(found.terminal, TextSpan::new(start, found.length));
                    trace!(terminal = symbol.name, start, length = found.length, "token");
                    return Token::new(symbol.id, index);
                }
                None => {
                    let character = self.output.char_at(start);
                    let position = self.output.position_at(start);
                    self.report(ParseError::unexpected_char(character, position));
                    self.input_index += 1;
                }
            }
        }
    }
}

impl TokenSource for Lexer<'_> {
    #[inline]
    fn next_token(&mut self) -> Token {
        Lexer::next_token(self)
    }
}

/// Yields every token up to and including the end-of-input token.
impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            None
        } else {
            Some(self.next_token())
        }
    }
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("separator", &self.separator)
            .field("input_index", &self.input_index)
            .field("tokens", &self.output.token_count())
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
