//! Outcome of a parse.

use hime_diagnostic::ParseError;
use hime_lexer::TokenizedText;

use crate::ast::{Ast, AstNode, AstView};

/// What a parser produced: its errors, its input and, on success, an AST.
///
/// Success means an AST was produced. A successful parse may still carry
/// errors the parser recovered from.
#[derive(Debug, Clone)]
pub struct ParseResult<'s> {
    errors: Vec<ParseError>,
    text: TokenizedText<'s>,
    ast: Option<Ast<'s>>,
}

impl<'s> ParseResult<'s> {
    pub fn new(errors: Vec<ParseError>, text: TokenizedText<'s>, ast: Option<Ast<'s>>) -> Self {
        ParseResult { errors, text, ast }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.ast.is_some()
    }

    /// Errors in the order they were found.
    #[inline]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// The tokenized input.
    #[inline]
    pub fn input(&self) -> &TokenizedText<'s> {
        &self.text
    }

    pub fn ast(&self) -> Option<AstView<'_, 's>> {
        self.ast.as_ref().map(|ast| ast.view(&self.text))
    }

    /// Root of the AST, if there is an AST with a root.
    pub fn root(&self) -> Option<AstNode<'_, 's>> {
        self.ast().and_then(|view| view.root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::AstCell;
    use hime_ir::{Symbol, SymbolRef, TextPosition, SID_DOLLAR, SID_EPSILON};
    use hime_lexer::Lexer;
    use hime_lexer_core::{Automaton, AutomatonBuilder};
    use pretty_assertions::assert_eq;

    static TERMINALS: [Symbol; 3] = [
        Symbol::new(SID_EPSILON, "ε"),
        Symbol::new(SID_DOLLAR, "$"),
        Symbol::new(3, "x"),
    ];
    static VARIABLES: [Symbol; 1] = [Symbol::new(10, "start")];

    fn text(input: &str) -> TokenizedText<'static> {
        let mut b = AutomatonBuilder::new();
        let x = b.add_state(Some(2));
        b.on_byte(0, b'x', x);
        let automaton = Automaton::from_bytes(&b.to_bytes()).unwrap();
        let mut lexer = Lexer::new(automaton, &TERMINALS, 0, input);
        lexer.tokenize();
        lexer.into_output()
    }

    #[test]
    fn success_follows_ast_presence() {
        let error = ParseError::unexpected_char('?', TextPosition::new(1, 1));
        let failed = ParseResult::new(vec![error.clone()], text("x"), None);
        assert!(!failed.is_success());
        assert!(failed.root().is_none());

        let mut ast = Ast::tree(&VARIABLES, &[]);
        let first = ast.store(&[AstCell::new(SymbolRef::token(0))]);
        ast.store_root(AstCell::with_children(SymbolRef::variable(0), 1, first.raw()));
        let recovered = ParseResult::new(vec![error], text("x"), Some(ast));
        assert!(recovered.is_success());
        assert_eq!(recovered.errors().len(), 1);
    }

    #[test]
    fn root_resolves_against_input() {
        let mut ast = Ast::tree(&VARIABLES, &[]);
        let first = ast.store(&[AstCell::new(SymbolRef::token(0))]);
        ast.store_root(AstCell::with_children(SymbolRef::variable(0), 1, first.raw()));
        let result = ParseResult::new(Vec::new(), text("x"), Some(ast));

        assert_eq!(result.input().token_count(), 2);
        let root = result.root().unwrap();
        assert_eq!(root.to_string(), "start");
        assert_eq!(root.child(0).to_string(), "x");
        assert_eq!(root.child(0).position(), Some(TextPosition::new(1, 1)));
    }

    #[test]
    fn ast_without_root() {
        let ast = Ast::graph(&VARIABLES, &[]);
        let result = ParseResult::new(Vec::new(), text(""), Some(ast));
        assert!(result.is_success());
        assert!(result.ast().is_some());
        assert!(result.root().is_none());
    }
}
