//! Runtime library for parsers generated by Hime.
//!
//! Generated code links against this crate only. It re-exports the
//! runtime crates and adds what sits at their edges: loading the compiled
//! automata and turning on logging.
//!
//! # Crates
//!
//! - `hime_ir`: symbols, tokens, text positions
//! - `hime_lexer_core`: the binary automaton and its longest-match walk
//! - `hime_diagnostic`: lexical and syntactic errors
//! - `hime_lexer`: the lexer and its tokenized text
//! - `hime_parse`: token stream, AST storage, sub-tree staging, results
//!
//! # Logging
//!
//! The runtime logs through `tracing`. Call [`init_tracing`] and set
//! `HIME_LOG` (or `RUST_LOG`), e.g. `HIME_LOG=hime_lexer=trace`.

mod resources;

use std::sync::Once;

use tracing::debug;
use tracing_subscriber::util::TryInitError;

pub use hime_diagnostic::{ParseError, ParseErrorKind};
pub use hime_ir::{
    Lexeme, Symbol, SymbolRef, SymbolRefError, SymbolType, TextContext, TextPosition, TextSpan,
    Token, SID_DOLLAR, SID_EPSILON, TERMINAL_DOLLAR, TERMINAL_EPSILON,
};
pub use hime_lexer::{ErrorHandler, Lexer, Text, TokenSource, TokenizedText};
pub use hime_lexer_core::{Automaton, AutomatonBuilder, AutomatonError};
pub use hime_parse::{
    Ast, AstCell, AstNode, AstView, Children, NodeId, NodeSymbol, ParseResult,
    RewindableTokenStream, SubTree, TreeAction, RING_SIZE,
};
pub use resources::{
    load_automaton, DirectoryLoader, EmbeddedResources, LoadError, ResourceError, ResourceLoader,
};

static TRACING_INIT: Once = Once::new();

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "HIME_LOG";

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// The filter comes from `HIME_LOG`, falling back to `RUST_LOG`; with
/// neither set, nothing is installed. When the host already installed a
/// global subscriber, that one is kept and the conflict is logged to it.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let directives = std::env::var(LOG_ENV).or_else(|_| std::env::var("RUST_LOG"));
        if let Ok(directives) = directives {
            if let Err(error) = install_subscriber(&directives) {
                debug!(%error, "keeping the existing tracing subscriber");
            }
        }
    });
}

/// Install the fmt subscriber filtered by `directives` as the global default.
fn install_subscriber(directives: &str) -> Result<(), TryInitError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_level(true))
        .with(EnvFilter::new(directives))
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_subscriber_is_refused() {
        // The first install may lose to a subscriber set by another test.
        let _ = install_subscriber("hime_redist=warn");
        let error = install_subscriber("hime_redist=debug");
        assert!(error.is_err());
        init_tracing();
    }
}
