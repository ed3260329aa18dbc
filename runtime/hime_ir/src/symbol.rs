//! Grammar symbols.
//!
//! Generated parsers carry three static tables of [`Symbol`]: terminals,
//! variables and virtuals. The runtime only ever reads them.

use std::fmt;

/// Symbol ID of the epsilon terminal.
pub const SID_EPSILON: u32 = 1;
/// Symbol ID of the dollar (end of input) terminal.
pub const SID_DOLLAR: u32 = 2;

/// Index of the epsilon terminal in every terminal table.
pub const TERMINAL_EPSILON: u16 = 0;
/// Index of the dollar terminal in every terminal table.
pub const TERMINAL_DOLLAR: u16 = 1;

/// A grammar symbol: terminal, variable or virtual.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Symbol {
    /// Unique identifier of the symbol within its grammar.
    pub id: u32,
    /// Name of the symbol as written in the grammar.
    pub name: &'static str,
}

impl Symbol {
    #[inline]
    pub const fn new(id: u32, name: &'static str) -> Self {
        Symbol { id, name }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A terminal symbol together with the piece of input it matched.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Lexeme {
    /// The matched terminal.
    pub symbol: Symbol,
    /// The matched text.
    pub value: String,
}

impl Lexeme {
    #[inline]
    pub fn new(symbol: Symbol, value: String) -> Self {
        Lexeme { symbol, value }
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
