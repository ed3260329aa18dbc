//! Low-level lexer automaton for Hime-generated lexers.
//!
//! This crate knows nothing about symbols, tokens or errors. It decodes the
//! binary DFA emitted by the grammar compiler and walks it over resident
//! input to find the longest match at a position.
//!
//! # Binary format (little-endian)
//!
//! ```text
//! i32        state count N
//! u32[N]     offset of each state's block, in 16-bit cells
//! u16[...]   state blocks
//! ```
//!
//! Each state block:
//!
//! ```text
//! cell[0]          recognized terminal index, or 0xFFFF
//! cell[1]          number of transitions (0 = dead end)
//! cell[2]          number of range transitions R
//! cell[3..259]     direct transitions for values 0..=255 (target or 0xFFFF)
//! cell[259..]      R triples (low, high, target) for values >= 256
//! ```

mod automaton;
mod builder;
mod dfa;
mod utf16;

pub use automaton::{Automaton, AutomatonError, StateOffset, DEAD_STATE, NO_TERMINAL};
pub use builder::AutomatonBuilder;
pub use dfa::{run_dfa, TokenMatch};
pub use utf16::CodeUnits;
