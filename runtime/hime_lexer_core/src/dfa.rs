//! Longest-match walk of an automaton over resident input.

use crate::automaton::Automaton;
use crate::utf16::CodeUnits;

/// The longest token recognized at a position.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct TokenMatch {
    /// Index of the recognized terminal in the lexer's terminal table.
    pub terminal: u16,
    /// Length of the match, in characters. Always at least 1.
    pub length: usize,
}

/// Walk `automaton` from state 0 over `input[start..]`.
///
/// Every state visited after consuming at least one character that
/// recognizes a terminal replaces the current best match, so the result is
/// the longest recognition. The walk stops at a dead-end state, at the end
/// of the input, or when the next character has no transition.
///
/// A character outside the Basic Multilingual Plane takes two transitions
/// (lead then trail surrogate, the trail starting from the state the lead
/// reached) but counts as a single character of length.
///
/// Returns `None` when nothing of non-zero length is recognized.
pub fn run_dfa(automaton: &Automaton, input: &[char], start: usize) -> Option<TokenMatch> {
    let mut best = None;
    let mut state = 0u32;
    let mut length = 0usize;

    loop {
        let offset = automaton.offset_of(state);
        if length > 0 {
            if let Some(terminal) = automaton.recognized_terminal(offset) {
                best = Some(TokenMatch { terminal, length });
            }
        }
        if automaton.is_dead_end(offset) {
            break;
        }
        let Some(&c) = input.get(start + length) else {
            break;
        };
        let next = match CodeUnits::of(c) {
            CodeUnits::Single(unit) => automaton.transition(offset, unit),
            CodeUnits::Pair { lead, trail } => automaton
                .range_transition(offset, lead)
                .and_then(|middle| automaton.range_transition(automaton.offset_of(middle), trail)),
        };
        let Some(next) = next else {
            break;
        };
        state = next;
        length += 1;
    }

    best
}

#[cfg(test)]
mod tests;
