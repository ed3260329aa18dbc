//! Serializer for lexer automata.
//!
//! The grammar compiler is the real producer of automata; this builder
//! writes the same binary format so tools and tests can assemble small
//! automata by hand and round-trip them through [`Automaton::from_bytes`].
//!
//! [`Automaton::from_bytes`]: crate::Automaton::from_bytes

use crate::automaton::{CACHE_SIZE, DEAD_STATE, NO_TERMINAL};
use crate::utf16::CodeUnits;

struct StateDraft {
    terminal: u16,
    cache: Box<[u16; CACHE_SIZE]>,
    ranges: Vec<[u16; 3]>,
}

impl StateDraft {
    fn new(terminal: Option<u16>) -> Self {
        StateDraft {
            terminal: terminal.unwrap_or(NO_TERMINAL),
            cache: Box::new([DEAD_STATE; CACHE_SIZE]),
            ranges: Vec::new(),
        }
    }

    fn transitions_count(&self) -> u16 {
        let cached = self.cache.iter().filter(|&&t| t != DEAD_STATE).count();
        u16::try_from(cached + self.ranges.len()).unwrap_or(u16::MAX)
    }

    /// Existing range target for exactly `value..=value`, if any.
    fn single_range_target(&self, value: u16) -> Option<u16> {
        self.ranges
            .iter()
            .find(|r| r[0] == value && r[1] == value)
            .map(|r| r[2])
    }
}

/// Builds a lexer automaton state by state.
///
/// State 0 is the start state and is created by [`AutomatonBuilder::new`].
pub struct AutomatonBuilder {
    states: Vec<StateDraft>,
}

impl Default for AutomatonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AutomatonBuilder {
    /// Start a builder holding only the non-accepting start state.
    pub fn new() -> Self {
        AutomatonBuilder {
            states: vec![StateDraft::new(None)],
        }
    }

    /// Id of the start state.
    pub const START: u16 = 0;

    /// Add a state, optionally recognizing the terminal at `terminal`.
    ///
    /// # Panics
    /// Panics if the automaton would exceed the 16-bit state space.
    pub fn add_state(&mut self, terminal: Option<u16>) -> u16 {
        let id = u16::try_from(self.states.len())
            .ok()
            .filter(|&id| id != DEAD_STATE)
            .unwrap_or_else(|| panic!("automaton exceeds {} states", DEAD_STATE));
        self.states.push(StateDraft::new(terminal));
        id
    }

    /// Make `state` recognize the terminal at `terminal`.
    pub fn set_terminal(&mut self, state: u16, terminal: u16) -> &mut Self {
        self.states[state as usize].terminal = terminal;
        self
    }

    /// Direct transition on one value in `0..=255`.
    pub fn on_byte(&mut self, from: u16, value: u8, to: u16) -> &mut Self {
        self.states[from as usize].cache[value as usize] = to;
        self
    }

    /// Direct transitions on every value in `values`.
    pub fn on_bytes(&mut self, from: u16, values: impl IntoIterator<Item = u8>, to: u16) -> &mut Self {
        for value in values {
            self.on_byte(from, value, to);
        }
        self
    }

    /// Range transition on `low..=high`; both bounds must be >= 256.
    ///
    /// # Panics
    /// Panics if `low` is below 256 or the range is reversed.
    pub fn on_range(&mut self, from: u16, low: u16, high: u16, to: u16) -> &mut Self {
        assert!(
            low as usize >= CACHE_SIZE && low <= high,
            "range transitions cover values >= 256, got {low:#X}..={high:#X}"
        );
        self.states[from as usize].ranges.push([low, high, to]);
        self
    }

    /// Transition on a character, in whatever form the format needs.
    ///
    /// Characters outside the Basic Multilingual Plane become a lead
    /// surrogate transition into an intermediate state, then a trail
    /// surrogate transition into `to`. Intermediate states are shared
    /// between characters with the same lead surrogate.
    pub fn on_char(&mut self, from: u16, c: char, to: u16) -> &mut Self {
        match CodeUnits::of(c) {
            CodeUnits::Single(unit) => match u8::try_from(unit) {
                Ok(byte) => self.on_byte(from, byte, to),
                Err(_) => self.on_range(from, unit, unit, to),
            },
            CodeUnits::Pair { lead, trail } => {
                let middle = match self.states[from as usize].single_range_target(lead) {
                    Some(existing) => existing,
                    None => {
                        let middle = self.add_state(None);
                        self.on_range(from, lead, lead, middle);
                        middle
                    }
                };
                self.on_range(middle, trail, trail, to)
            }
        }
    }

    /// Number of states so far.
    pub fn states_count(&self) -> usize {
        self.states.len()
    }

    /// Serialize in the automaton binary format.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut offsets = Vec::with_capacity(self.states.len());
        let mut cells: Vec<u16> = Vec::new();
        for state in &self.states {
            offsets.push(cells.len() as u32);
            cells.push(state.terminal);
            cells.push(state.transitions_count());
            cells.push(state.ranges.len() as u16);
            cells.extend_from_slice(&state.cache[..]);
            for range in &state.ranges {
                cells.extend_from_slice(range);
            }
        }

        let mut out = Vec::with_capacity(4 + offsets.len() * 4 + cells.len() * 2);
        out.extend_from_slice(&(self.states.len() as i32).to_le_bytes());
        for offset in offsets {
            out.extend_from_slice(&offset.to_le_bytes());
        }
        for cell in cells {
            out.extend_from_slice(&cell.to_le_bytes());
        }
        out
    }
}
