//! Decoded view over a binary lexer automaton.
//!
//! Decoding validates every state block and every transition target once,
//! so the lookups below never index out of bounds on a decoded automaton.
//! Lookups take a [`StateOffset`], which can only be obtained from
//! [`Automaton::offset_of`].

/// Target value meaning "no transition".
pub const DEAD_STATE: u16 = 0xFFFF;

/// Terminal value meaning "this state recognizes nothing".
pub const NO_TERMINAL: u16 = 0xFFFF;

/// Number of directly indexed transition cells per state.
pub(crate) const CACHE_SIZE: usize = 256;

/// Cells preceding the direct transition table in a state block.
pub(crate) const HEADER_CELLS: usize = 3;

/// Cells per range transition `(low, high, target)`.
pub(crate) const RANGE_CELLS: usize = 3;

/// Error decoding an automaton from bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AutomatonError {
    #[error("automaton too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },
    #[error("negative state count {0}")]
    NegativeStateCount(i32),
    #[error("automaton has no states; state 0 is required")]
    Empty,
    #[error("state cells occupy an odd number of bytes ({0})")]
    OddCellBytes(usize),
    #[error("state {state} at cell offset {offset} runs past the end of the table ({len} cells)")]
    StateOutOfBounds { state: u32, offset: u32, len: usize },
    #[error("state {state} has a transition to {target}, but there are only {count} states")]
    TransitionTarget { state: u32, target: u16, count: usize },
}

/// Offset of a state's block in the cell table.
///
/// Only produced by [`Automaton::offset_of`], which keeps the lookup
/// methods total.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct StateOffset(u32);

impl StateOffset {
    #[inline]
    const fn get(self) -> usize {
        self.0 as usize
    }
}

/// A lexer's deterministic automaton.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Automaton {
    /// State id -> offset of its block in `cells`.
    offsets: Vec<u32>,
    /// All state blocks, back to back.
    cells: Vec<u16>,
}

impl Automaton {
    /// Decode and validate an automaton.
    pub fn from_bytes(data: &[u8]) -> Result<Self, AutomatonError> {
        if data.len() < 4 {
            return Err(AutomatonError::TooShort {
                expected: 4,
                actual: data.len(),
            });
        }
        let raw_count = i32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        let count =
            usize::try_from(raw_count).map_err(|_| AutomatonError::NegativeStateCount(raw_count))?;
        if count == 0 {
            return Err(AutomatonError::Empty);
        }

        let table_end = 4 + count * 4;
        if data.len() < table_end {
            return Err(AutomatonError::TooShort {
                expected: table_end,
                actual: data.len(),
            });
        }
        let offsets: Vec<u32> = data[4..table_end]
            .chunks_exact(4)
            .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();

        let rest = &data[table_end..];
        if rest.len() % 2 != 0 {
            return Err(AutomatonError::OddCellBytes(rest.len()));
        }
        let cells: Vec<u16> = rest
            .chunks_exact(2)
            .map(|b| u16::from_le_bytes([b[0], b[1]]))
            .collect();

        let automaton = Automaton { offsets, cells };
        automaton.validate()?;
        Ok(automaton)
    }

    /// Check every block fits and every target names an existing state.
    fn validate(&self) -> Result<(), AutomatonError> {
        let count = self.offsets.len();
        let len = self.cells.len();
        for (state, &offset) in self.offsets.iter().enumerate() {
            let state = state as u32;
            let start = offset as usize;
            let out_of_bounds = AutomatonError::StateOutOfBounds { state, offset, len };

            let ranges_at = start + HEADER_CELLS + CACHE_SIZE;
            if ranges_at > len {
                return Err(out_of_bounds);
            }
            let ranges = self.cells[start + 2] as usize;
            let end = ranges_at + ranges * RANGE_CELLS;
            if end > len {
                return Err(out_of_bounds);
            }

            let cache = &self.cells[start + HEADER_CELLS..ranges_at];
            let range_targets = self.cells[ranges_at..end]
                .chunks_exact(RANGE_CELLS)
                .map(|triple| triple[2]);
            for target in cache.iter().copied().chain(range_targets) {
                if target != DEAD_STATE && target as usize >= count {
                    return Err(AutomatonError::TransitionTarget {
                        state,
                        target,
                        count,
                    });
                }
            }
        }
        Ok(())
    }

    /// Number of states.
    #[inline]
    pub fn states_count(&self) -> usize {
        self.offsets.len()
    }

    /// Offset of a state's block.
    ///
    /// # Panics
    /// Panics if `state` is not a state of this automaton.
    #[inline]
    pub fn offset_of(&self, state: u32) -> StateOffset {
        StateOffset(self.offsets[state as usize])
    }

    /// The terminal index recognized at this state, if any.
    #[inline]
    pub fn recognized_terminal(&self, offset: StateOffset) -> Option<u16> {
        match self.cells[offset.get()] {
            NO_TERMINAL => None,
            terminal => Some(terminal),
        }
    }

    /// Whether this state has no outgoing transitions.
    #[inline]
    pub fn is_dead_end(&self, offset: StateOffset) -> bool {
        self.cells[offset.get() + 1] == 0
    }

    /// Number of range transitions (for values >= 256) from this state.
    #[inline]
    pub fn range_transitions_count(&self, offset: StateOffset) -> usize {
        self.cells[offset.get() + 2] as usize
    }

    /// Target of the direct transition on `value`.
    #[inline]
    pub fn cached_transition(&self, offset: StateOffset, value: u8) -> Option<u32> {
        match self.cells[offset.get() + HEADER_CELLS + value as usize] {
            DEAD_STATE => None,
            target => Some(u32::from(target)),
        }
    }

    /// Target of the first range transition containing `value`.
    ///
    /// Ranges are inclusive and non-overlapping by construction, so the
    /// first hit of the linear scan is the only one.
    pub fn range_transition(&self, offset: StateOffset, value: u16) -> Option<u32> {
        let start = offset.get() + HEADER_CELLS + CACHE_SIZE;
        let end = start + self.range_transitions_count(offset) * RANGE_CELLS;
        self.cells[start..end]
            .chunks_exact(RANGE_CELLS)
            .find(|triple| triple[0] <= value && value <= triple[1])
            .and_then(|triple| match triple[2] {
                DEAD_STATE => None,
                target => Some(u32::from(target)),
            })
    }

    /// Target of the transition on a UTF-16 code unit.
    ///
    /// Values up to 255 use the direct table, the rest the range scan.
    #[inline]
    pub fn transition(&self, offset: StateOffset, value: u16) -> Option<u32> {
        match u8::try_from(value) {
            Ok(byte) => self.cached_transition(offset, byte),
            Err(_) => self.range_transition(offset, value),
        }
    }
}
