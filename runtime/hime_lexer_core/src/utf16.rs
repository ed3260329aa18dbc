//! UTF-16 view of characters.
//!
//! The automaton is defined over UTF-16 code units. A character outside
//! the Basic Multilingual Plane is fed to it as a surrogate pair, but
//! still counts as one character of input.

/// First code point outside the Basic Multilingual Plane.
const SUPPLEMENTARY_BASE: u32 = 0x1_0000;
const LEAD_BASE: u32 = 0xD800;
const TRAIL_BASE: u32 = 0xDC00;
const TEN_BITS: u32 = 0x3FF;

/// The UTF-16 code units of one character.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum CodeUnits {
    /// A character in the Basic Multilingual Plane.
    Single(u16),
    /// A supplementary character as a surrogate pair.
    Pair { lead: u16, trail: u16 },
}

impl CodeUnits {
    /// Split a character into its code units.
    #[inline]
    pub const fn of(c: char) -> Self {
        let value = c as u32;
        if value < SUPPLEMENTARY_BASE {
            CodeUnits::Single(value as u16)
        } else {
            let temp = value - SUPPLEMENTARY_BASE;
            CodeUnits::Pair {
                lead: ((temp >> 10) + LEAD_BASE) as u16,
                trail: ((temp & TEN_BITS) + TRAIL_BASE) as u16,
            }
        }
    }
}
