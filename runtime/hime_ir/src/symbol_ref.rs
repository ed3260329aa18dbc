//! Packed symbol references.
//!
//! An AST node does not store its symbol; it stores a 32-bit reference
//! into one of three tables. The table is selected by the two high bits,
//! the remaining 30 bits are the index:
//!
//! ```text
//!  31 30 29                              0
//! [type ][            index               ]
//! ```
//!
//! The encoding is only reachable through [`SymbolRef`]'s accessors.

use std::fmt;

/// Which table a [`SymbolRef`] points into.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SymbolType {
    /// No symbol.
    None = 0,
    /// A token in the tokenized text.
    Token = 1,
    /// A variable in the parser's variable table.
    Variable = 2,
    /// A virtual in the parser's virtual table.
    Virtual = 3,
}

impl SymbolType {
    /// Decode the two type bits. Only the low two bits of `bits` are read.
    #[inline]
    const fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0 => SymbolType::None,
            1 => SymbolType::Token,
            2 => SymbolType::Variable,
            _ => SymbolType::Virtual,
        }
    }
}

/// Error when creating a reference whose index does not fit in 30 bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolRefError {
    /// The index exceeds [`SymbolRef::MAX_INDEX`].
    IndexTooLarge(usize),
}

impl fmt::Display for SymbolRefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolRefError::IndexTooLarge(v) => write!(
                f,
                "symbol index {} (0x{:X}) exceeds 0x{:X}",
                v,
                v,
                SymbolRef::MAX_INDEX
            ),
        }
    }
}

impl std::error::Error for SymbolRefError {}

/// A symbol type and table index packed into one `u32`.
///
/// The default value is [`SymbolRef::NONE`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct SymbolRef(u32);

impl SymbolRef {
    /// Largest index that fits in the 30 index bits.
    pub const MAX_INDEX: u32 = 0x3FFF_FFFF;

    /// Reference to no symbol.
    pub const NONE: SymbolRef = SymbolRef(0);

    const TYPE_SHIFT: u32 = 30;

    /// Try to pack a symbol type and an index.
    pub fn try_new(kind: SymbolType, index: usize) -> Result<Self, SymbolRefError> {
        match u32::try_from(index) {
            Ok(i) if i <= Self::MAX_INDEX => Ok(SymbolRef(
                ((kind as u32) << Self::TYPE_SHIFT) | i,
            )),
            _ => Err(SymbolRefError::IndexTooLarge(index)),
        }
    }

    /// Pack a symbol type and an index.
    ///
    /// # Panics
    /// Panics if `index` exceeds [`SymbolRef::MAX_INDEX`].
    /// Use `try_new` when the index comes from untrusted data.
    #[inline]
    pub fn new(kind: SymbolType, index: usize) -> Self {
        Self::try_new(kind, index).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Reference to the token at `index` in the tokenized text.
    #[inline]
    pub fn token(index: usize) -> Self {
        Self::new(SymbolType::Token, index)
    }

    /// Reference to the variable at `index`.
    #[inline]
    pub fn variable(index: usize) -> Self {
        Self::new(SymbolType::Variable, index)
    }

    /// Reference to the virtual at `index`.
    #[inline]
    pub fn virtual_symbol(index: usize) -> Self {
        Self::new(SymbolType::Virtual, index)
    }

    /// The table this reference points into.
    #[inline]
    pub const fn kind(self) -> SymbolType {
        SymbolType::from_bits(self.0 >> Self::TYPE_SHIFT)
    }

    /// The index within the table.
    #[inline]
    pub const fn index(self) -> usize {
        (self.0 & Self::MAX_INDEX) as usize
    }

    /// Whether this is the empty reference.
    #[inline]
    pub const fn is_none(self) -> bool {
        matches!(self.kind(), SymbolType::None)
    }
}

impl fmt::Debug for SymbolRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}#{}", self.kind(), self.index())
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::SymbolRef;
    crate::static_assert_size!(SymbolRef, 4);
}
