//! Interned string identifier.

use std::fmt;

/// Interned string identifier.
///
/// A compact index into the [`StringInterner`](crate::StringInterner)'s
/// table. Comparing two `Name`s compares table indices, so equality is O(1)
/// and independent of string length.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string. Anonymous aggregate members carry this.
    pub const EMPTY: Name = Name(0);

    /// Create from a raw table index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }

    /// Get the raw table index.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Table index as `usize`, for direct table lookup.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}
