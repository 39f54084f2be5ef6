//! Bitboard implementation for occupancy and line masks

/// One bit per cell in row-major order.
/// A single u32 covers every supported board (4x4 = 16 cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard {
    bits: u32,
}

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Set a bit at index
    #[inline]
    pub fn set(&mut self, idx: usize) {
        self.bits |= 1u32 << idx;
    }

    /// Copy with a bit set
    #[inline]
    #[must_use]
    pub fn with(self, idx: usize) -> Self {
        Self {
            bits: self.bits | (1u32 << idx),
        }
    }

    /// Check if bit is set at index
    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        (self.bits >> idx) & 1 == 1
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(&self) -> u32 {
        self.bits.count_ones()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// True if every bit of `mask` is also set here
    #[inline]
    pub fn contains(&self, mask: Bitboard) -> bool {
        self.bits & mask.bits == mask.bits
    }

    #[inline]
    #[must_use]
    pub fn union(self, other: Bitboard) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Iterate over set bit indices, lowest first
    pub fn iter_ones(&self) -> BitboardIter {
        BitboardIter { bits: self.bits }
    }
}

/// Iterator over set bits in a Bitboard
pub struct BitboardIter {
    bits: u32,
}

impl Iterator for BitboardIter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let idx = self.bits.trailing_zeros() as usize;
        // Clear the bit we just found
        self.bits &= self.bits - 1;
        Some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_count() {
        let mut bb = Bitboard::new();
        assert!(bb.is_empty());
        bb.set(0);
        bb.set(8);
        assert!(bb.get(0));
        assert!(bb.get(8));
        assert!(!bb.get(4));
        assert_eq!(bb.count(), 2);
    }

    #[test]
    fn test_iter_ones_ascending() {
        let bb = Bitboard::new().with(7).with(2).with(24);
        assert_eq!(bb.iter_ones().collect::<Vec<_>>(), vec![2, 7, 24]);
    }

    #[test]
    fn test_contains() {
        let row = Bitboard::new().with(0).with(1).with(2);
        assert_eq!(row.count(), 3);
        assert!(row.contains(Bitboard::new().with(0).with(2)));
        assert!(!Bitboard::new().with(0).contains(row));
        assert!(row.with(7).contains(row));
    }
}
