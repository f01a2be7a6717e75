use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over the pattern index space
///
/// Every possibility set in the system is one of these: wave matrix cells,
/// adjacency masks, and tile index entries. Indices are zero-based pattern
/// indices in `[0, pattern_count)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternBitset {
    bits: BitVec,
    pattern_count: usize,
}

impl PatternBitset {
    /// Create a bitset with no patterns present
    pub fn new(pattern_count: usize) -> Self {
        Self {
            bits: bitvec![0; pattern_count],
            pattern_count,
        }
    }

    /// Create a bitset containing every pattern
    pub fn all(pattern_count: usize) -> Self {
        Self {
            bits: bitvec![1; pattern_count],
            pattern_count,
        }
    }

    /// Build a bitset from a list of pattern indices
    ///
    /// Out-of-range indices are ignored.
    pub fn from_indices(indices: &[usize], pattern_count: usize) -> Self {
        let mut bitset = Self::new(pattern_count);
        for &index in indices {
            bitset.insert(index);
        }
        bitset
    }

    /// Insert a pattern index
    ///
    /// Indices at or beyond the pattern count are ignored.
    pub fn insert(&mut self, index: usize) {
        if index < self.pattern_count {
            self.bits.set(index, true);
        }
    }

    /// Test pattern membership
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Remove every pattern
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Intersect this bitset with another in-place
    ///
    /// Both operands must have been built for the same pattern count.
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Create a new bitset containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Add every pattern present in the other bitset
    ///
    /// Both operands must have been built for the same pattern count.
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Test if no patterns are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count patterns in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// The number of patterns this set was sized for
    pub const fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// The lowest pattern index present, if any
    pub fn first(&self) -> Option<usize> {
        self.bits.iter_ones().next()
    }

    /// Iterate set pattern indices in ascending order without allocating
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all pattern indices as a vector, ascending
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for PatternBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PatternBitset({} patterns: {:?})",
            self.count(),
            self.to_vec()
        )
    }
}
