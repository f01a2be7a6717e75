//! Window extraction, deduplication, weighting, and the tile index

use crate::algorithm::bitset::PatternBitset;
use crate::analysis::adjacency::AdjacencyMap;
use crate::spatial::grid::TileGrid;
use ndarray::Array2;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Learns weighted patterns and their adjacency from training grids
///
/// Each learn call replaces all previously learned state. Patterns are the
/// direct axis-aligned NxN windows of the training grids: no rotation, no
/// reflection, no periodic wrap.
#[derive(Debug, Default)]
pub struct PatternLearner {
    patterns: Vec<Array2<usize>>,
    weights: Vec<u32>,
    adjacency: AdjacencyMap,
    tiles_to_patterns: HashMap<usize, PatternBitset>,
    pattern_size: usize,
}

impl PatternLearner {
    /// Create a learner with no patterns
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn the unique patterns of one or more training grids
    ///
    /// A grid of height H contributes `H - N + 1` row offsets (and likewise
    /// for columns); grids smaller than the window in either dimension
    /// contribute nothing. Duplicate windows increment the original
    /// pattern's weight, so every learned pattern has weight at least 1 and
    /// the weights sum to the total number of windows scanned.
    pub fn learn(&mut self, grids: &[TileGrid], pattern_size: usize) {
        self.patterns.clear();
        self.weights.clear();
        self.tiles_to_patterns.clear();
        self.pattern_size = pattern_size;

        self.collect_patterns(grids, pattern_size);
        self.adjacency = AdjacencyMap::build(&self.patterns);
        self.index_tiles();
    }

    fn collect_patterns(&mut self, grids: &[TileGrid], pattern_size: usize) {
        let mut seen: HashMap<Vec<usize>, usize> = HashMap::new();

        for grid in grids {
            let (rows, cols) = grid.dim();
            if rows < pattern_size || cols < pattern_size || pattern_size == 0 {
                continue;
            }

            for y in 0..=rows - pattern_size {
                for x in 0..=cols - pattern_size {
                    let pattern = extract_window(grid, pattern_size, y, x);
                    let key: Vec<usize> = pattern.iter().copied().collect();

                    match seen.entry(key) {
                        Entry::Occupied(entry) => {
                            if let Some(weight) = self.weights.get_mut(*entry.get()) {
                                *weight += 1;
                            }
                        }
                        Entry::Vacant(entry) => {
                            entry.insert(self.patterns.len());
                            self.patterns.push(pattern);
                            self.weights.push(1);
                        }
                    }
                }
            }
        }
    }

    fn index_tiles(&mut self) {
        let count = self.patterns.len();
        for (index, pattern) in self.patterns.iter().enumerate() {
            let Some(&tile) = pattern.get((0, 0)) else {
                continue;
            };
            self.tiles_to_patterns
                .entry(tile)
                .or_insert_with(|| PatternBitset::new(count))
                .insert(index);
        }
    }

    /// All learned patterns, indexed by pattern index
    pub fn patterns(&self) -> &[Array2<usize>] {
        &self.patterns
    }

    /// Occurrence weight of each pattern
    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    /// The per-direction adjacency masks
    pub const fn adjacency(&self) -> &AdjacencyMap {
        &self.adjacency
    }

    /// Window size the patterns were learned with
    pub const fn pattern_size(&self) -> usize {
        self.pattern_size
    }

    /// Number of unique learned patterns
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Whether no patterns have been learned
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Patterns whose top-left cell is the given tile identifier
    pub fn patterns_for_tile(&self, tile: usize) -> Option<&PatternBitset> {
        self.tiles_to_patterns.get(&tile)
    }

    /// Top-left tile identifier of a pattern
    pub fn top_left_tile(&self, pattern: usize) -> Option<usize> {
        self.patterns
            .get(pattern)
            .and_then(|cells| cells.get((0, 0)))
            .copied()
    }
}

/// Copy the NxN window anchored at `(y, x)` out of a training grid
pub fn extract_window(grid: &TileGrid, size: usize, y: usize, x: usize) -> Array2<usize> {
    let mut pattern = Array2::zeros((size, size));
    for dy in 0..size {
        for dx in 0..size {
            let value = grid.get((y + dy, x + dx)).copied().unwrap_or(0);
            if let Some(cell) = pattern.get_mut((dy, dx)) {
                *cell = value;
            }
        }
    }
    pattern
}
