use crate::algorithm::bitset::PatternBitset;
use crate::spatial::direction::Direction;
use ndarray::Array2;

/// Per-pattern, per-direction sets of legally adjacent patterns
///
/// `allowed(i, d)` holds every pattern that may occupy the cell at offset
/// `d` from a cell holding pattern `i`. Construction guarantees symmetry:
/// `j ∈ allowed(i, d)` exactly when `i ∈ allowed(j, d.opposite())`.
#[derive(Clone, Debug, Default)]
pub struct AdjacencyMap {
    masks: Vec<[PatternBitset; 4]>,
}

impl AdjacencyMap {
    /// Build the adjacency map for a set of learned patterns
    ///
    /// Every ordered pair with `j >= i` (including `i == j`, so patterns
    /// may neighbor themselves) is tested once per direction; both the
    /// forward and the mirrored entry are recorded together.
    pub fn build(patterns: &[Array2<usize>]) -> Self {
        let count = patterns.len();
        let mut masks: Vec<[PatternBitset; 4]> = (0..count)
            .map(|_| {
                [
                    PatternBitset::new(count),
                    PatternBitset::new(count),
                    PatternBitset::new(count),
                    PatternBitset::new(count),
                ]
            })
            .collect();

        for i in 0..count {
            for j in i..count {
                let (Some(first), Some(second)) = (patterns.get(i), patterns.get(j)) else {
                    continue;
                };
                for direction in Direction::ALL {
                    if !compatible(first, second, direction) {
                        continue;
                    }
                    if let Some(mask) = masks
                        .get_mut(i)
                        .and_then(|directions| directions.get_mut(direction.index()))
                    {
                        mask.insert(j);
                    }
                    if let Some(mask) = masks
                        .get_mut(j)
                        .and_then(|directions| directions.get_mut(direction.opposite().index()))
                    {
                        mask.insert(i);
                    }
                }
            }
        }

        Self { masks }
    }

    /// Patterns allowed next to `pattern` in the given direction
    pub fn allowed(&self, pattern: usize, direction: Direction) -> Option<&PatternBitset> {
        self.masks
            .get(pattern)
            .and_then(|directions| directions.get(direction.index()))
    }

    /// Number of patterns the map was built for
    pub fn pattern_count(&self) -> usize {
        self.masks.len()
    }
}

/// Test whether `neighbor` may occupy the cell at `direction` from a cell
/// holding `pattern`
///
/// The neighbor's window origin sits one step away, so the two windows
/// overlap on all but one row or column; they are compatible exactly when
/// every overlapping cell matches.
pub fn compatible(pattern: &Array2<usize>, neighbor: &Array2<usize>, direction: Direction) -> bool {
    let (rows, cols) = pattern.dim();
    let [dy, dx] = direction.offset();

    for y in 0..rows {
        for x in 0..cols {
            let neighbor_y = y as i32 - dy;
            let neighbor_x = x as i32 - dx;
            if neighbor_y < 0
                || neighbor_x < 0
                || neighbor_y >= rows as i32
                || neighbor_x >= cols as i32
            {
                continue;
            }
            if pattern.get((y, x)) != neighbor.get((neighbor_y as usize, neighbor_x as usize)) {
                return false;
            }
        }
    }
    true
}
