//! Tile grid alias and wave matrix management
//!
//! The wave matrix is the solver's working state: one possibility bitset per
//! output cell. Cells are always replaced with freshly computed bitsets
//! during narrowing rather than mutated through shared references.

use crate::algorithm::bitset::PatternBitset;
use crate::spatial::direction::Direction;
use ndarray::Array2;

/// Rectangular grid of tile identifiers
///
/// Both training inputs and generated outputs use this shape, indexed
/// `(row, col)`.
pub type TileGrid = Array2<usize>;

/// Grid of per-cell possibility sets over the pattern index space
///
/// Cardinality 0 marks a contradiction, 1 a solved cell, and anything
/// larger an undecided cell. A wave matrix is created fresh for every solve
/// attempt and discarded wholesale on restart.
#[derive(Clone, Debug)]
pub struct WaveGrid {
    cells: Array2<PatternBitset>,
    pattern_count: usize,
}

impl WaveGrid {
    /// Create a wave matrix with every pattern possible in every cell
    pub fn filled(pattern_count: usize, width: usize, height: usize) -> Self {
        let every_pattern = PatternBitset::all(pattern_count);
        Self {
            cells: Array2::from_elem((height, width), every_pattern),
            pattern_count,
        }
    }

    /// Number of cell rows (the requested output height)
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of cell columns (the requested output width)
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Size of the pattern index space the cells range over
    pub const fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// The possibility set at `[row, col]`, if in bounds
    pub fn cell(&self, position: [usize; 2]) -> Option<&PatternBitset> {
        self.cells.get((position[0], position[1]))
    }

    /// Replace a cell's possibility set with a freshly computed one
    ///
    /// Out-of-bounds positions are ignored.
    pub fn replace_cell(&mut self, position: [usize; 2], bitset: PatternBitset) {
        if let Some(cell) = self.cells.get_mut((position[0], position[1])) {
            *cell = bitset;
        }
    }

    /// Intersect a cell's possibility set with an allowed set in-place
    ///
    /// Out-of-bounds positions are ignored.
    pub fn restrict_cell(&mut self, position: [usize; 2], allowed: &PatternBitset) {
        if let Some(cell) = self.cells.get_mut((position[0], position[1])) {
            cell.intersect_with(allowed);
        }
    }

    /// The in-bounds neighbor of a position in the given direction
    pub fn neighbor(&self, position: [usize; 2], direction: Direction) -> Option<[usize; 2]> {
        let [dy, dx] = direction.offset();
        let row = position[0] as i32 + dy;
        let col = position[1] as i32 + dx;

        if row < 0 || col < 0 || row >= self.rows() as i32 || col >= self.cols() as i32 {
            return None;
        }
        Some([row as usize, col as usize])
    }
}
