//! Orchestration binding the pattern learner to the constraint solver

use crate::algorithm::bitset::PatternBitset;
use crate::algorithm::solver::{ConstraintSolver, SetTileInstruction};
use crate::analysis::patterns::PatternLearner;
use crate::io::configuration::{MAX_GRID_DIMENSION, MIN_PATTERN_SIZE};
use crate::io::error::{GenerationError, Result, computation_error, invalid_parameter};
use crate::io::metrics::{Phase, SolveTrace, timed};
use crate::spatial::grid::{TileGrid, WaveGrid};
use ndarray::Array2;

/// Wave function collapse model: learn training grids, then generate
///
/// Learned pattern data is immutable between `learn` calls and may be read
/// concurrently; each `generate` call builds its own solver and wave
/// matrix, so one model can serve sequential generations while clones (or
/// shared references plus per-call solvers) serve parallel ones.
#[derive(Debug, Default)]
pub struct WfcModel {
    learner: PatternLearner,
    set_tile_instructions: Vec<SetTileInstruction>,
    trace: Option<SolveTrace>,
}

impl WfcModel {
    /// Create a model with no learned patterns
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn the patterns of one or more training grids
    ///
    /// Replaces all previously learned data and clears recorded set-tile
    /// instructions, since those reference pattern indices that no longer
    /// exist. Training grids smaller than the window in either dimension
    /// contribute no patterns.
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern_size` is below the minimum of 2; a 1x1
    /// window cannot express adjacency.
    pub fn learn(&mut self, grids: &[TileGrid], pattern_size: usize) -> Result<()> {
        if pattern_size < MIN_PATTERN_SIZE {
            return Err(invalid_parameter(
                "pattern_size",
                &pattern_size,
                &format!("window size must be at least {MIN_PATTERN_SIZE}"),
            ));
        }

        let Self { learner, trace, .. } = self;
        timed(trace.as_mut(), Phase::Learning, || {
            learner.learn(grids, pattern_size);
        });
        self.set_tile_instructions.clear();
        Ok(())
    }

    /// Access the learned pattern data
    pub const fn learner(&self) -> &PatternLearner {
        &self.learner
    }

    /// Constrain the output cell at (x, y) to render as one of the tiles
    ///
    /// Each tile identifier is translated into the set of patterns anchored
    /// on it; the union of those sets restricts the cell before solving
    /// begins. Instructions accumulate until cleared or re-learned.
    ///
    /// # Errors
    ///
    /// Returns an error if any tile identifier was never learned; silently
    /// dropping an unknown tile would hide a caller bug.
    pub fn set_tile(&mut self, x: usize, y: usize, tiles: &[usize]) -> Result<()> {
        let mut allowed = PatternBitset::new(self.learner.pattern_count());
        for &tile in tiles {
            let Some(mask) = self.learner.patterns_for_tile(tile) else {
                return Err(GenerationError::UnknownTile { tile });
            };
            allowed.union_with(mask);
        }

        self.set_tile_instructions.push(SetTileInstruction {
            position: [y, x],
            allowed_patterns: allowed,
        });
        Ok(())
    }

    /// Discard all recorded set-tile instructions
    pub fn clear_set_tiles(&mut self) {
        self.set_tile_instructions.clear();
    }

    /// Begin capturing phase timings for subsequent learn/generate calls
    pub fn enable_trace(&mut self) {
        self.trace = Some(SolveTrace::new());
    }

    /// Access the captured timing trace, if enabled
    pub const fn trace(&self) -> Option<&SolveTrace> {
        self.trace.as_ref()
    }

    /// Generate an output grid of the requested size
    ///
    /// Runs the constraint solver with the learned data, restarting on
    /// contradiction up to `max_attempts` wave matrix initializations. The
    /// seed makes every stochastic choice reproducible: identical learned
    /// data, instructions, and seed produce an identical grid.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The dimensions are zero or exceed the allocation safety bound
    /// - `max_attempts` is zero
    /// - No patterns have been learned
    /// - The set-tile instructions are unsatisfiable (fatal, not retried)
    /// - Every attempt ended in a contradiction
    pub fn generate(
        &mut self,
        width: usize,
        height: usize,
        max_attempts: usize,
        seed: u64,
    ) -> Result<TileGrid> {
        for (parameter, value) in [("width", width), ("height", height)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("output dimension must be in 1..={MAX_GRID_DIMENSION}"),
                ));
            }
        }
        if max_attempts == 0 {
            return Err(invalid_parameter(
                "max_attempts",
                &max_attempts,
                &"at least one attempt is required",
            ));
        }
        if self.learner.is_empty() {
            return Err(GenerationError::InvalidSourceData {
                reason: "no patterns learned; train on grids at least as large as the window"
                    .to_string(),
            });
        }

        let mut solver = ConstraintSolver::new(seed);
        if let Some(trace) = self.trace.take() {
            solver.install_trace(trace);
        }

        let outcome = solver.solve(
            self.learner.weights(),
            self.learner.adjacency(),
            &self.set_tile_instructions,
            width,
            height,
            max_attempts,
        );
        if let Some(trace) = solver.take_trace() {
            self.trace = Some(trace);
        }
        outcome?;

        self.assemble_grid(solver.wave())
    }

    /// Read the solved wave matrix into an output tile grid
    ///
    /// Interior cells contribute their pattern's top-left tile. Cells in
    /// the last N-1 rows and columns have no cell of their own anchored
    /// in-range, so their tiles are read from the interior of the nearest
    /// anchored cell's pattern; on an arc-consistent wave both reads agree.
    fn assemble_grid(&self, wave: &WaveGrid) -> Result<TileGrid> {
        let rows = wave.rows();
        let cols = wave.cols();
        let pattern_size = self.learner.pattern_size().max(1);
        let anchor_row_max = rows.saturating_sub(pattern_size);
        let anchor_col_max = cols.saturating_sub(pattern_size);

        let mut grid: TileGrid = Array2::zeros((rows, cols));
        for y in 0..rows {
            for x in 0..cols {
                let anchor = [y.min(anchor_row_max), x.min(anchor_col_max)];
                let tile = wave
                    .cell(anchor)
                    .and_then(PatternBitset::first)
                    .and_then(|pattern| self.learner.patterns().get(pattern))
                    .and_then(|cells| cells.get((y - anchor[0], x - anchor[1])))
                    .copied();

                let Some(tile) = tile else {
                    return Err(computation_error(
                        "assemble_grid",
                        &format!("cell ({y}, {x}) left unsolved after a successful solve"),
                    ));
                };
                if let Some(target) = grid.get_mut((y, x)) {
                    *target = tile;
                }
            }
        }

        Ok(grid)
    }
}
