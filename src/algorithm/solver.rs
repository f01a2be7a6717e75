//! Wave matrix solving through observation and propagation
//!
//! One solve attempt runs INITIALIZED → (OBSERVE → PROPAGATE)* and ends
//! SOLVED or CONTRADICTED. A contradiction discards the whole wave matrix
//! and starts over; only the attempt bound turns repeated contradictions
//! into a reported failure.

use crate::algorithm::bitset::PatternBitset;
use crate::algorithm::queue::CellQueue;
use crate::analysis::adjacency::AdjacencyMap;
use crate::io::error::{GenerationError, Result, computation_error, invalid_parameter};
use crate::io::metrics::{Phase, SolveTrace, timed};
use crate::math::probability::{shannon_entropy, weighted_draw};
use crate::spatial::direction::Direction;
use crate::spatial::grid::WaveGrid;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Pre-collapse restriction of one wave matrix cell
///
/// Recorded by the model before solving starts and applied to every fresh
/// wave matrix, including the ones built for restart attempts.
#[derive(Clone, Debug)]
pub struct SetTileInstruction {
    /// Wave matrix position as (row, col)
    pub position: [usize; 2],
    /// Patterns the cell may still become
    pub allowed_patterns: PatternBitset,
}

/// Outcome of a propagation pass
///
/// Contradiction is an expected, frequent result the solver recovers from,
/// so it travels as a value rather than an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Propagation {
    /// Every affected cell settled on a non-empty possibility set
    Settled,
    /// Some cell's possibility set became empty
    Contradiction,
}

/// Seeded random selector for reproducible stochastic choices
#[derive(Debug)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Index drawn with probability proportional to its weight
    ///
    /// Returns `None` for an empty or zero-total distribution, or when the
    /// cumulative walk overshoots; the caller decides how loudly to fail.
    pub fn weighted_choice(&mut self, weights: &[f64]) -> Option<usize> {
        let roll = self.rng.random::<f64>();
        weighted_draw(weights, roll)
    }

    /// Uniform index in `[0, count)`, or 0 when the range is empty
    pub fn uniform_choice(&mut self, count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        self.rng.random_range(0..count)
    }
}

/// Solves a wave matrix against learned pattern data
///
/// Owns the in-flight wave matrix, the seeded randomness source, and an
/// optional timing trace. Concurrent generations each need their own
/// solver; the learned data they read may be shared freely.
#[derive(Debug)]
pub struct ConstraintSolver {
    wave: WaveGrid,
    selector: RandomSelector,
    trace: Option<SolveTrace>,
}

impl ConstraintSolver {
    /// Create a solver with the given randomness seed
    pub fn new(seed: u64) -> Self {
        Self {
            wave: WaveGrid::filled(0, 0, 0),
            selector: RandomSelector::new(seed),
            trace: None,
        }
    }

    /// Access the wave matrix of the most recent solve
    pub const fn wave(&self) -> &WaveGrid {
        &self.wave
    }

    /// Attach a timing trace for subsequent solves
    pub fn install_trace(&mut self, trace: SolveTrace) {
        self.trace = Some(trace);
    }

    /// Access the timing trace, if one is attached
    pub const fn trace(&self) -> Option<&SolveTrace> {
        self.trace.as_ref()
    }

    /// Detach and return the timing trace
    pub fn take_trace(&mut self) -> Option<SolveTrace> {
        self.trace.take()
    }

    /// Solve a fresh wave matrix of the requested size
    ///
    /// On success every cell holds exactly one pattern. Contradictions
    /// rebuild the wave matrix and re-apply the set-tile instructions, up
    /// to `max_attempts` initializations.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The weight table and adjacency map disagree on the pattern count
    /// - A set-tile instruction lies outside the wave matrix or its
    ///   application contradicts (fatal, never retried)
    /// - All attempts ended in contradictions
    /// - An internal invariant is violated (empty possibility set during
    ///   selection, weighted draw overshoot)
    pub fn solve(
        &mut self,
        weights: &[u32],
        adjacency: &AdjacencyMap,
        set_tile_instructions: &[SetTileInstruction],
        width: usize,
        height: usize,
        max_attempts: usize,
    ) -> Result<()> {
        if adjacency.pattern_count() != weights.len() {
            return Err(invalid_parameter(
                "adjacency",
                &adjacency.pattern_count(),
                &format!("adjacency map covers a different pattern count than the {} weights", weights.len()),
            ));
        }

        let pattern_count = weights.len();
        let Self {
            wave,
            selector,
            trace,
        } = self;

        *wave = timed(trace.as_mut(), Phase::WaveInit, || {
            WaveGrid::filled(pattern_count, width, height)
        });
        apply_set_tiles(wave, set_tile_instructions, adjacency)?;
        if let Some(sink) = trace.as_mut() {
            sink.record_attempt();
        }

        let mut attempts = 1;
        loop {
            let selected = timed(trace.as_mut(), Phase::Entropy, || {
                select_next_cell(wave, weights, selector)
            })?;
            let Some(position) = selected else {
                // Every cell is down to a single pattern
                return Ok(());
            };

            timed(trace.as_mut(), Phase::Observe, || {
                observe(wave, position, weights, selector)
            })?;

            let outcome = timed(trace.as_mut(), Phase::Propagate, || {
                propagate(wave, position, adjacency)
            });
            if outcome == Propagation::Contradiction {
                attempts += 1;
                if attempts > max_attempts {
                    return Err(GenerationError::AttemptsExhausted {
                        attempts: max_attempts,
                    });
                }
                *wave = timed(trace.as_mut(), Phase::WaveInit, || {
                    WaveGrid::filled(pattern_count, width, height)
                });
                apply_set_tiles(wave, set_tile_instructions, adjacency)?;
                if let Some(sink) = trace.as_mut() {
                    sink.record_attempt();
                }
            }
        }
    }
}

/// Apply the user's set-tile instructions to a fresh wave matrix
///
/// Each instructed cell is intersected with its allowed set and propagated
/// from immediately. A contradiction here means the seed constraints are
/// mutually unsatisfiable; restarting cannot change that, so it is fatal.
///
/// # Errors
///
/// Returns an error if an instruction lies outside the wave matrix or its
/// application empties a possibility set.
pub fn apply_set_tiles(
    wave: &mut WaveGrid,
    instructions: &[SetTileInstruction],
    adjacency: &AdjacencyMap,
) -> Result<()> {
    for instruction in instructions {
        let position = instruction.position;
        if position[0] >= wave.rows() || position[1] >= wave.cols() {
            return Err(invalid_parameter(
                "set_tile",
                &format!("({}, {})", position[1], position[0]),
                &"position lies outside the output grid",
            ));
        }

        wave.restrict_cell(position, &instruction.allowed_patterns);
        let emptied = wave.cell(position).is_none_or(PatternBitset::is_empty);
        if emptied || propagate(wave, position, adjacency) == Propagation::Contradiction {
            return Err(GenerationError::UnsatisfiableSeed { position });
        }
    }
    Ok(())
}

/// Position of a least-entropy undecided cell, or `None` when solved
///
/// Cells already down to one pattern are excluded. All cells tied at the
/// minimum entropy are collected and one is drawn uniformly, so the scan
/// order never leaks into the output.
///
/// # Errors
///
/// Returns an error if a cell with an empty possibility set survived
/// propagation; that is a solver defect, not a recoverable contradiction.
pub fn select_next_cell(
    wave: &WaveGrid,
    weights: &[u32],
    selector: &mut RandomSelector,
) -> Result<Option<[usize; 2]>> {
    let mut least_entropy = f64::INFINITY;
    let mut tied_positions: Vec<[usize; 2]> = Vec::new();
    let mut cell_weights: Vec<f64> = Vec::new();

    for y in 0..wave.rows() {
        for x in 0..wave.cols() {
            let Some(cell) = wave.cell([y, x]) else {
                continue;
            };
            let possible = cell.count();
            if possible == 0 {
                return Err(computation_error(
                    "select_next_cell",
                    &format!("cell ({y}, {x}) has an empty possibility set outside propagation"),
                ));
            }
            if possible == 1 {
                continue;
            }

            cell_weights.clear();
            cell_weights.extend(
                cell.iter_ones()
                    .map(|index| f64::from(weights.get(index).copied().unwrap_or(0))),
            );
            let Some(entropy) = shannon_entropy(&cell_weights) else {
                return Err(computation_error(
                    "shannon_entropy",
                    &format!("entropy requested for cell ({y}, {x}) with zero total weight"),
                ));
            };

            if entropy < least_entropy {
                least_entropy = entropy;
                tied_positions.clear();
                tied_positions.push([y, x]);
            } else if (entropy - least_entropy).abs() < f64::EPSILON {
                tied_positions.push([y, x]);
            }
        }
    }

    if tied_positions.is_empty() {
        return Ok(None);
    }
    let choice = selector.uniform_choice(tied_positions.len());
    Ok(tied_positions.get(choice).copied())
}

/// Collapse a cell to a single pattern by weighted random choice
///
/// # Errors
///
/// Returns an error if the weighted draw overshoots its cumulative
/// distribution; per the error handling design that is a defect, not a
/// condition to paper over with the last index.
pub fn observe(
    wave: &mut WaveGrid,
    position: [usize; 2],
    weights: &[u32],
    selector: &mut RandomSelector,
) -> Result<()> {
    let Some(cell) = wave.cell(position) else {
        return Err(computation_error(
            "observe",
            &format!(
                "observed position ({}, {}) lies outside the wave matrix",
                position[0], position[1]
            ),
        ));
    };

    let possible = cell.to_vec();
    let pattern_weights: Vec<f64> = possible
        .iter()
        .map(|&index| f64::from(weights.get(index).copied().unwrap_or(0)))
        .collect();

    let chosen = selector
        .weighted_choice(&pattern_weights)
        .and_then(|index| possible.get(index).copied());
    let Some(pattern) = chosen else {
        return Err(computation_error(
            "observe",
            &"weighted draw exceeded the cumulative distribution",
        ));
    };

    let mut collapsed = PatternBitset::new(wave.pattern_count());
    collapsed.insert(pattern);
    wave.replace_cell(position, collapsed);
    Ok(())
}

/// Re-derive neighboring possibility sets after a cell changed
///
/// Breadth-first from the origin: each dequeued cell restricts every
/// in-grid neighbor to the union of its own patterns' adjacency masks in
/// that direction. Neighbors that shrank are re-enqueued; sets only ever
/// shrink, so the pass terminates.
pub fn propagate(wave: &mut WaveGrid, origin: [usize; 2], adjacency: &AdjacencyMap) -> Propagation {
    let mut queue = CellQueue::new();
    queue.push(origin);

    while let Some(position) = queue.take_next() {
        let source_patterns = match wave.cell(position) {
            Some(cell) => cell.to_vec(),
            None => continue,
        };

        for direction in Direction::ALL {
            let Some(neighbor) = wave.neighbor(position, direction) else {
                continue;
            };

            let mut reachable = PatternBitset::new(wave.pattern_count());
            for &pattern in &source_patterns {
                if let Some(allowed) = adjacency.allowed(pattern, direction) {
                    reachable.union_with(allowed);
                }
            }

            let Some(current) = wave.cell(neighbor) else {
                continue;
            };
            let narrowed = current.intersection(&reachable);
            if narrowed.is_empty() {
                return Propagation::Contradiction;
            }
            if &narrowed == current {
                continue;
            }
            wave.replace_cell(neighbor, narrowed);
            queue.push(neighbor);
        }
    }

    Propagation::Settled
}
