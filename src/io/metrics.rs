//! Advisory phase-timing capture for solve runs
//!
//! Timing is applied as a wrapper at the call boundary: the solver hands
//! each phase's work to [`timed`] together with an optional sink. With no
//! sink attached the work runs untouched, so tracing can never change a
//! solver outcome.

use std::time::{Duration, Instant};

/// Generation phases measured by a [`SolveTrace`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Pattern extraction, adjacency construction, and tile indexing
    Learning,
    /// Wave matrix initialization (once per attempt)
    WaveInit,
    /// Least-entropy cell scan including tie collection
    Entropy,
    /// Weighted collapse of a selected cell
    Observe,
    /// Breadth-first constraint propagation
    Propagate,
}

impl Phase {
    /// All phases in reporting order
    pub const ALL: [Self; 5] = [
        Self::Learning,
        Self::WaveInit,
        Self::Entropy,
        Self::Observe,
        Self::Propagate,
    ];

    const fn index(self) -> usize {
        match self {
            Self::Learning => 0,
            Self::WaveInit => 1,
            Self::Entropy => 2,
            Self::Observe => 3,
            Self::Propagate => 4,
        }
    }
}

/// Accumulated wall-clock time and call count for one phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhaseStats {
    /// Total time spent in the phase
    pub total: Duration,
    /// Number of times the phase ran
    pub calls: usize,
}

/// Timing capture across the phases of a learn-and-generate run
///
/// Purely advisory: it records durations and attempt counts and is never
/// consulted by the solver.
#[derive(Clone, Debug, Default)]
pub struct SolveTrace {
    phases: [PhaseStats; 5],
    attempts: usize,
}

impl SolveTrace {
    /// Create an empty trace
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one timed call to a phase
    pub fn record(&mut self, phase: Phase, elapsed: Duration) {
        if let Some(stats) = self.phases.get_mut(phase.index()) {
            stats.total += elapsed;
            stats.calls += 1;
        }
    }

    /// Count one wave matrix attempt (initial or restarted)
    pub const fn record_attempt(&mut self) {
        self.attempts += 1;
    }

    /// Number of wave matrix attempts recorded
    pub const fn attempts(&self) -> usize {
        self.attempts
    }

    /// Accumulated stats for one phase
    pub fn stats(&self, phase: Phase) -> PhaseStats {
        self.phases.get(phase.index()).copied().unwrap_or_default()
    }

    /// Combined time across all phases
    pub fn total_duration(&self) -> Duration {
        self.phases.iter().map(|stats| stats.total).sum()
    }

    /// Reset all recorded data
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Run an operation, recording its duration into an optional trace
///
/// The middleware applied at every phase boundary: when `trace` is `None`
/// the operation is invoked directly with no timing overhead.
pub fn timed<T>(trace: Option<&mut SolveTrace>, phase: Phase, operation: impl FnOnce() -> T) -> T {
    match trace {
        Some(sink) => {
            let started = Instant::now();
            let result = operation();
            sink.record(phase, started.elapsed());
            result
        }
        None => operation(),
    }
}
