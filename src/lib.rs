//! Tile-based wave function collapse for grid synthesis
//!
//! The system learns the local structure of one or more example tile grids as
//! a set of weighted NxN patterns with directional adjacency rules, then
//! synthesizes new grids of arbitrary size whose every neighborhood matches
//! the learned statistics.

#![forbid(unsafe_code)]

/// Core solving machinery: bitsets, propagation queue, constraint solver, and model
pub mod algorithm;
/// Pattern extraction and adjacency analysis of training grids
pub mod analysis;
/// Error handling, configuration defaults, and solve diagnostics
pub mod io;
/// Entropy and weighted sampling utilities
pub mod math;
/// Grid and direction primitives
pub mod spatial;

pub use algorithm::model::WfcModel;
pub use io::error::{GenerationError, Result};
