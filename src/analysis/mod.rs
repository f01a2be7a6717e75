//! Pattern learning from example tile grids
//!
//! Training grids are swept for unique NxN windows; the resulting patterns
//! carry occurrence weights, directional adjacency masks, and an index from
//! tile identifiers to the patterns anchored on them.

/// Overlap compatibility and per-direction adjacency masks
pub mod adjacency;
/// Window extraction, deduplication, weighting, and the tile index
pub mod patterns;
