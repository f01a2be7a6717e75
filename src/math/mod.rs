//! Mathematical utilities for entropy and weighted sampling

/// Shannon entropy and cumulative weighted draw helpers
pub mod probability;
