//! Algorithm constants and runtime configuration defaults

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default maximum solve attempts before reporting exhaustion
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Smallest meaningful pattern window; a 1x1 window carries no adjacency information
pub const MIN_PATTERN_SIZE: usize = 2;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed output grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;
