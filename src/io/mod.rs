//! Error handling, configuration defaults, and solve diagnostics

/// Algorithm constants and tunable defaults
pub mod configuration;
/// Error types for learning and generation
pub mod error;
/// Advisory phase-timing capture for solve runs
pub mod metrics;
