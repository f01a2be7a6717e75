/// Fixed-size pattern index sets with bitwise set algebra
pub mod bitset;
/// Orchestration binding the pattern learner to the constraint solver
pub mod model;
/// Breadth-first propagation queue
pub mod queue;
/// Wave matrix solving through observation and propagation
pub mod solver;
