//! Unit test harness mirroring the src module tree

mod algorithm;
mod analysis;
mod io;
mod math;
mod spatial;
