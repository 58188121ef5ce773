//! Tabu Search (TS) over customer permutations.
//!
//! A single-solution trajectory that moves to the best admissible swap
//! neighbor every iteration. The short-term memory forbids re-swapping the
//! same two customers for `tabu_tenure` iterations, unless the swap yields a
//! new global best.
//!
//! # Key Types
//!
//! - [`TabuConfig`]: Algorithm parameters
//! - [`TabuRunner`]: Executes the search
//! - [`TabuResult`]: Best chromosome, move log and stop reason
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search, Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Gendreau, Hertz & Laporte (1994). "A Tabu Search Heuristic for the Vehicle Routing Problem", *Management Science* 40(10).

mod config;
mod runner;
mod types;

pub use config::TabuConfig;
pub use runner::{TabuResult, TabuRunner};
pub use types::{CustomerPair, TabuMemory, TabuStep, TabuStop};
