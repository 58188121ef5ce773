//! Capacitated vehicle routing by permutation decoding.
//!
//! Every search in this crate works on the same representation: a
//! permutation of customer ids, split into depot-to-depot routes by a
//! capacity-aware left-to-right scan. On top of that shared codec sit three
//! engines:
//!
//! - **Genetic Algorithm (GA)**: tournament selection, order crossover,
//!   swap mutation, elitism and optional bounded 2-opt refinement.
//! - **Tabu Search (TS)**: best-improvement swap neighborhood with a
//!   customer-pair tabu memory and best-ever aspiration.
//! - **Simulated Annealing (SA)**: random swaps under Metropolis acceptance
//!   with geometric cooling and an optional time budget.
//!
//! Supporting modules:
//!
//! - [`instance`]: validated problem data and the text-format parser.
//! - [`codec`]: decoding, route cost and the penalized fitness.
//! - [`greedy`]: nearest-neighbor baseline.
//! - [`harness`]: repeated seeded runs and one-line summaries.
//!
//! # Example
//!
//! ```
//! use u_cvrp::codec::Evaluator;
//! use u_cvrp::instance::Instance;
//! use u_cvrp::tabu::{TabuConfig, TabuRunner};
//!
//! let text = "\
//! NAME : triangle
//! DIMENSION : 3
//! CAPACITY : 10
//! EDGE_WEIGHT_SECTION
//! 0 3 4
//! 3 0 5
//! 4 5 0
//! DEMAND_SECTION
//! 1 0
//! 2 5
//! 3 5
//! ";
//! let inst = Instance::parse(text).unwrap();
//! let evaluator = Evaluator::new(&inst);
//! let result = TabuRunner::run(&evaluator, &TabuConfig::default().with_seed(7)).unwrap();
//! let solution = evaluator.solution(&result.best);
//! assert_eq!(solution.routes.len(), 1);
//! assert!((solution.cost - 12.0).abs() < 1e-9);
//! ```
//!
//! # Logging
//!
//! Progress is reported through the [`log`] facade. The crate never installs
//! a logger.

pub mod codec;
pub mod error;
pub mod ga;
pub mod greedy;
pub mod harness;
pub mod instance;
pub mod random;
pub mod sa;
pub mod tabu;

pub use codec::{Evaluator, Solution};
pub use error::{CvrpError, InstanceError, SummaryError};
pub use instance::Instance;
