//! # Bayfuse Core
//!
//! Engine for merging two discrete Bayesian networks of binary variables
//! into a single consistent network.

pub mod engine;
pub mod scenarios;

// Re-export commonly used types
pub use engine::errors::{MergeError, ModelError};
pub use engine::merge::{
    classify, merge, merge_with, probabilistic_or, Classification, MergeOptions, TieBreak,
};
pub use engine::network::{BayesNet, Event};
pub use engine::table::{assignments, Assignment, ProbTable, TableLine};
