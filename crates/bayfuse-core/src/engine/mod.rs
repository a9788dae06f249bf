//! The bayfuse engine.
//!
//! This module provides:
//! - **errors**: Error types for the model layer and the merge pipeline
//! - **table**: Conditional probability tables and assignment enumeration
//! - **network**: The Bayesian network structure with its open/finalized
//!   lifecycle and validation
//! - **merge**: Label classification and the network merge algorithm

pub mod errors;
pub mod merge;
pub mod network;
pub mod table;
