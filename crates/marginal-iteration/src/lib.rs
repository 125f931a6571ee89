//! # marginal-iteration
//!
//! Orchestrates the active-learning rounds of one experiment: obtain
//! the candidate pool, run selective sampling, submit queries for
//! annotation, retrain, and record the round's statistics.

pub mod controller;

pub use controller::{IterationController, RoundState, RoundStatus};
