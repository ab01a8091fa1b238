//! Aggregator crate for the SWAPI person lookup.
//!
//! This crate contains the `PersonAggregator`, which resolves a person and
//! the resources it references into one flat `PersonInfo`, and the
//! `Strategy` enum selecting how the concurrent fetches are composed.

pub mod aggregator;
pub mod strategy;

pub use aggregator::{assemble, PersonAggregator};
pub use strategy::Strategy;
