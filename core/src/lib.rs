//! Synthetic card-transaction dataset generation.
//!
//! A run builds a customer pool, then synthesizes transactions against a
//! fixed merchant catalog, all from one seeded master RNG. See
//! `engine.rs` for the execution order.

pub mod config;
pub mod customer;
pub mod engine;
pub mod error;
pub mod merchant;
pub mod rng;
pub mod sink;
pub mod summary;
pub mod synthesizer;
pub mod transaction;
pub mod types;
