//! Credential generator and benchmark utilities for credkit.
//!
//! This crate produces deterministic batches of credential numbers, valid
//! and deliberately corrupted, for benchmarking and property-based testing
//! of `credkit-core`.

pub mod generator;

pub use generator::{GeneratorConfig, Sample, SizeTier, generate_samples};
