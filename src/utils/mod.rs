//! Utility functions and types for geocluster.

pub mod random;

pub use random::{random_singletons, RandomSampler};
