//! CLI command implementations.

pub mod deps;
pub mod emit;
pub mod sort;
