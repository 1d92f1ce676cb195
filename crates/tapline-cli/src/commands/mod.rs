//! CLI command implementations.

pub mod design;
pub mod sine;
pub mod taps;
