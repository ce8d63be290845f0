//! Repository functions for domain layer.

pub mod games;
pub mod turns;
