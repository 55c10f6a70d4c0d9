//! Ordered, reversible layer effects.

pub mod config;
pub mod filter;
pub mod pipeline;
pub mod transform;
