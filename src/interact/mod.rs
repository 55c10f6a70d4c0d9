//! Pointer interaction: hit-testing and drag gestures.

pub mod gesture;
