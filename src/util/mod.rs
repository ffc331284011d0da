//! Shared utilities for the batching engine.
//!
//! Helpers for frame timing and the pop-in growth curve.

pub mod frame_timing;
pub mod growth;
