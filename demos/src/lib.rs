//! Shared helpers for the runnable positivity demos.
pub mod common;
