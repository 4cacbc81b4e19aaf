//! Shared helpers for the engine's unit and integration tests.

pub mod logging;
pub mod unique_helpers;
