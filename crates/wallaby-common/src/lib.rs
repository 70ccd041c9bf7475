//! Common utilities for the Wallaby layout engine.
//!
//! This crate provides shared infrastructure used by all engine components:
//! - **Warning System** - deduplicated degradation warnings
//! - **Logging** - `tracing` subscriber setup for binaries

pub mod logging;
pub mod warning;
