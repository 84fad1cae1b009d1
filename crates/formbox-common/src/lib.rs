//! Common utilities for the formbox layout engine.
//!
//! This crate provides shared infrastructure used by all formbox components:
//! - **Warning System** - deduplicated diagnostics for malformed style input

pub mod warning;
