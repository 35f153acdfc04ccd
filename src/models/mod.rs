//! Defines the data structures produced by the GIOS air quality client.
//!
//! These are the normalized, strongly-shaped records handed back to callers;
//! the loosely-typed upstream JSON never leaves the `decode` module.

mod gios;

pub use gios::*;
