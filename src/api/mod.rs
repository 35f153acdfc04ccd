//! Provides clients and utilities for interacting with external APIs.
//!
//! Includes:
//! - `gios`: Client for the GIOS air quality index API.

mod gios;

pub use gios::*;
