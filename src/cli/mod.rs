//! Handles the command-line front end.
//!
//! Includes argument parsing, configuration of the API client and rendering
//! of a fetched record as a table or JSON.

mod commands;

pub use commands::*;
