//! Command-line front end for `sfdc2openapi-core`.
//!
//! Argument parsing and configuration resolution live here so they can be
//! tested without spawning the binary. `bin/sfdc2openapi.rs` wires them to
//! logging and the generation pipeline.

pub mod cli;
pub mod config;
