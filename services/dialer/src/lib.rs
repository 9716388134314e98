//! Ringout Dialer Library Crate
//!
//! Configuration, command-line parsing and the `start` / `end` commands for the
//! dialer binary. The binary in `bin/dialer.rs` is a thin wrapper around this library.

pub mod cli;
pub mod commands;
pub mod config;
