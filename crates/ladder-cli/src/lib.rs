//! CLI library components for the `ladder` binary.

pub mod commands;
pub mod logging;
