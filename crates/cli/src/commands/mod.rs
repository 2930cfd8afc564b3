//! Subcommand implementations.

pub mod cart;
pub mod forms;
