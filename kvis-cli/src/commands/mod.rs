//! Command implementations for the kvis CLI
//!
//! Each command module provides a `run` function that executes the command logic.

pub mod render;
