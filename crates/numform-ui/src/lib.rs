//! Terminal rendering for numform CLI output.
//!
//! Provides Ayu-themed color styling, terminal detection and a column layout
//! for printing result sets.

pub mod grid;
pub mod styles;
pub mod terminal;
