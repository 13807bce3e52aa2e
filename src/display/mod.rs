//! Terminal display utilities for CLI output.

pub mod tables;
pub mod theme;

pub use tables::create_generate_table;
pub use theme::{Outcome, THEME, Theme};
