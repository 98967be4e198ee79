//! Command-line interface for docscan.

mod commands;
pub mod icons;

pub use commands::{is_verbose, run};
