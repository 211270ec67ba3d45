//! Command-line interface

pub mod args;
pub mod report;

pub use args::Args;
pub use report::{write_report, TOP_THREADS};
