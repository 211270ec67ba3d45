//! Thread export functionality
//!
//! Renders parsed threads as JSON for the browser frontend or any other
//! consumer. The wire format keeps "absent" distinguishable from zero.

pub mod json;

pub use json::{error_json, round2, ThreadJsonExporter};
