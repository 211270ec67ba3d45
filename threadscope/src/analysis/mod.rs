//! Analysis over parsed threads
//!
//! This module contains pure logic over parsed thread records, separated
//! from the TUI presentation layer:
//!
//! - [`analyze_dump`] - the entry point a transport calls with dump text
//! - [`parse_checked`] - same checks, document order kept
//! - [`DumpSummary`] - state / health / daemon counters
//! - [`ThreadFilter`] - name search and state / health filtering
//! - [`analyze_lock_contention`] - monitors with queued threads

pub mod contention;
pub mod filter;
pub mod summary;

pub use contention::{analyze_lock_contention, LockContention};
pub use filter::{distinct_states, ThreadFilter};
pub use summary::DumpSummary;

use crate::domain::AnalyzeError;
use crate::parser::parse_dump;
use crate::thread_data::{sort_by_cpu_desc, ThreadRecord};
use log::{info, warn};

/// Parse dump text, keeping document order.
///
/// Blank payloads and dumps without a single thread header are reported as
/// errors so the caller can surface an input-validation failure; the parser
/// itself treats both as an empty, successful result.
pub fn parse_checked(content: &str) -> Result<Vec<ThreadRecord>, AnalyzeError> {
    if content.trim().is_empty() {
        return Err(AnalyzeError::EmptyInput);
    }

    let threads = parse_dump(content);
    if threads.is_empty() {
        warn!("No thread headers found in {} bytes of input", content.len());
        return Err(AnalyzeError::NoThreadsFound);
    }
    Ok(threads)
}

/// Parse dump text and order the threads for presentation (highest CPU first).
pub fn analyze_dump(content: &str) -> Result<Vec<ThreadRecord>, AnalyzeError> {
    let mut threads = parse_checked(content)?;
    sort_by_cpu_desc(&mut threads);
    info!("Analyzed {} threads", threads.len());
    Ok(threads)
}
