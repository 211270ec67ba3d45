//! JVM thread dump parser
//!
//! Turns the text of a `jstack` / `jcmd Thread.print` / `kill -3` capture
//! into one [`ThreadRecord`] per thread, in document order.
//!
//! ## Segmentation
//!
//! ```text
//! "name" #N ... header         ← header::parse_header()
//! <blank lines>                ← skipped
//!    java.lang.Thread.State: X ← body::parse_state_line() (only this line)
//!         at ...               ← body::collect_stack()
//!         - locked <0x..>        (lock annotations recorded)
//! <blank>                      ← consumed, block ends
//! ```
//!
//! A block also ends, without consuming the line, at the next quoted header
//! or at end-of-section metadata (`JNI global ...`, `Found ...`).
//!
//! The parser is total: lines that are not headers are skipped, missing
//! fields stay `None`, and text without headers yields an empty `Vec`.

pub mod body;
pub mod header;

use crate::thread_data::ThreadRecord;
use log::{debug, info};

pub use body::{collect_stack, lock_relations, parse_state_line};
pub use header::{header_name, parse_header};

/// Parse dump text into thread records, in document order.
///
/// Accepts `\n` and `\r\n` line endings.
#[must_use]
pub fn parse_dump(content: &str) -> Vec<ThreadRecord> {
    let lines: Vec<&str> = content.lines().collect();
    let mut threads = Vec::new();
    let mut idx = 0;

    while idx < lines.len() {
        let Some(mut builder) = parse_header(lines[idx].trim()) else {
            idx += 1;
            continue;
        };

        let mut next = idx + 1;
        while lines.get(next).is_some_and(|l| l.trim().is_empty()) {
            next += 1;
        }

        // Only the first non-blank line may carry the state
        if let Some((state, detail)) = lines.get(next).and_then(|l| parse_state_line(l.trim())) {
            builder.set_state(state, detail);
            next += 1;
        }

        next = collect_stack(&lines, next, &mut builder);

        let record = builder.build();
        debug!(
            "Parsed thread \"{}\" state={} health={} locks={}",
            record.name(),
            record.state(),
            record.health(),
            record.locks().len()
        );
        threads.push(record);
        idx = next;
    }

    info!("Parsed {} threads from {} lines", threads.len(), lines.len());
    threads
}
