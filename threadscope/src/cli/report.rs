//! Plain-text report for `--headless`

use std::io::{self, Write};

use crate::analysis::{analyze_lock_contention, DumpSummary};
use crate::classification::Health;
use crate::thread_data::ThreadRecord;

/// Number of threads listed in the CPU section
pub const TOP_THREADS: usize = 10;

/// Write the summary, the busiest threads and the contended locks.
///
/// `threads` is printed in the order given; pass them CPU-sorted to get a
/// top-N list.
pub fn write_report<W: Write>(out: &mut W, threads: &[ThreadRecord], top: usize) -> io::Result<()> {
    let summary = DumpSummary::from_threads(threads);

    writeln!(out, "Threads: {} ({} daemon)", summary.total, summary.daemon)?;
    writeln!(
        out,
        "States:  RUNNABLE={} BLOCKED={} WAITING={} TIMED_WAITING={}",
        summary.runnable, summary.blocked, summary.waiting, summary.timed_waiting
    )?;
    let tiers: Vec<String> =
        Health::ALL.iter().map(|h| format!("{h}={}", summary.count(*h))).collect();
    writeln!(out, "Health:  {}", tiers.join(" "))?;

    writeln!(out)?;
    writeln!(out, "Top threads by CPU:")?;
    if threads.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for thread in threads.iter().take(top) {
        let cpu = thread.cpu_ms().map_or_else(|| "-".to_string(), |ms| format!("{ms:.2}ms"));
        let pct = thread.cpu_percent().map_or_else(|| "-".to_string(), |p| format!("{p:.2}%"));
        writeln!(
            out,
            "  {:<7} {:>12} {:>8}  {:<14} {}",
            thread.health().as_str(),
            cpu,
            pct,
            thread.state(),
            thread.name()
        )?;
    }

    let contended = analyze_lock_contention(threads);
    if !contended.is_empty() {
        writeln!(out)?;
        writeln!(out, "Contended locks:")?;
        for lock in &contended {
            match &lock.descriptor {
                Some(desc) => writeln!(out, "  <{}> ({desc})", lock.identity)?,
                None => writeln!(out, "  <{}>", lock.identity)?,
            }
            if !lock.owners.is_empty() {
                writeln!(out, "    owner:   {}", lock.owners.join(", "))?;
            }
            writeln!(out, "    waiters: {}", lock.waiters.join(", "))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_dump;

    fn report(dump: &str, top: usize) -> String {
        let mut out = Vec::new();
        write_report(&mut out, &parse_dump(dump), top).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_report_lists_summary_and_locks() {
        let dump = "\"a\" #1 nid=0x1\n   java.lang.Thread.State: BLOCKED (on object monitor)\n\t- waiting to lock <0x5> (a java.lang.Object)\n\n\"b\" #2 nid=0x2\n   java.lang.Thread.State: RUNNABLE\n\t- locked <0x5> (a java.lang.Object)\n";
        let text = report(dump, TOP_THREADS);

        assert!(text.starts_with("Threads: 2 (0 daemon)"));
        assert!(text.contains("BLOCKED=1"));
        assert!(text.contains("Health:  BLOCKED=1 HOT=0 ACTIVE=1 IDLE=0"));
        assert!(text.contains("<0x5> (a java.lang.Object)"));
        assert!(text.contains("owner:   b"));
        assert!(text.contains("waiters: a"));
    }

    #[test]
    fn test_report_respects_top_limit() {
        let dump = "\"first\" #1\n\n\"second\" #2\n";
        let text = report(dump, 1);
        assert!(text.contains("first"));
        assert!(!text.contains("second"));
        assert!(!text.contains("Contended locks"));
    }
}
