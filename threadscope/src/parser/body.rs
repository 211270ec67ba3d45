//! State line and stack body of a thread block.
//!
//! ```text
//!    java.lang.Thread.State: BLOCKED (on object monitor)
//!         at com.example.Cache.get(Cache.java:42)
//!         - waiting to lock <0x00000000c01a2b30> (a java.lang.Object)
//!         at com.example.Handler.run(Handler.java:17)
//!         - locked <0x00000000c0ffee00> (a com.example.Handler)
//! ```

use crate::thread_data::{LockKind, LockRelation, ThreadRecordBuilder};
use regex::Regex;
use std::sync::LazyLock;

static STATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:java\.lang\.)?Thread\.State:\s*(\S+)\s*(.*)").expect("state pattern")
});

static LOCK_WAIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-\s*waiting (?:to lock|on) <([^>]+)>(?:\s*\((.+?)\))?").expect("wait pattern")
});
static LOCKED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-\s*locked <([^>]+)>(?:\s*\((.+?)\))?").expect("locked pattern")
});
static PARKING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-\s*parking to wait for\s*<([^>]+)>(?:\s*\((.+?)\))?").expect("parking pattern")
});

/// Checked against every stack line, in this order.
static LOCK_PATTERNS: [(&LazyLock<Regex>, LockKind); 3] = [
    (&LOCK_WAIT, LockKind::WaitingOn),
    (&LOCKED, LockKind::Locked),
    (&PARKING, LockKind::ParkingFor),
];

/// Lines starting with these end the thread section of a dump.
const SECTION_TERMINATORS: &[&str] = &["JNI global", "Found "];

/// Read `(state, detail)` from a trimmed state line.
#[must_use]
pub fn parse_state_line(line: &str) -> Option<(String, String)> {
    let caps = STATE.captures(line)?;
    let state = caps.get(1)?.as_str().trim().to_string();
    let detail = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
    Some((state, detail))
}

/// Lock annotations on a single trimmed stack line.
pub fn lock_relations(line: &str) -> impl Iterator<Item = LockRelation> + '_ {
    LOCK_PATTERNS.iter().filter_map(move |(re, kind)| {
        let caps = re.captures(line)?;
        Some(LockRelation {
            kind: *kind,
            identity: caps.get(1)?.as_str().to_string(),
            descriptor: caps.get(2).map(|m| m.as_str().to_string()),
        })
    })
}

/// How a stack body line affects collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyLine {
    /// Blank: consumed, ends the body
    Blank,
    /// Next thread header or end-of-section metadata: not consumed
    Boundary,
    Frame,
}

fn classify_body_line(trimmed: &str) -> BodyLine {
    if trimmed.is_empty() {
        BodyLine::Blank
    } else if trimmed.starts_with('"')
        || SECTION_TERMINATORS.iter().any(|marker| trimmed.starts_with(marker))
    {
        BodyLine::Boundary
    } else {
        BodyLine::Frame
    }
}

/// Collect stack lines starting at `start`, recording lock annotations.
///
/// Returns the index of the first line not consumed.
pub fn collect_stack(lines: &[&str], start: usize, builder: &mut ThreadRecordBuilder) -> usize {
    let mut idx = start;
    while let Some(line) = lines.get(idx) {
        let trimmed = line.trim();
        match classify_body_line(trimmed) {
            BodyLine::Blank => return idx + 1,
            BodyLine::Boundary => return idx,
            BodyLine::Frame => {
                for lock in lock_relations(trimmed) {
                    builder.push_lock(lock);
                }
                builder.push_stack_line(*line);
                idx += 1;
            }
        }
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_with_detail() {
        let (state, detail) =
            parse_state_line("java.lang.Thread.State: TIMED_WAITING (sleeping)").unwrap();
        assert_eq!(state, "TIMED_WAITING");
        assert_eq!(detail, "(sleeping)");
    }

    #[test]
    fn test_state_without_detail() {
        let (state, detail) = parse_state_line("java.lang.Thread.State: RUNNABLE").unwrap();
        assert_eq!(state, "RUNNABLE");
        assert_eq!(detail, "");
    }

    #[test]
    fn test_not_a_state_line() {
        assert!(parse_state_line("at java.lang.Object.wait(Native Method)").is_none());
        assert!(parse_state_line("java.lang.Thread.State:").is_none());
    }

    #[test]
    fn test_waiting_to_lock_with_descriptor() {
        let locks: Vec<_> =
            lock_relations("- waiting to lock <0x000000076ab62208> (a java.lang.Object)").collect();
        assert_eq!(locks.len(), 1);
        assert_eq!(locks[0].kind, LockKind::WaitingOn);
        assert_eq!(locks[0].identity, "0x000000076ab62208");
        assert_eq!(locks[0].descriptor.as_deref(), Some("a java.lang.Object"));
        assert_eq!(locks[0].to_string(), "waiting on <0x000000076ab62208> (a java.lang.Object)");
    }

    #[test]
    fn test_parking_without_descriptor() {
        let locks: Vec<_> = lock_relations("- parking to wait for  <0x1>").collect();
        assert_eq!(locks.len(), 1);
        assert_eq!(locks[0].to_string(), "parking for <0x1>");
    }

    #[test]
    fn test_frame_line_has_no_locks() {
        assert_eq!(lock_relations("at java.lang.Thread.run(Thread.java:750)").count(), 0);
    }

    #[test]
    fn test_collect_stops_at_blank_and_consumes_it() {
        let lines = ["\tat a.A.a(A.java:1)", "\t- locked <0x1>", "", "\"next\" #2"];
        let mut builder = ThreadRecordBuilder::new("t");
        let next = collect_stack(&lines, 0, &mut builder);
        assert_eq!(next, 3);
        let record = builder.build();
        assert_eq!(record.stack_trace(), "at a.A.a(A.java:1)\n\t- locked <0x1>");
        assert_eq!(record.lock_info(), "locked <0x1>");
    }

    #[test]
    fn test_collect_stops_at_header_without_consuming() {
        let lines = ["\tat a.A.a(A.java:1)", "\"next\" #2 prio=5"];
        let mut builder = ThreadRecordBuilder::new("t");
        assert_eq!(collect_stack(&lines, 0, &mut builder), 1);
    }

    #[test]
    fn test_collect_stops_at_section_terminators() {
        let lines = ["\tat a.A.a(A.java:1)", "JNI global refs: 15, weak refs: 0"];
        let mut builder = ThreadRecordBuilder::new("t");
        assert_eq!(collect_stack(&lines, 0, &mut builder), 1);

        let lines = ["Found one Java-level deadlock:"];
        let mut builder = ThreadRecordBuilder::new("t");
        assert_eq!(collect_stack(&lines, 0, &mut builder), 0);
        assert_eq!(builder.build().stack_trace(), "");
    }

    #[test]
    fn test_collect_runs_to_end_of_input() {
        let lines = ["\tat a.A.a(A.java:1)", "\tat a.A.b(A.java:2)"];
        let mut builder = ThreadRecordBuilder::new("t");
        assert_eq!(collect_stack(&lines, 0, &mut builder), 2);
    }
}
