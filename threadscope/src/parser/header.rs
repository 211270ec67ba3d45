//! Thread header line extraction.
//!
//! A header looks like (fields vary by JDK version, any may be missing):
//!
//! ```text
//! "ZLogsAgent-3" #45 [644252] daemon prio=5 os_prio=0 cpu=55553.41ms elapsed=18271.47s tid=0x00007f1a2b3c nid=644252 waiting on condition
//! ```
//!
//! Every field is read by its own rule scanning the whole line, so field
//! order does not matter. Fields with several dialects are read through a
//! matcher chain: the first matcher that yields a value wins.

use crate::domain::{NativeThreadId, ThreadNumber};
use crate::thread_data::ThreadRecordBuilder;
use regex::Regex;
use std::sync::LazyLock;

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"(.+?)""#).expect("thread name pattern"));
static THREAD_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\d+)").expect("thread number pattern"));
// [644252]: OS thread ID in brackets (newer JDKs)
static BRACKET_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d+)\]").expect("bracket id pattern"));
static PRIORITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bprio=(\d+)").expect("priority pattern"));
static OS_PRIORITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"os_prio=(\d+)").expect("os priority pattern"));
static CPU: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"cpu=([\d.]+)ms").expect("cpu pattern"));
static ELAPSED_SECONDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"elapsed=([\d.]+)s\b").expect("elapsed seconds pattern"));
static ELAPSED_MILLIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"elapsed=([\d.]+)ms\b").expect("elapsed millis pattern"));
static VM_TID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"tid=(0x[0-9a-fA-F]+)").expect("tid pattern"));
static NID_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"nid=(0x[0-9a-fA-F]+)").expect("hex nid pattern"));
static NID_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bnid=(\d+)\b").expect("decimal nid pattern"));

const DAEMON_MARKER: &str = " daemon ";

/// One way of reading a field from a header line.
type Matcher<T> = fn(&str) -> Option<T>;

/// Elapsed time: seconds form (newer JDKs) before milliseconds form.
const ELAPSED_CHAIN: &[Matcher<f64>] = &[elapsed_seconds, elapsed_millis];

/// Native ID: hex `nid`, then decimal `nid`, then the `[N]` bracket.
const NATIVE_ID_CHAIN: &[Matcher<NativeThreadId>] = &[nid_hex, nid_decimal, bracketed_os_id];

/// Try each matcher in priority order, returning the first value produced.
fn first_match<T>(line: &str, chain: &[Matcher<T>]) -> Option<T> {
    chain.iter().find_map(|matcher| matcher(line))
}

/// Text of the first capture group of the first match.
fn capture<'a>(re: &Regex, line: &'a str) -> Option<&'a str> {
    re.captures(line).and_then(|caps| caps.get(1)).map(|m| m.as_str())
}

fn capture_u32(re: &Regex, line: &str) -> Option<u32> {
    capture(re, line).and_then(|v| v.parse().ok())
}

fn capture_f64(re: &Regex, line: &str) -> Option<f64> {
    capture(re, line).and_then(|v| v.parse().ok())
}

fn elapsed_seconds(line: &str) -> Option<f64> {
    capture_f64(&ELAPSED_SECONDS, line).map(|secs| secs * 1000.0)
}

fn elapsed_millis(line: &str) -> Option<f64> {
    capture_f64(&ELAPSED_MILLIS, line)
}

fn nid_hex(line: &str) -> Option<NativeThreadId> {
    capture(&NID_HEX, line).and_then(NativeThreadId::from_hex)
}

fn nid_decimal(line: &str) -> Option<NativeThreadId> {
    capture(&NID_DECIMAL, line).and_then(NativeThreadId::from_decimal)
}

/// First `[N]` after the `#N` token, so the thread number is never mistaken
/// for the OS ID. Heuristic: if a dialect prints another bracketed integer
/// before the OS ID, that one wins.
fn bracketed_os_id(line: &str) -> Option<NativeThreadId> {
    let search_from = THREAD_NUMBER.find(line).map_or(0, |m| m.end());
    capture(&BRACKET_ID, &line[search_from..]).and_then(NativeThreadId::from_decimal)
}

/// Extract the quoted thread name if `line` (already trimmed) is a header.
#[must_use]
pub fn header_name(line: &str) -> Option<&str> {
    capture(&NAME, line)
}

/// Start a record from a header line, or `None` if the line is not a header.
///
/// Numeric tokens that match a pattern but fail to convert (overflow,
/// `cpu=1.2.3ms`) are treated as absent.
#[must_use]
pub fn parse_header(line: &str) -> Option<ThreadRecordBuilder> {
    let name = header_name(line)?;

    Some(
        ThreadRecordBuilder::new(name)
            .thread_number(capture_u32(&THREAD_NUMBER, line).map(ThreadNumber))
            .priority(capture_u32(&PRIORITY, line))
            .os_priority(capture_u32(&OS_PRIORITY, line))
            .cpu_ms(capture_f64(&CPU, line))
            .elapsed_ms(first_match(line, ELAPSED_CHAIN))
            .native_id(first_match(line, NATIVE_ID_CHAIN))
            .vm_thread_id(capture(&VM_TID, line).map(str::to_string))
            .daemon(line.contains(DAEMON_MARKER)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thread_data::ThreadRecord;

    fn header(line: &str) -> ThreadRecord {
        parse_header(line).expect("header should match").build()
    }

    #[test]
    fn test_full_legacy_header() {
        let t = header(
            r#""ZLogsAgent-3" #45 daemon prio=5 os_prio=0 cpu=55553.41ms elapsed=123456.78ms tid=0x00007f1a2b3c nid=0x1a2b waiting on condition [0x00007f...]"#,
        );
        assert_eq!(t.name(), "ZLogsAgent-3");
        assert_eq!(t.thread_number(), Some(ThreadNumber(45)));
        assert!(t.daemon());
        assert_eq!(t.priority(), Some(5));
        assert_eq!(t.os_priority(), Some(0));
        assert_eq!(t.cpu_ms(), Some(55553.41));
        assert_eq!(t.elapsed_ms(), Some(123_456.78));
        assert_eq!(t.vm_thread_id(), Some("0x00007f1a2b3c"));
        assert_eq!(t.native_id_hex(), Some("0x1a2b"));
        assert_eq!(t.native_id_decimal().as_deref(), Some("6699"));
    }

    #[test]
    fn test_elapsed_seconds_converted() {
        let t = header(r#""main" #1 prio=5 cpu=100.00ms elapsed=2.50s tid=0x1 nid=0x2 runnable"#);
        assert_eq!(t.elapsed_ms(), Some(2500.0));
        assert!((t.cpu_percent().unwrap() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_elapsed_seconds_preferred_over_millis() {
        let t = header(r#""main" elapsed=9999ms elapsed=3s"#);
        assert_eq!(t.elapsed_ms(), Some(3000.0));
    }

    #[test]
    fn test_decimal_nid_derives_hex() {
        let t = header(r#""GC Thread#0" os_prio=0 cpu=1.5ms elapsed=20.0s tid=0x00007f nid=644252 runnable"#);
        assert_eq!(t.native_id_decimal().as_deref(), Some("644252"));
        assert_eq!(t.native_id_hex(), Some("0x9d49c"));
    }

    #[test]
    fn test_bracket_id_after_thread_number() {
        let t = header(r#""pool-1-thread-1" #23 [5123] prio=5 os_prio=0 waiting on condition [0x7f]"#);
        assert_eq!(t.native_id_decimal().as_deref(), Some("5123"));
        assert_eq!(t.native_id_hex(), Some("0x1403"));
    }

    #[test]
    fn test_bracket_id_skips_thread_number_area() {
        // "[7]" appears inside the name, before #N, and must not be used
        let t = header(r#""worker[7]" #12 [4242] prio=5"#);
        assert_eq!(t.native_id_decimal().as_deref(), Some("4242"));
    }

    #[test]
    fn test_bracket_id_without_thread_number_scans_whole_line() {
        let t = header(r#""VM Thread" [77] os_prio=0"#);
        assert_eq!(t.native_id_decimal().as_deref(), Some("77"));
        assert!(t.thread_number().is_none());
    }

    #[test]
    fn test_hex_nid_wins_over_bracket() {
        let t = header(r#""t" #3 [100] nid=0x10"#);
        assert_eq!(t.native_id_decimal().as_deref(), Some("16"));
    }

    #[test]
    fn test_overflowing_hex_nid_falls_back() {
        let t = header(r#""t" #3 [100] nid=0x1ffffffffffffffffff"#);
        assert_eq!(t.native_id_decimal().as_deref(), Some("100"));
        assert_eq!(t.native_id_hex(), Some("0x64"));
    }

    #[test]
    fn test_prio_does_not_match_os_prio() {
        let t = header(r#""t" os_prio=31"#);
        assert!(t.priority().is_none());
        assert_eq!(t.os_priority(), Some(31));
    }

    #[test]
    fn test_malformed_cpu_is_absent() {
        let t = header(r#""t" cpu=1.2.3ms elapsed=10.0s"#);
        assert!(t.cpu_ms().is_none());
        assert!(t.cpu_percent().is_none());
        assert_eq!(t.elapsed_ms(), Some(10_000.0));
    }

    #[test]
    fn test_minimal_header() {
        let t = header(r#""Signal Dispatcher""#);
        assert_eq!(t.name(), "Signal Dispatcher");
        assert!(!t.daemon());
        assert!(t.thread_number().is_none());
        assert!(t.priority().is_none());
        assert!(t.native_id().is_none());
        assert!(t.vm_thread_id().is_none());
        assert!(t.cpu_ms().is_none());
        assert!(t.elapsed_ms().is_none());
    }

    #[test]
    fn test_daemon_requires_surrounding_spaces() {
        assert!(!header(r#""daemon-thread" #2 prio=5"#).daemon());
        assert!(header(r#""x" #2 daemon prio=5"#).daemon());
    }

    #[test]
    fn test_non_header_lines() {
        assert!(parse_header("at java.lang.Thread.run(Thread.java:750)").is_none());
        assert!(parse_header("Full thread dump OpenJDK 64-Bit Server VM").is_none());
        assert!(parse_header(r#""""#).is_none());
        assert!(parse_header("").is_none());
    }
}
