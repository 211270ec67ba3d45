//! Thread record model
//!
//! A [`ThreadRecord`] is created the moment the parser sees a thread header,
//! filled in through a [`ThreadRecordBuilder`] while the parser walks that
//! thread's lines, and frozen by [`ThreadRecordBuilder::build`], which derives
//! the CPU percentage and the health tier. Absent values are `None` here;
//! the `-1` / `null` / `""` conventions live only in the export layer.

use crate::classification::{classify_health, Health, STATE_UNKNOWN};
use crate::domain::{NativeThreadId, ThreadNumber};
use std::fmt;
use std::path::Path;

/// Relationship between a thread and a monitor, from a stack annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockKind {
    /// `- waiting to lock <..>` or `- waiting on <..>`
    WaitingOn,
    /// `- locked <..>`
    Locked,
    /// `- parking to wait for <..>`
    ParkingFor,
}

impl LockKind {
    /// Label used when rendering `lockInfo`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            LockKind::WaitingOn => "waiting on",
            LockKind::Locked => "locked",
            LockKind::ParkingFor => "parking for",
        }
    }

    /// True if the thread holds the lock rather than waiting for it.
    #[must_use]
    pub fn is_owner(self) -> bool {
        matches!(self, LockKind::Locked)
    }
}

/// One lock annotation found in a thread's stack body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockRelation {
    pub kind: LockKind,
    /// Lock identity as printed between the angle brackets, e.g. `0x00000000c01a2b30`
    pub identity: String,
    /// Optional parenthetical, e.g. `a java.lang.Object`
    pub descriptor: Option<String>,
}

impl fmt::Display for LockRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.kind.label(), self.identity)?;
        if let Some(desc) = &self.descriptor {
            write!(f, " ({desc})")?;
        }
        Ok(())
    }
}

/// A single thread parsed from a JVM thread dump (immutable once built)
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadRecord {
    name: String,
    thread_number: Option<ThreadNumber>,
    daemon: bool,
    priority: Option<u32>,
    os_priority: Option<u32>,
    native_id: Option<NativeThreadId>,
    vm_thread_id: Option<String>,
    cpu_ms: Option<f64>,
    elapsed_ms: Option<f64>,
    cpu_percent: Option<f64>,
    state: String,
    state_detail: String,
    locks: Vec<LockRelation>,
    lock_info: String,
    health: Health,
    stack_trace: String,
}

impl ThreadRecord {
    /// Quoted display name from the header line
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// JVM serial number (`#N`)
    #[must_use]
    pub fn thread_number(&self) -> Option<ThreadNumber> {
        self.thread_number
    }

    #[must_use]
    pub fn daemon(&self) -> bool {
        self.daemon
    }

    /// JVM priority (`prio=N`, 1-10)
    #[must_use]
    pub fn priority(&self) -> Option<u32> {
        self.priority
    }

    /// OS scheduling priority (`os_prio=N`)
    #[must_use]
    pub fn os_priority(&self) -> Option<u32> {
        self.os_priority
    }

    /// Native OS thread ID, hex and decimal forms together
    #[must_use]
    pub fn native_id(&self) -> Option<&NativeThreadId> {
        self.native_id.as_ref()
    }

    /// Native ID in hex, e.g. `0x1a2b`
    #[must_use]
    pub fn native_id_hex(&self) -> Option<&str> {
        self.native_id.as_ref().map(NativeThreadId::hex)
    }

    /// Native ID in decimal, matching the PID column of `top -H`
    #[must_use]
    pub fn native_id_decimal(&self) -> Option<String> {
        self.native_id.as_ref().map(NativeThreadId::decimal)
    }

    /// JVM internal thread pointer (`tid=0x...`), informational only
    #[must_use]
    pub fn vm_thread_id(&self) -> Option<&str> {
        self.vm_thread_id.as_deref()
    }

    /// CPU time consumed since thread start, in milliseconds
    #[must_use]
    pub fn cpu_ms(&self) -> Option<f64> {
        self.cpu_ms
    }

    /// Wall-clock time since thread start, in milliseconds
    #[must_use]
    pub fn elapsed_ms(&self) -> Option<f64> {
        self.elapsed_ms
    }

    /// `cpu_ms / elapsed_ms * 100`, only when both are known and elapsed is positive
    #[must_use]
    pub fn cpu_percent(&self) -> Option<f64> {
        self.cpu_percent
    }

    /// `java.lang.Thread.State` token, `UNKNOWN` when no state line was found
    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Remainder of the state line, e.g. `(on object monitor)`
    #[must_use]
    pub fn state_detail(&self) -> &str {
        &self.state_detail
    }

    /// Lock annotations in stack order
    #[must_use]
    pub fn locks(&self) -> &[LockRelation] {
        &self.locks
    }

    /// Lock annotations rendered as `"locked <0x1>; waiting on <0x2>"`
    #[must_use]
    pub fn lock_info(&self) -> &str {
        &self.lock_info
    }

    #[must_use]
    pub fn health(&self) -> Health {
        self.health
    }

    /// Stack body lines, trimmed as a block and joined with `\n`
    #[must_use]
    pub fn stack_trace(&self) -> &str {
        &self.stack_trace
    }
}

/// Mutable accumulator for one thread block, scoped to the parsing loop.
#[derive(Debug, Clone)]
pub struct ThreadRecordBuilder {
    name: String,
    thread_number: Option<ThreadNumber>,
    daemon: bool,
    priority: Option<u32>,
    os_priority: Option<u32>,
    native_id: Option<NativeThreadId>,
    vm_thread_id: Option<String>,
    cpu_ms: Option<f64>,
    elapsed_ms: Option<f64>,
    state: Option<String>,
    state_detail: String,
    locks: Vec<LockRelation>,
    stack_lines: Vec<String>,
}

impl ThreadRecordBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            thread_number: None,
            daemon: false,
            priority: None,
            os_priority: None,
            native_id: None,
            vm_thread_id: None,
            cpu_ms: None,
            elapsed_ms: None,
            state: None,
            state_detail: String::new(),
            locks: Vec::new(),
            stack_lines: Vec::new(),
        }
    }

    #[must_use]
    pub fn thread_number(mut self, number: Option<ThreadNumber>) -> Self {
        self.thread_number = number;
        self
    }

    #[must_use]
    pub fn daemon(mut self, daemon: bool) -> Self {
        self.daemon = daemon;
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: Option<u32>) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn os_priority(mut self, os_priority: Option<u32>) -> Self {
        self.os_priority = os_priority;
        self
    }

    #[must_use]
    pub fn native_id(mut self, native_id: Option<NativeThreadId>) -> Self {
        self.native_id = native_id;
        self
    }

    #[must_use]
    pub fn vm_thread_id(mut self, tid: Option<String>) -> Self {
        self.vm_thread_id = tid;
        self
    }

    #[must_use]
    pub fn cpu_ms(mut self, cpu_ms: Option<f64>) -> Self {
        self.cpu_ms = cpu_ms;
        self
    }

    #[must_use]
    pub fn elapsed_ms(mut self, elapsed_ms: Option<f64>) -> Self {
        self.elapsed_ms = elapsed_ms;
        self
    }

    /// Set the state token and its trailing annotation.
    pub fn set_state(&mut self, state: impl Into<String>, detail: impl Into<String>) {
        self.state = Some(state.into());
        self.state_detail = detail.into();
    }

    pub fn push_lock(&mut self, lock: LockRelation) {
        self.locks.push(lock);
    }

    /// Append a raw stack body line, kept verbatim.
    pub fn push_stack_line(&mut self, line: impl Into<String>) {
        self.stack_lines.push(line.into());
    }

    /// Derive CPU percentage and health, and freeze the record.
    #[must_use]
    pub fn build(self) -> ThreadRecord {
        let cpu_percent = match (self.cpu_ms, self.elapsed_ms) {
            (Some(cpu), Some(elapsed)) if elapsed > 0.0 => Some(cpu / elapsed * 100.0),
            _ => None,
        };
        let state = self.state.unwrap_or_else(|| STATE_UNKNOWN.to_string());
        let health = classify_health(&state, cpu_percent);
        let lock_info =
            self.locks.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
        let stack_trace = self.stack_lines.join("\n").trim().to_string();

        ThreadRecord {
            name: self.name,
            thread_number: self.thread_number,
            daemon: self.daemon,
            priority: self.priority,
            os_priority: self.os_priority,
            native_id: self.native_id,
            vm_thread_id: self.vm_thread_id,
            cpu_ms: self.cpu_ms,
            elapsed_ms: self.elapsed_ms,
            cpu_percent,
            state,
            state_detail: self.state_detail,
            locks: self.locks,
            lock_info,
            health,
            stack_trace,
        }
    }
}

/// Sort records by CPU time, highest first.
///
/// Records without a CPU value sort last; ties keep their document order.
pub fn sort_by_cpu_desc(threads: &mut [ThreadRecord]) {
    threads.sort_by(|a, b| {
        let a_cpu = a.cpu_ms.unwrap_or(f64::NEG_INFINITY);
        let b_cpu = b.cpu_ms.unwrap_or(f64::NEG_INFINITY);
        b_cpu.total_cmp(&a_cpu)
    });
}

/// All threads of one dump, in document order
#[derive(Debug, Clone, Default)]
pub struct ThreadDump {
    pub threads: Vec<ThreadRecord>,
}

impl ThreadDump {
    /// Parse dump text. Never fails; an unrecognized dump yields no threads.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        Self { threads: crate::parser::parse_dump(content) }
    }

    /// Read and parse a dump file.
    ///
    /// Invalid UTF-8 is replaced rather than rejected, since dumps are often
    /// captured through tools that mangle encodings.
    pub fn from_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.threads.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    /// Threads sorted for presentation (highest CPU first)
    #[must_use]
    pub fn sorted_by_cpu(&self) -> Vec<ThreadRecord> {
        let mut threads = self.threads.clone();
        sort_by_cpu_desc(&mut threads);
        threads
    }
}
