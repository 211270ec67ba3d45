//! JSON output contract
//!
//! One object per thread, keys in a fixed order:
//!
//! ```json
//! {"name":"main","threadNum":1,"state":"RUNNABLE","stateDetail":"","daemon":false,
//!  "priority":5,"osPriority":0,"tid":"0x00007f00","nid":"0x2a03","nidDecimal":"10755",
//!  "cpuMs":812.5,"elapsedMs":1000.0,"cpuPercent":81.25,"lockInfo":"","health":"HOT",
//!  "stackTrace":"at com.example.Main.main(Main.java:10)"}
//! ```
//!
//! Absence rules:
//! - strings: `""`
//! - floats (`cpuMs`, `elapsedMs`, `cpuPercent`): `null`; present values are
//!   rounded half-up to two decimals
//! - integers (`threadNum`, `priority`, `osPriority`): `-1`, never `null`.
//!   Consumers must treat `-1` as "not in dump".

use crate::classification::Health;
use crate::domain::ExportError;
use crate::thread_data::ThreadRecord;
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Integer value emitted for an absent integer field.
pub const ABSENT_INT: i64 = -1;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThreadJson<'a> {
    name: &'a str,
    thread_num: i64,
    state: &'a str,
    state_detail: &'a str,
    daemon: bool,
    priority: i64,
    os_priority: i64,
    tid: &'a str,
    nid: &'a str,
    nid_decimal: String,
    cpu_ms: Option<f64>,
    elapsed_ms: Option<f64>,
    cpu_percent: Option<f64>,
    lock_info: &'a str,
    health: Health,
    stack_trace: &'a str,
}

impl<'a> From<&'a ThreadRecord> for ThreadJson<'a> {
    fn from(t: &'a ThreadRecord) -> Self {
        Self {
            name: t.name(),
            thread_num: t.thread_number().map_or(ABSENT_INT, |n| i64::from(n.0)),
            state: t.state(),
            state_detail: t.state_detail(),
            daemon: t.daemon(),
            priority: int_or_absent(t.priority()),
            os_priority: int_or_absent(t.os_priority()),
            tid: t.vm_thread_id().unwrap_or_default(),
            nid: t.native_id_hex().unwrap_or_default(),
            nid_decimal: t.native_id_decimal().unwrap_or_default(),
            cpu_ms: t.cpu_ms().map(round2),
            elapsed_ms: t.elapsed_ms().map(round2),
            cpu_percent: t.cpu_percent().map(round2),
            lock_info: t.lock_info(),
            health: t.health(),
            stack_trace: t.stack_trace(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorJson<'a> {
    error: &'a str,
}

fn int_or_absent(value: Option<u32>) -> i64 {
    value.map_or(ABSENT_INT, i64::from)
}

/// Round half-up at the hundredths digit (values are never negative).
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `{"error":"..."}` body for reporting a failed analysis.
#[must_use]
pub fn error_json(message: &str) -> String {
    // A struct holding one &str cannot fail to serialize
    serde_json::to_string(&ErrorJson { error: message }).unwrap_or_default()
}

/// Writes thread records as a JSON array, in the order given.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadJsonExporter {
    pretty: bool,
}

impl ThreadJsonExporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Indent output for humans instead of emitting a single line.
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Serialize to a string.
    pub fn to_string(&self, threads: &[ThreadRecord]) -> Result<String, ExportError> {
        let mut buffer = Vec::new();
        self.export(&mut buffer, threads)?;
        String::from_utf8(buffer).map_err(|e| ExportError::WriteFailed(e.to_string()))
    }

    /// Serialize into `writer`.
    pub fn export<W: Write>(&self, mut writer: W, threads: &[ThreadRecord]) -> Result<(), ExportError> {
        let rows: Vec<ThreadJson<'_>> = threads.iter().map(ThreadJson::from).collect();
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, &rows)?;
        } else {
            serde_json::to_writer(&mut writer, &rows)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Serialize into a new file at `path`.
    pub fn export_to_file(&self, path: &Path, threads: &[ThreadRecord]) -> Result<(), ExportError> {
        let file = File::create(path)
            .map_err(|e| ExportError::WriteFailed(format!("{}: {e}", path.display())))?;
        self.export(BufWriter::new(file), threads)?;
        info!("Exported {} threads to {}", threads.len(), path.display());
        Ok(())
    }
}
