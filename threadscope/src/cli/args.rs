//! CLI argument definitions

use crate::analysis::ThreadFilter;
use crate::classification::Health;
use clap::Parser;
use std::path::PathBuf;

/// Default cap on dump size read into memory (64 MiB)
pub const DEFAULT_MAX_BYTES: u64 = 64 * 1024 * 1024;

#[derive(Parser, Debug)]
#[command(
    name = "threadscope",
    version,
    about = "Analyze JVM thread dumps: CPU hogs, blocked threads, lock contention",
    after_help = "\
EXAMPLES:
    threadscope dump.txt                         Browse threads interactively
    jstack 4242 | threadscope - --json           Print JSON, busiest threads first
    threadscope dump.txt --export threads.json   Save JSON for the web frontend
    threadscope dump.txt --headless --health hot Text summary of hot threads"
)]
pub struct Args {
    /// Thread dump file ("-" reads stdin)
    #[arg(value_name = "DUMP")]
    pub dump: PathBuf,

    /// Write the thread list as JSON to FILE
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Print the thread list as JSON to stdout instead of starting the TUI
    #[arg(long, conflicts_with = "headless")]
    pub json: bool,

    /// Print a text report instead of starting the TUI
    #[arg(long)]
    pub headless: bool,

    /// Indent JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Only keep threads in this health tier (blocked, hot, active, idle)
    #[arg(long, value_name = "TIER")]
    pub health: Option<Health>,

    /// Only keep threads in this state (e.g. RUNNABLE, TIMED_WAITING)
    #[arg(long, value_name = "STATE")]
    pub state: Option<String>,

    /// Only keep threads whose name contains TEXT (case-insensitive)
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Keep threads in dump order instead of sorting by CPU time
    #[arg(long)]
    pub document_order: bool,

    /// Refuse dumps larger than this many bytes
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_BYTES)]
    pub max_bytes: u64,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Filter built from `--health`, `--state` and `--search`.
    #[must_use]
    pub fn filter(&self) -> ThreadFilter {
        ThreadFilter {
            search: self.search.clone(),
            state: self.state.clone(),
            health: self.health,
        }
    }

    /// True when reading the dump from stdin
    #[must_use]
    pub fn reads_stdin(&self) -> bool {
        self.dump.as_os_str() == "-"
    }
}
