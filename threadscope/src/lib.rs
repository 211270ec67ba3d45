//! # threadscope - JVM Thread Dump Analyzer
//!
//! threadscope reads the text of a JVM thread dump (`jstack`, `jcmd
//! Thread.print`, `kill -3`) and turns it into one normalized record per
//! thread, with derived CPU and health signals. It is meant for the moment a
//! service is slow or stuck and someone needs to know which threads are
//! spinning, which are blocked, and on what.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Thread dump text (file/stdin)                │
//! └───────────────────────┬─────────────────────────────────────────┘
//!                         │ lines
//!                         ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          parser                                 │
//! │  header::parse_header   → name, #N, prio, cpu, elapsed, nid ... │
//! │  body::parse_state_line → Thread.State + detail                 │
//! │  body::collect_stack    → stack lines + lock annotations        │
//! └───────────────────────┬─────────────────────────────────────────┘
//!                         │ ThreadRecordBuilder::build()
//!                         │   (cpu% + classification::classify_health)
//!                         ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 Vec<ThreadRecord> (document order)              │
//! └──────┬──────────────────────┬──────────────────────┬────────────┘
//!        ▼                      ▼                      ▼
//! ┌──────────────┐      ┌──────────────┐      ┌──────────────┐
//! │   Analysis   │      │    Export    │      │     TUI      │
//! │ sort/summary │      │    (JSON)    │      │  (Terminal)  │
//! │ filter/locks │      │              │      │              │
//! └──────────────┘      └──────────────┘      └──────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`]: segments dump text into thread blocks and extracts fields
//!   - `header`: matcher chains for the header line's JDK dialects
//!   - `body`: state line, stack body, lock annotations
//! - [`thread_data`]: [`ThreadRecord`](thread_data::ThreadRecord), its builder,
//!   and CPU ordering
//! - [`classification`]: health tiers (BLOCKED, HOT, ACTIVE, IDLE)
//! - [`analysis`]: transport entry point, summary counters, filtering,
//!   lock contention
//! - [`export`]: JSON output contract (`null` / `-1` / `""` for absent values)
//! - [`tui`]: interactive thread browser
//! - [`cli`]: command-line arguments
//! - [`domain`]: newtypes and error enums
//!
//! ## Header Dialects
//!
//! ```text
//! JDK 8:   "pool-1" #23 daemon prio=5 os_prio=0 tid=0x00007f.. nid=0x1a2b waiting on condition
//! JDK 11:  "pool-1" #23 daemon prio=5 os_prio=0 cpu=12.50ms elapsed=3600.25s tid=0x.. nid=0x1a2b ...
//! JDK 19+: "pool-1" #23 [6699] daemon prio=5 os_prio=0 cpu=12.50ms elapsed=3600.25s tid=0x.. nid=6699 ...
//! ```
//!
//! Every field is optional. Missing values stay `None` internally and are
//! only turned into wire sentinels by the export layer.
//!
//! ## Typical Usage
//!
//! ```bash
//! # Browse a dump interactively
//! threadscope dump.txt
//!
//! # Print JSON, busiest threads first
//! jstack 4242 | threadscope - --json
//!
//! # Summary of blocked threads only
//! threadscope dump.txt --headless --health blocked
//! ```

pub mod analysis;
pub mod classification;
pub mod cli;
pub mod domain;
pub mod export;
pub mod parser;
pub mod thread_data;
pub mod tui;
