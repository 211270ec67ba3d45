//! Dump-level counters shown above the thread list.

use crate::classification::{
    Health, STATE_BLOCKED, STATE_RUNNABLE, STATE_TIMED_WAITING, STATE_WAITING,
};
use crate::thread_data::ThreadRecord;

/// Thread counts for one dump.
///
/// ```text
/// Threads 214  Runnable 31  Blocked 4  Waiting 97  Timed 82  Hot 2  Daemon 180
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpSummary {
    pub total: usize,
    pub runnable: usize,
    pub blocked: usize,
    pub waiting: usize,
    pub timed_waiting: usize,
    pub daemon: usize,
    /// Indexed in `Health::ALL` order
    health: [usize; 4],
}

impl DumpSummary {
    #[must_use]
    pub fn from_threads(threads: &[ThreadRecord]) -> Self {
        threads.iter().fold(Self::default(), |mut acc, t| {
            acc.total += 1;
            match t.state() {
                STATE_RUNNABLE => acc.runnable += 1,
                STATE_BLOCKED => acc.blocked += 1,
                STATE_WAITING => acc.waiting += 1,
                STATE_TIMED_WAITING => acc.timed_waiting += 1,
                _ => {}
            }
            if t.daemon() {
                acc.daemon += 1;
            }
            acc.health[health_slot(t.health())] += 1;
            acc
        })
    }

    /// Number of threads in a health tier
    #[must_use]
    pub fn count(&self, health: Health) -> usize {
        self.health[health_slot(health)]
    }

    #[must_use]
    pub fn hot(&self) -> usize {
        self.count(Health::Hot)
    }

    /// True if any thread is blocked or hot
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        Health::ALL.iter().any(|h| h.needs_attention() && self.count(*h) > 0)
    }
}

fn health_slot(health: Health) -> usize {
    match health {
        Health::Blocked => 0,
        Health::Hot => 1,
        Health::Active => 2,
        Health::Idle => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thread_data::ThreadRecordBuilder;

    fn thread(state: &str, cpu_ms: Option<f64>, daemon: bool) -> ThreadRecord {
        let mut builder = ThreadRecordBuilder::new("t")
            .cpu_ms(cpu_ms)
            .elapsed_ms(Some(100.0))
            .daemon(daemon);
        builder.set_state(state, "");
        builder.build()
    }

    #[test]
    fn test_counts_states_and_health() {
        let threads = vec![
            thread("RUNNABLE", Some(90.0), false),
            thread("RUNNABLE", Some(5.0), true),
            thread("BLOCKED", None, true),
            thread("WAITING", None, true),
            thread("TIMED_WAITING", None, false),
            thread("NEW", None, false),
        ];
        let summary = DumpSummary::from_threads(&threads);

        assert_eq!(summary.total, 6);
        assert_eq!(summary.runnable, 2);
        assert_eq!(summary.blocked, 1);
        assert_eq!(summary.waiting, 1);
        assert_eq!(summary.timed_waiting, 1);
        assert_eq!(summary.daemon, 3);
        assert_eq!(summary.hot(), 1);
        assert_eq!(summary.count(Health::Active), 1);
        assert_eq!(summary.count(Health::Blocked), 1);
        assert_eq!(summary.count(Health::Idle), 3);
        assert!(summary.has_warnings());
    }

    #[test]
    fn test_empty_summary() {
        let summary = DumpSummary::from_threads(&[]);
        assert_eq!(summary, DumpSummary::default());
        assert!(!summary.has_warnings());
    }
}
