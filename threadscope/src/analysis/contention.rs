//! Lock contention analysis.
//!
//! Groups the lock annotations of all threads by lock identity so a
//! monitor that many threads are queued on stands out, together with the
//! thread that holds it.
//!
//! ```text
//! <0x00000000c01a2b30> (a java.lang.Object)
//!   owner:   "Worker-7"
//!   waiters: "Worker-1", "Worker-2", "Worker-3"
//! ```

use crate::thread_data::ThreadRecord;
use std::collections::HashMap;

/// One monitor with at least one waiting thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockContention {
    /// Lock identity, e.g. `0x00000000c01a2b30`
    pub identity: String,
    /// First descriptor seen for this lock, e.g. `a java.lang.Object`
    pub descriptor: Option<String>,
    /// Threads holding the lock (`- locked`), in document order
    pub owners: Vec<String>,
    /// Threads waiting or parked on the lock, in document order
    pub waiters: Vec<String>,
}

#[derive(Default)]
struct LockEntry {
    first_seen: usize,
    descriptor: Option<String>,
    owners: Vec<String>,
    waiters: Vec<String>,
}

/// Find contended locks.
///
/// Only locks with at least one waiter are returned, most waiters first,
/// ties broken by the order the lock first appears in the dump.
#[must_use]
pub fn analyze_lock_contention(threads: &[ThreadRecord]) -> Vec<LockContention> {
    let mut locks: HashMap<&str, LockEntry> = HashMap::new();

    for thread in threads {
        for lock in thread.locks() {
            let next_seen = locks.len();
            let entry = locks
                .entry(lock.identity.as_str())
                .or_insert_with(|| LockEntry { first_seen: next_seen, ..LockEntry::default() });
            if entry.descriptor.is_none() {
                entry.descriptor.clone_from(&lock.descriptor);
            }
            let list = if lock.kind.is_owner() { &mut entry.owners } else { &mut entry.waiters };
            // A thread re-entering the same monitor is listed once
            if !list.iter().any(|name| name == thread.name()) {
                list.push(thread.name().to_string());
            }
        }
    }

    let mut contended: Vec<(usize, LockContention)> = locks
        .into_iter()
        .filter(|(_, entry)| !entry.waiters.is_empty())
        .map(|(identity, entry)| {
            (
                entry.first_seen,
                LockContention {
                    identity: identity.to_string(),
                    descriptor: entry.descriptor,
                    owners: entry.owners,
                    waiters: entry.waiters,
                },
            )
        })
        .collect();

    contended.sort_by(|(a_seen, a), (b_seen, b)| {
        b.waiters.len().cmp(&a.waiters.len()).then(a_seen.cmp(b_seen))
    });
    contended.into_iter().map(|(_, lock)| lock).collect()
}
