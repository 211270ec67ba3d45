//! Health classification for parsed threads.
//!
//! Each thread gets exactly one health tier summarizing its runtime
//! disposition. The tier is a pure function of the thread state token and
//! the derived CPU percentage:
//!
//! | state      | cpu%              | health    |
//! |------------|-------------------|-----------|
//! | `BLOCKED`  | any               | `BLOCKED` |
//! | `RUNNABLE` | > 50.0            | `HOT`     |
//! | `RUNNABLE` | <= 50.0 or absent | `ACTIVE`  |
//! | other      | any               | `IDLE`    |

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// State token for a thread blocked on a monitor.
pub const STATE_BLOCKED: &str = "BLOCKED";
/// State token for a thread that is running or ready to run.
pub const STATE_RUNNABLE: &str = "RUNNABLE";
/// State token for a thread parked or waiting without a timeout.
pub const STATE_WAITING: &str = "WAITING";
/// State token for a thread sleeping or waiting with a timeout.
pub const STATE_TIMED_WAITING: &str = "TIMED_WAITING";
/// State recorded when no `Thread.State:` line follows the header.
pub const STATE_UNKNOWN: &str = "UNKNOWN";

/// CPU percentage above which a runnable thread is considered hot.
pub const HOT_CPU_PERCENT: f64 = 50.0;

/// Derived health tier of a thread.
///
/// The TUI colors rows by tier:
/// - `Blocked` and `Hot` in red
/// - `Active` in amber
/// - `Idle` dimmed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Health {
    /// Waiting to enter a monitor held by another thread
    Blocked,
    /// Runnable and burning more than half of its lifetime on CPU
    Hot,
    /// Runnable with moderate or unknown CPU usage
    Active,
    /// Waiting, sleeping, parked, or in an unrecognized state
    #[default]
    Idle,
}

impl Health {
    /// All tiers, in severity order.
    pub const ALL: [Health; 4] = [Health::Blocked, Health::Hot, Health::Active, Health::Idle];

    /// Uppercase label used in exports and the TUI.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Health::Blocked => "BLOCKED",
            Health::Hot => "HOT",
            Health::Active => "ACTIVE",
            Health::Idle => "IDLE",
        }
    }

    /// Returns true for tiers that usually deserve attention first.
    #[must_use]
    pub fn needs_attention(self) -> bool {
        matches!(self, Health::Blocked | Health::Hot)
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Health {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Health::ALL
            .into_iter()
            .find(|h| h.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown health tier '{s}' (expected BLOCKED, HOT, ACTIVE or IDLE)"))
    }
}

/// Classify a thread from its state token and CPU percentage.
///
/// # Examples
///
/// ```
/// use threadscope::classification::{classify_health, Health};
///
/// assert_eq!(classify_health("BLOCKED", Some(90.0)), Health::Blocked);
/// assert_eq!(classify_health("RUNNABLE", Some(75.0)), Health::Hot);
/// assert_eq!(classify_health("RUNNABLE", None), Health::Active);
/// assert_eq!(classify_health("TIMED_WAITING", Some(99.0)), Health::Idle);
/// ```
#[must_use]
pub fn classify_health(state: &str, cpu_percent: Option<f64>) -> Health {
    match state {
        STATE_BLOCKED => Health::Blocked,
        STATE_RUNNABLE => match cpu_percent {
            Some(pct) if pct > HOT_CPU_PERCENT => Health::Hot,
            _ => Health::Active,
        },
        _ => Health::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocked_ignores_cpu() {
        assert_eq!(classify_health("BLOCKED", None), Health::Blocked);
        assert_eq!(classify_health("BLOCKED", Some(0.0)), Health::Blocked);
        assert_eq!(classify_health("BLOCKED", Some(99.0)), Health::Blocked);
    }

    #[test]
    fn test_runnable_above_threshold_is_hot() {
        assert_eq!(classify_health("RUNNABLE", Some(75.0)), Health::Hot);
        assert_eq!(classify_health("RUNNABLE", Some(50.01)), Health::Hot);
    }

    #[test]
    fn test_runnable_at_threshold_is_active() {
        assert_eq!(classify_health("RUNNABLE", Some(50.0)), Health::Active);
        assert_eq!(classify_health("RUNNABLE", Some(10.0)), Health::Active);
        assert_eq!(classify_health("RUNNABLE", None), Health::Active);
    }

    #[test]
    fn test_other_states_are_idle() {
        assert_eq!(classify_health("TIMED_WAITING", Some(80.0)), Health::Idle);
        assert_eq!(classify_health("WAITING", None), Health::Idle);
        assert_eq!(classify_health(STATE_UNKNOWN, None), Health::Idle);
        assert_eq!(classify_health("NEW", Some(100.0)), Health::Idle);
    }

    #[test]
    fn test_state_match_is_case_sensitive() {
        assert_eq!(classify_health("runnable", Some(90.0)), Health::Idle);
    }

    #[test]
    fn test_health_from_str() {
        assert_eq!("hot".parse::<Health>().unwrap(), Health::Hot);
        assert_eq!("BLOCKED".parse::<Health>().unwrap(), Health::Blocked);
        assert!("warm".parse::<Health>().is_err());
    }

    #[test]
    fn test_health_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Health::Active).unwrap(), "\"ACTIVE\"");
    }
}
