use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Elapsed play time of one session: starts on the first selection, stops when the board is
/// cleared.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stopwatch {
    started_at: Option<DateTime<Utc>>,
    stopped_at: Option<DateTime<Utc>>,
}

impl Stopwatch {
    pub const fn new() -> Self {
        Self {
            started_at: None,
            stopped_at: None,
        }
    }

    pub fn start(&mut self, now: DateTime<Utc>) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub fn stop(&mut self, now: DateTime<Utc>) {
        if self.started_at.is_some() && self.stopped_at.is_none() {
            self.stopped_at = Some(now);
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.stopped_at.is_none()
    }

    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        match self.started_at {
            Some(started_at) => (self.stopped_at.unwrap_or(now) - started_at)
                .num_seconds()
                .max(0) as u32,
            None => 0,
        }
    }
}

/// `MM:SS`, minutes are not capped at an hour.
pub fn format_elapsed(total_secs: u32) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
