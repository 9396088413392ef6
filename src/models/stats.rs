use serde::Serialize;
use std::fmt;

/// Aggregate attendance counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Stats {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
}

impl Stats {
    /// Integer percentage of present students (0 on an empty roster).
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.present * 100 / self.total
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total: {} | Present: {} | Absent: {}",
            self.total, self.present, self.absent
        )
    }
}
