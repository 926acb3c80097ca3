use serde::{Deserialize, Serialize};

/// Countdown timer for a prep task. Ticks floor at zero; a timer that hits
/// zero keeps its running flag until toggled or reset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BarTimer {
    /// UUID primary key.
    pub id: String,

    pub name: String,

    pub total_secs: u64,
    pub remaining_secs: u64,

    #[serde(default)]
    pub running: bool,
}

impl BarTimer {
    /// One-second tick. No-op unless running.
    pub fn tick(&mut self) {
        if self.running && self.remaining_secs > 0 {
            self.remaining_secs -= 1;
        }
    }

    pub fn reset(&mut self) {
        self.remaining_secs = self.total_secs;
        self.running = false;
    }

    /// `m:ss` display form, e.g. `5:07`.
    pub fn display_remaining(&self) -> String {
        format!("{}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(remaining: u64, running: bool) -> BarTimer {
        BarTimer {
            id: "t1".into(),
            name: "Chill glassware".into(),
            total_secs: 300,
            remaining_secs: remaining,
            running,
        }
    }

    #[test]
    fn tick_floors_at_zero_and_keeps_running() {
        let mut t = timer(1, true);
        t.tick();
        assert_eq!(t.remaining_secs, 0);
        assert!(t.running);
        t.tick();
        assert_eq!(t.remaining_secs, 0);
    }

    #[test]
    fn tick_ignores_stopped_timers() {
        let mut t = timer(10, false);
        t.tick();
        assert_eq!(t.remaining_secs, 10);
    }

    #[test]
    fn reset_restores_total_and_stops() {
        let mut t = timer(42, true);
        t.reset();
        assert_eq!(t.remaining_secs, 300);
        assert!(!t.running);
    }

    #[test]
    fn display_pads_seconds() {
        assert_eq!(timer(307, true).display_remaining(), "5:07");
        assert_eq!(timer(60, true).display_remaining(), "1:00");
        assert_eq!(timer(9, true).display_remaining(), "0:09");
    }
}
