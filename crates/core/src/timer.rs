use std::time::{Duration, Instant};

/// Deadline-based repeating ticker.
///
/// Time is supplied by the caller, so the timer can be driven from a real
/// clock or stepped by hand in tests. A stopped timer reports no ticks until
/// it is started again.
#[derive(Debug, Clone)]
pub struct TickTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl TickTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Number of whole periods that elapsed up to `now`. Advances the deadline past them.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };
        let mut ticks = 0u32;
        while now >= due {
            ticks = ticks.saturating_add(1);
            due += self.period;
        }
        self.next_due = Some(due);
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unarmed_timer_never_ticks() {
        let mut timer = TickTimer::new(Duration::from_secs(1));
        let now = Instant::now();
        assert_eq!(timer.due_ticks(now + Duration::from_secs(5)), 0);
        assert!(!timer.is_armed());
    }

    #[test]
    fn counts_whole_periods_and_keeps_phase() {
        let mut timer = TickTimer::new(Duration::from_secs(1));
        let start = Instant::now();
        timer.start(start);
        assert_eq!(timer.due_ticks(start + Duration::from_millis(999)), 0);
        assert_eq!(timer.due_ticks(start + Duration::from_millis(1000)), 1);
        assert_eq!(timer.due_ticks(start + Duration::from_millis(3500)), 2);
        assert_eq!(timer.next_due(), Some(start + Duration::from_secs(4)));
    }

    #[test]
    fn stop_cancels_pending_ticks() {
        let mut timer = TickTimer::new(Duration::from_secs(1));
        let start = Instant::now();
        timer.start(start);
        timer.stop();
        assert_eq!(timer.due_ticks(start + Duration::from_secs(10)), 0);
    }
}
