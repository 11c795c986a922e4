use crate::{
    Digit, DigitStatus, EventBus, GameError, GameSession, RoundStatus, Snapshot, TickTimer,
};
use std::time::Instant;

/// Owns a session together with its countdown timer.
///
/// The timer is armed only while the round is active and is cancelled on the
/// event that ends the round. Dropping the runner drops the timer with it.
#[derive(Debug)]
pub struct SessionRunner {
    id: u64,
    session: GameSession,
    timer: TickTimer,
}

impl SessionRunner {
    pub fn new(id: u64, session: GameSession) -> Self {
        let timer = TickTimer::new(session.config().tick_period());
        Self { id, session, timer }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    pub fn timer_armed(&self) -> bool {
        self.timer.is_armed()
    }

    pub fn start(&mut self, now: Instant) {
        if self.session.status() == RoundStatus::Active {
            self.timer.start(now);
            tracing::debug!(game = self.id, "countdown armed");
        }
    }

    pub fn click(&mut self, digit: Digit, events: &mut EventBus) -> Result<Snapshot, GameError> {
        let snapshot = self.session.click(digit, events)?;
        self.sync_timer();
        Ok(snapshot)
    }

    pub fn apply_click(
        &mut self,
        digit: Digit,
        status: DigitStatus,
        events: &mut EventBus,
    ) -> Result<Snapshot, GameError> {
        let snapshot = self.session.apply_click(digit, status, events)?;
        self.sync_timer();
        Ok(snapshot)
    }

    /// Applies every tick that fell due by `now`.
    pub fn poll(&mut self, now: Instant, events: &mut EventBus) -> Snapshot {
        let due = self.timer.due_ticks(now);
        for _ in 0..due {
            if self.session.status() != RoundStatus::Active {
                break;
            }
            self.session.apply_tick(events);
        }
        self.sync_timer();
        self.session.snapshot()
    }

    fn sync_timer(&mut self) {
        if self.session.status() != RoundStatus::Active && self.timer.is_armed() {
            self.timer.stop();
            tracing::debug!(
                game = self.id,
                status = ?self.session.status(),
                "countdown cancelled"
            );
        }
    }
}
