use crate::config::CuiConfig;
use anyhow::{Context, Result};
use starmatch_core::{
    Digit, DigitStatus, Event, EventBus, GameError, GameSession, RngState, RoundStatus,
    SessionRunner, Snapshot,
};
use std::collections::VecDeque;
use std::time::Instant;

pub const DEFAULT_RUN_SEED: u64 = 0x57A2_3A7C;
pub const HELP_TEXT: &str = "Pick 1 or more digits that sum to the number of stars. \
You can only use each digit once. Use up all of the digits to win!";
const MAX_EVENT_LOG: usize = 200;
const GRID_LEN: usize = 9;

pub struct App {
    pub config: CuiConfig,
    pub seeds: RngState,
    pub runner: SessionRunner,
    pub events: EventBus,
    pub cursor: usize,
    pub event_log: VecDeque<String>,
    pub status_line: String,
    pub show_help: bool,
    pub should_quit: bool,
}

fn start_game(
    id: u64,
    config: &CuiConfig,
    seeds: &mut RngState,
    now: Instant,
) -> Result<SessionRunner, GameError> {
    let session = GameSession::new(config.game, RngState::from_seed(seeds.next_u64()))?;
    tracing::info!(
        game = id,
        seed = session.seed(),
        stars = session.stars(),
        "game started"
    );
    let mut runner = SessionRunner::new(id, session);
    runner.start(now);
    Ok(runner)
}

impl App {
    pub fn bootstrap(config: CuiConfig, seeds: RngState, now: Instant) -> Result<Self> {
        let mut seeds = seeds;
        let runner = start_game(1, &config, &mut seeds, now)
            .map_err(|err| anyhow::anyhow!(err))
            .context("start first game")?;
        let mut app = Self {
            config,
            seeds,
            runner,
            events: EventBus::default(),
            cursor: 0,
            event_log: VecDeque::new(),
            status_line: "ready".to_string(),
            show_help: false,
            should_quit: false,
        };
        app.push_game_banner();
        Ok(app)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.runner.snapshot()
    }

    pub fn game_id(&self) -> u64 {
        self.runner.id()
    }

    pub fn digit_status(&self, digit: Digit) -> DigitStatus {
        self.snapshot().digit_status(digit)
    }

    pub fn cursor_digit(&self) -> Option<Digit> {
        u8::try_from(self.cursor + 1).ok().and_then(|v| Digit::new(v).ok())
    }

    pub fn on_tick(&mut self, now: Instant) {
        let before = self.snapshot().status;
        let snapshot = self.runner.poll(now, &mut self.events);
        self.flush_events();
        if before == RoundStatus::Active && snapshot.status == RoundStatus::Lost {
            self.push_status("time is up, press n to play again");
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = GRID_LEN as isize;
        let next = (self.cursor as isize + delta).rem_euclid(len);
        self.cursor = next as usize;
    }

    pub fn click_cursor(&mut self) {
        if let Some(digit) = self.cursor_digit() {
            self.click(digit);
        }
    }

    pub fn click_value(&mut self, value: u8) {
        match Digit::new(value) {
            Ok(digit) => {
                self.cursor = usize::from(value - 1);
                self.click(digit);
            }
            Err(err) => self.push_error(err),
        }
    }

    fn click(&mut self, digit: Digit) {
        let status = self.digit_status(digit);
        match self.runner.apply_click(digit, status, &mut self.events) {
            Ok(snapshot) => {
                self.flush_events();
                match snapshot.status {
                    RoundStatus::Won => self.push_status("all digits used, press n to play again"),
                    RoundStatus::Lost => self.push_status("round over, press n to play again"),
                    RoundStatus::Active if status == DigitStatus::Used => {
                        self.push_status(format!("{digit} is already used"))
                    }
                    RoundStatus::Active if snapshot.candidates_exceed_target() => {
                        self.push_status(format!(
                            "{} is more than {} stars",
                            snapshot.candidates.sum(),
                            snapshot.stars
                        ))
                    }
                    RoundStatus::Active => self.push_status(format!(
                        "selected {} = {}",
                        snapshot.candidates,
                        snapshot.candidates.sum()
                    )),
                }
            }
            Err(err) => self.push_error(err),
        }
    }

    /// Replaces the finished session with a new one. The old runner, and its
    /// timer, is dropped.
    pub fn play_again(&mut self, now: Instant) {
        if self.snapshot().status == RoundStatus::Active {
            self.push_status("finish the current round first");
            return;
        }
        let next_id = self.game_id().saturating_add(1);
        match start_game(next_id, &self.config, &mut self.seeds, now) {
            Ok(runner) => {
                self.runner = runner;
                self.cursor = 0;
                self.push_game_banner();
                self.push_status("ready");
            }
            Err(err) => self.push_error(err),
        }
    }

    pub fn push_status(&mut self, value: impl Into<String>) {
        self.status_line = value.into();
    }

    pub fn push_error(&mut self, err: GameError) {
        tracing::warn!(error = %err, "game error");
        self.status_line = format!("error: {err}");
    }

    fn push_game_banner(&mut self) {
        let snapshot = self.snapshot();
        self.push_event_line(format!(
            "game #{} started: {} stars, {}s",
            self.game_id(),
            snapshot.stars,
            snapshot.seconds_left
        ));
    }

    fn flush_events(&mut self) {
        let drained: Vec<_> = self.events.drain().collect();
        for event in drained {
            if let Some(line) = format_event(&event) {
                self.push_event_line(line);
            }
        }
    }

    fn push_event_line(&mut self, line: String) {
        if self.event_log.len() >= MAX_EVENT_LOG {
            let _ = self.event_log.pop_front();
        }
        self.event_log.push_back(line);
    }
}

/// One log line per event. Per-second ticks are left out to keep the log readable.
fn format_event(event: &Event) -> Option<String> {
    let line = match event {
        Event::TargetDrawn { target, pool } => {
            format!("new target {target} from {pool}")
        }
        Event::SelectionChanged {
            digit,
            selected,
            sum,
        } => {
            let verb = if *selected { "picked" } else { "dropped" };
            format!("{verb} {digit} (sum {sum})")
        }
        Event::Matched {
            digits,
            target,
            remaining,
        } => format!("matched {target} with {digits}, {remaining} digits left"),
        Event::Overshoot { sum, target } => format!("{sum} overshoots {target}"),
        Event::Ticked { .. } => return None,
        Event::RoundWon { seconds_left } => format!("you win with {seconds_left}s left"),
        Event::RoundLost { remaining } => format!("game over, {remaining} unused"),
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use starmatch_core::feasible_subsets;
    use std::time::Duration;

    fn app() -> App {
        App::bootstrap(CuiConfig::default(), RngState::from_seed(77), Instant::now())
            .expect("app")
    }

    #[test]
    fn cursor_wraps_across_the_grid() {
        let mut app = app();
        app.move_cursor(-1);
        assert_eq!(app.cursor, 8);
        app.move_cursor(3);
        assert_eq!(app.cursor, 2);
        assert_eq!(app.cursor_digit().map(Digit::value), Some(3));
    }

    #[test]
    fn play_again_waits_for_round_end() {
        let mut app = app();
        let start = Instant::now();
        app.play_again(start);
        assert_eq!(app.game_id(), 1);

        app.on_tick(start + Duration::from_secs(60));
        assert_eq!(app.snapshot().status, RoundStatus::Lost);
        app.play_again(start + Duration::from_secs(61));
        assert_eq!(app.game_id(), 2);
        assert_eq!(app.snapshot().status, RoundStatus::Active);
        assert_eq!(app.snapshot().seconds_left, 10);
    }

    #[test]
    fn clicking_a_matching_selection_logs_the_match() {
        let mut app = app();
        let snapshot = app.snapshot();
        let selection = feasible_subsets(snapshot.available, 9)
            .into_iter()
            .find(|entry| entry.sum == snapshot.stars)
            .expect("reachable")
            .digits;
        for digit in selection.iter() {
            app.click_value(digit.value());
        }
        assert_eq!(app.snapshot().available, snapshot.available.difference(selection));
        assert!(app.event_log.iter().any(|line| line.starts_with("matched")));
    }
}
