use crate::{
    feasible_subsets, pick_target, Digit, DigitSet, Event, EventBus, GameConfig, GameError,
    RngState,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundStatus {
    Active,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DigitStatus {
    Used,
    Available,
    Candidate,
    Wrong,
}

impl DigitStatus {
    pub fn is_selected(self) -> bool {
        matches!(self, Self::Candidate | Self::Wrong)
    }
}

/// Immutable view of a session after an event has been applied.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    pub stars: u32,
    pub available: DigitSet,
    pub candidates: DigitSet,
    pub seconds_left: u32,
    pub status: RoundStatus,
}

impl Snapshot {
    pub fn candidates_exceed_target(&self) -> bool {
        self.candidates.sum() > self.stars
    }

    pub fn digit_status(&self, digit: Digit) -> DigitStatus {
        if !self.available.contains(digit) {
            return DigitStatus::Used;
        }
        if self.candidates.contains(digit) {
            return if self.candidates_exceed_target() {
                DigitStatus::Wrong
            } else {
                DigitStatus::Candidate
            };
        }
        DigitStatus::Available
    }
}

/// One round of Star Match.
///
/// Mutated only through [`GameSession::apply_click`] and
/// [`GameSession::apply_tick`]. Once the round is won or lost both are no-ops;
/// playing again means building a new session.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    rng: RngState,
    stars: u32,
    available: DigitSet,
    candidates: DigitSet,
    seconds_left: u32,
}

impl GameSession {
    pub fn new(config: GameConfig, mut rng: RngState) -> Result<Self, GameError> {
        config.validate()?;
        let available = DigitSet::full();
        let stars = pick_target(available, config.target_ceiling, &mut rng)?;
        tracing::debug!(seed = rng.seed(), stars, "session created");
        Ok(Self {
            config,
            rng,
            stars,
            available,
            candidates: DigitSet::empty(),
            seconds_left: config.round_seconds,
        })
    }

    /// Rebuilds a session from a previously taken snapshot.
    pub fn from_snapshot(
        config: GameConfig,
        snapshot: Snapshot,
        rng: RngState,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let Snapshot {
            stars,
            available,
            candidates,
            seconds_left,
            status,
        } = snapshot;
        if !candidates.is_subset(available) {
            return Err(GameError::InvalidState(format!(
                "candidates {candidates} are not all available in {available}"
            )));
        }
        if !available.is_empty() {
            let reachable = feasible_subsets(available, config.target_ceiling)
                .iter()
                .any(|entry| entry.sum == stars);
            if !reachable {
                return Err(GameError::InvalidState(format!(
                    "target {stars} is not a subset sum of {available}"
                )));
            }
            if !candidates.is_empty() && candidates.sum() == stars {
                return Err(GameError::InvalidState(format!(
                    "candidates {candidates} already match target {stars}"
                )));
            }
        }
        let session = Self {
            config,
            rng,
            stars,
            available,
            candidates,
            seconds_left,
        };
        if session.status() != status {
            return Err(GameError::InvalidState(format!(
                "status {status:?} disagrees with derived {:?}",
                session.status()
            )));
        }
        Ok(session)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn stars(&self) -> u32 {
        self.stars
    }

    pub fn available(&self) -> DigitSet {
        self.available
    }

    pub fn candidates(&self) -> DigitSet {
        self.candidates
    }

    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    pub fn status(&self) -> RoundStatus {
        if self.available.is_empty() {
            RoundStatus::Won
        } else if self.seconds_left == 0 {
            RoundStatus::Lost
        } else {
            RoundStatus::Active
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            stars: self.stars,
            available: self.available,
            candidates: self.candidates,
            seconds_left: self.seconds_left,
            status: self.status(),
        }
    }

    pub fn digit_status(&self, digit: Digit) -> DigitStatus {
        self.snapshot().digit_status(digit)
    }

    pub fn candidates_exceed_target(&self) -> bool {
        self.candidates.sum() > self.stars
    }

    /// Clicks `digit` using its current derived status.
    pub fn click(&mut self, digit: Digit, events: &mut EventBus) -> Result<Snapshot, GameError> {
        let status = self.digit_status(digit);
        self.apply_click(digit, status, events)
    }

    /// Toggles `digit` in the selection and resolves a match if the selection
    /// now sums to the target.
    ///
    /// `current` is the status the caller rendered for the digit. A status that
    /// no longer agrees with the session (a used digit reported as available, or
    /// the other way round) is ignored and the snapshot is returned unchanged.
    pub fn apply_click(
        &mut self,
        digit: Digit,
        current: DigitStatus,
        events: &mut EventBus,
    ) -> Result<Snapshot, GameError> {
        if self.status() != RoundStatus::Active || current == DigitStatus::Used {
            return Ok(self.snapshot());
        }
        let actual = self.digit_status(digit);
        if actual == DigitStatus::Used || actual.is_selected() != current.is_selected() {
            tracing::debug!(%digit, ?current, ?actual, "ignoring stale click");
            return Ok(self.snapshot());
        }

        let mut selection = self.candidates;
        let selected = current == DigitStatus::Available;
        if selected {
            selection.insert(digit);
        } else {
            selection.remove(digit);
        }
        let sum = selection.sum();
        events.push(Event::SelectionChanged {
            digit,
            selected,
            sum,
        });

        if sum == self.stars {
            self.resolve_match(selection, events)?;
        } else {
            self.candidates = selection;
            if sum > self.stars {
                tracing::debug!(sum, stars = self.stars, "selection overshoots target");
                events.push(Event::Overshoot {
                    sum,
                    target: self.stars,
                });
            }
        }
        Ok(self.snapshot())
    }

    fn resolve_match(&mut self, selection: DigitSet, events: &mut EventBus) -> Result<(), GameError> {
        let remaining = self.available.difference(selection);
        let next_stars = if remaining.is_empty() {
            self.stars
        } else {
            pick_target(remaining, self.config.target_ceiling, &mut self.rng)?
        };
        tracing::debug!(
            matched = %selection,
            stars = self.stars,
            remaining = remaining.len(),
            "selection matched target"
        );
        events.push(Event::Matched {
            digits: selection,
            target: self.stars,
            remaining: remaining.len(),
        });
        self.available = remaining;
        self.candidates = DigitSet::empty();
        self.stars = next_stars;
        if remaining.is_empty() {
            tracing::debug!(seconds_left = self.seconds_left, "round won");
            events.push(Event::RoundWon {
                seconds_left: self.seconds_left,
            });
        } else {
            events.push(Event::TargetDrawn {
                target: next_stars,
                pool: remaining,
            });
        }
        Ok(())
    }

    /// Counts down one second. Entering zero with digits left loses the round.
    pub fn apply_tick(&mut self, events: &mut EventBus) -> Snapshot {
        if self.status() != RoundStatus::Active {
            return self.snapshot();
        }
        self.seconds_left = self.seconds_left.saturating_sub(1);
        events.push(Event::Ticked {
            seconds_left: self.seconds_left,
        });
        if self.status() == RoundStatus::Lost {
            tracing::debug!(remaining = %self.available, "round lost");
            events.push(Event::RoundLost {
                remaining: self.available,
            });
        }
        self.snapshot()
    }
}
