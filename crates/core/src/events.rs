use crate::{Digit, DigitSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    TargetDrawn {
        target: u32,
        pool: DigitSet,
    },
    SelectionChanged {
        digit: Digit,
        selected: bool,
        sum: u32,
    },
    Matched {
        digits: DigitSet,
        target: u32,
        remaining: usize,
    },
    Overshoot {
        sum: u32,
        target: u32,
    },
    Ticked {
        seconds_left: u32,
    },
    RoundWon {
        seconds_left: u32,
    },
    RoundLost {
        remaining: DigitSet,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
