use crate::{Digit, GameError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub round_seconds: u32,
    pub target_ceiling: u32,
    pub tick_millis: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_seconds: 10,
            target_ceiling: 9,
            tick_millis: 1000,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.round_seconds == 0 {
            return Err(GameError::InvalidConfig(
                "round_seconds must be at least 1".to_string(),
            ));
        }
        if self.tick_millis == 0 {
            return Err(GameError::InvalidConfig(
                "tick_millis must be at least 1".to_string(),
            ));
        }
        // Any non-empty pool holds a digit no larger than this, so a target always exists.
        if self.target_ceiling < u32::from(Digit::MAX) {
            return Err(GameError::InvalidConfig(format!(
                "target_ceiling must be at least {}, got {}",
                Digit::MAX,
                self.target_ceiling
            )));
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
        assert_eq!(
            GameConfig::default().tick_period(),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn rejects_low_ceiling_and_zero_durations() {
        let low = GameConfig {
            target_ceiling: 8,
            ..GameConfig::default()
        };
        assert!(matches!(low.validate(), Err(GameError::InvalidConfig(_))));
        let no_time = GameConfig {
            round_seconds: 0,
            ..GameConfig::default()
        };
        assert!(no_time.validate().is_err());
        let no_tick = GameConfig {
            tick_millis: 0,
            ..GameConfig::default()
        };
        assert!(no_tick.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"round_seconds":30}"#).expect("parse");
        assert_eq!(config.round_seconds, 30);
        assert_eq!(config.target_ceiling, 9);
        assert_eq!(config.tick_millis, 1000);
    }
}
