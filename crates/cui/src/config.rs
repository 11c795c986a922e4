use anyhow::{anyhow, Context, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use starmatch_core::{DigitStatus, GameConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CuiConfig {
    pub game: GameConfig,
    pub theme: Theme,
}

/// Button colours per digit status. Values are anything ratatui parses as a
/// colour: names like `"lightgreen"` or hex like `"#90ee90"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub available: String,
    pub used: String,
    pub wrong: String,
    pub candidate: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            available: "#d3d3d3".to_string(),
            used: "#90ee90".to_string(),
            wrong: "#f08080".to_string(),
            candidate: "#00bfff".to_string(),
        }
    }
}

impl Theme {
    fn raw(&self, status: DigitStatus) -> &str {
        match status {
            DigitStatus::Available => &self.available,
            DigitStatus::Used => &self.used,
            DigitStatus::Wrong => &self.wrong,
            DigitStatus::Candidate => &self.candidate,
        }
    }

    pub fn color_for(&self, status: DigitStatus) -> Color {
        Color::from_str(self.raw(status)).unwrap_or(Color::Reset)
    }

    pub fn validate(&self) -> Result<()> {
        for status in [
            DigitStatus::Available,
            DigitStatus::Used,
            DigitStatus::Wrong,
            DigitStatus::Candidate,
        ] {
            let raw = self.raw(status);
            Color::from_str(raw)
                .map_err(|_| anyhow!("unknown colour {raw:?} for {status:?} digits"))?;
        }
        Ok(())
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("STARMATCH_CONFIG").map(PathBuf::from)
}

/// Loads the front-end config. A missing file means defaults; a present but
/// malformed one is an error.
pub fn load_config(path: Option<&Path>) -> Result<CuiConfig> {
    let Some(path) = path else {
        return Ok(CuiConfig::default());
    };
    if !path.exists() {
        tracing::info!(path = %path.display(), "config file not found, using defaults");
        return Ok(CuiConfig::default());
    }
    let body = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let config: CuiConfig =
        serde_json::from_str(&body).with_context(|| format!("parse {}", path.display()))?;
    config
        .game
        .validate()
        .map_err(|err| anyhow!(err))
        .with_context(|| format!("validate game section of {}", path.display()))?;
    config
        .theme
        .validate()
        .with_context(|| format!("validate theme section of {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn default_theme_parses() {
        let theme = Theme::default();
        assert!(theme.validate().is_ok());
        assert_eq!(
            theme.color_for(DigitStatus::Used),
            Color::Rgb(0x90, 0xee, 0x90)
        );
    }

    #[test]
    fn missing_path_uses_defaults() {
        let config = load_config(None).expect("config");
        assert_eq!(config.game, GameConfig::default());
        let config = load_config(Some(unique_temp_file().as_path())).expect("config");
        assert_eq!(config.theme, Theme::default());
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let file = unique_temp_file();
        let body = r#"{"game":{"round_seconds":20},"theme":{"wrong":"red"}}"#;
        std::fs::write(&file, body).expect("write");
        let config = load_config(Some(file.as_path())).expect("config");
        assert_eq!(config.game.round_seconds, 20);
        assert_eq!(config.game.target_ceiling, 9);
        assert_eq!(config.theme.color_for(DigitStatus::Wrong), Color::Red);
        assert_eq!(config.theme.candidate, "#00bfff");
        let _ = std::fs::remove_file(file);
    }

    #[test]
    fn rejects_bad_colour_and_bad_game_rules() {
        let file = unique_temp_file();
        std::fs::write(&file, r#"{"theme":{"used":"not-a-colour"}}"#).expect("write");
        assert!(load_config(Some(file.as_path())).is_err());
        std::fs::write(&file, r#"{"game":{"target_ceiling":3}}"#).expect("write");
        assert!(load_config(Some(file.as_path())).is_err());
        let _ = std::fs::remove_file(file);
    }

    fn unique_temp_file() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "starmatch_cui_config_test_{}_{}.json",
            std::process::id(),
            nanos
        ))
    }
}
