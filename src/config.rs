//! Game settings, loadable from a TOML file.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::board::Board;
use crate::error::ConfigError;
use crate::BoardInt;

pub const MIN_SIDE: BoardInt = 5;
pub const MAX_SIDE: BoardInt = 200;

/// Once the score reaches `min_score`, ticks last `tick_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SpeedStep {
    pub min_score: u32,
    pub tick_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub rows: BoardInt,
    pub cols: BoardInt,
    pub base_tick_ms: u64,
    /// Checked in order; a later matching step overrides an earlier one.
    pub speed_steps: Vec<SpeedStep>,
    pub fruit_points: u32,
    /// The game is won when the score is exactly this value.
    pub win_score: u32,
    /// Respawn fruit only on cells the snake does not cover.
    pub fruit_avoids_snake: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rows: 20,
            cols: 40,
            base_tick_ms: 250,
            speed_steps: vec![
                SpeedStep { min_score: 25, tick_ms: 200 },
                SpeedStep { min_score: 50, tick_ms: 150 },
                SpeedStep { min_score: 75, tick_ms: 100 },
            ],
            fruit_points: 5,
            win_score: 100,
            fruit_avoids_snake: true,
        }
    }
}

impl GameConfig {
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml(&text)?;
        debug!(?config, "Loaded config");
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (rows, cols) = (self.rows, self.cols);

        if rows < MIN_SIDE || cols < MIN_SIDE {
            return Err(ConfigError::BoardTooSmall { rows, cols });
        }
        if rows > MAX_SIDE || cols > MAX_SIDE {
            return Err(ConfigError::BoardTooLarge { rows, cols });
        }
        if self.fruit_points == 0 {
            return Err(ConfigError::ZeroFruitPoints);
        }
        if self.base_tick_ms == 0 || self.speed_steps.iter().any(|s| s.tick_ms == 0) {
            return Err(ConfigError::ZeroTick);
        }

        Ok(())
    }

    pub fn board(&self) -> Board {
        Board::new(self.rows, self.cols)
    }

    /// Tick length for the given score.
    pub fn tick_interval(&self, score: u32) -> Duration {
        let mut ms = self.base_tick_ms;

        for step in &self.speed_steps {
            if score >= step.min_score {
                ms = step.tick_ms;
            }
        }

        Duration::from_millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        GameConfig::default().validate().unwrap();
    }

    #[test]
    fn tick_interval_speeds_up_in_steps() {
        let config = GameConfig::default();
        let ms = |score| config.tick_interval(score).as_millis();

        assert_eq!(ms(0), 250);
        assert_eq!(ms(20), 250);
        assert_eq!(ms(25), 200);
        assert_eq!(ms(45), 200);
        assert_eq!(ms(50), 150);
        assert_eq!(ms(75), 100);
        assert_eq!(ms(95), 100);
    }

    #[test]
    fn later_steps_override_earlier_ones() {
        let config = GameConfig {
            speed_steps: vec![
                SpeedStep { min_score: 10, tick_ms: 50 },
                SpeedStep { min_score: 20, tick_ms: 300 },
            ],
            ..GameConfig::default()
        };

        assert_eq!(config.tick_interval(15).as_millis(), 50);
        assert_eq!(config.tick_interval(20).as_millis(), 300);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml("rows = 12\nfruit_avoids_snake = false\n").unwrap();

        assert_eq!(config.rows, 12);
        assert_eq!(config.cols, 40);
        assert!(!config.fruit_avoids_snake);
        assert_eq!(config.speed_steps.len(), 3);
    }

    #[test]
    fn speed_steps_from_toml() {
        let text = r#"
            base_tick_ms = 300
            [[speed_steps]]
            min_score = 10
            tick_ms = 120
        "#;
        let config = GameConfig::from_toml(text).unwrap();

        assert_eq!(config.speed_steps, vec![SpeedStep { min_score: 10, tick_ms: 120 }]);
        assert_eq!(config.tick_interval(9).as_millis(), 300);
        assert_eq!(config.tick_interval(10).as_millis(), 120);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            GameConfig::from_toml("rows = 3"),
            Err(ConfigError::BoardTooSmall { rows: 3, cols: 40 })
        ));
        assert!(matches!(
            GameConfig::from_toml("cols = 500"),
            Err(ConfigError::BoardTooLarge { .. })
        ));
        assert!(matches!(GameConfig::from_toml("fruit_points = 0"), Err(ConfigError::ZeroFruitPoints)));
        assert!(matches!(GameConfig::from_toml("base_tick_ms = 0"), Err(ConfigError::ZeroTick)));
        assert!(matches!(GameConfig::from_toml("rows = \"tall\""), Err(ConfigError::Parse(_))));
        assert!(matches!(GameConfig::from_toml("colour = 1"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rows = 15\ncols = 30\nwin_score = 50").unwrap();

        let config = GameConfig::load(file.path()).unwrap();

        assert_eq!(config.board(), Board::new(15, 30));
        assert_eq!(config.win_score, 50);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        assert!(matches!(GameConfig::load(&missing), Err(ConfigError::Read { .. })));
    }
}
