//! Data-driven game balance
//!
//! Every knob has a default, so a tuning file only needs the fields it
//! changes. Values are validated once at load time; the simulation assumes
//! a validated `Tuning`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{INITIAL_SCORE, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Minimum gap between two enemy spawns (seconds of play time)
    pub spawn_interval: f32,
    /// Player horizontal step per tick while a direction is held (pixels)
    pub player_step: f32,
    /// Slowest enemy fall speed (pixels per tick)
    pub enemy_speed_min: f32,
    /// Fastest enemy fall speed (pixels per tick)
    pub enemy_speed_max: f32,
    /// Maximum horizontal drift either way (pixels per tick)
    pub enemy_drift: f32,
    /// Score gained per tick survived
    pub survival_increment: i64,
    /// Score lost per hit
    pub hit_penalty: i64,
    /// Hits that end the run
    pub max_hits: u32,
    /// Score at or below which the run ends
    pub game_over_score: i64,
    /// Score at the start of every run
    pub initial_score: i64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_interval: 0.5,
            player_step: 8.0,
            enemy_speed_min: 4.0,
            enemy_speed_max: 7.0,
            enemy_drift: 0.75,
            survival_increment: 1,
            hit_penalty: 50,
            max_hits: 3,
            game_over_score: -100,
            initial_score: INITIAL_SCORE,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Out-of-range JSON numbers parse as inf
        for (field, value) in [
            ("spawn_interval", self.spawn_interval),
            ("player_step", self.player_step),
            ("enemy_speed_min", self.enemy_speed_min),
            ("enemy_speed_max", self.enemy_speed_max),
            ("enemy_drift", self.enemy_drift),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::invalid(field, format!("{value} is not finite")));
            }
        }

        if !(self.spawn_interval > 0.0) {
            return Err(ConfigError::invalid("spawn_interval", "must be positive"));
        }
        if !(self.player_step >= 0.0) {
            return Err(ConfigError::invalid("player_step", "must not be negative"));
        }
        // Enemies must always fall, or they never leave the playfield
        if !(self.enemy_speed_min > 0.0) {
            return Err(ConfigError::invalid("enemy_speed_min", "must be positive"));
        }
        if self.enemy_speed_max < self.enemy_speed_min {
            return Err(ConfigError::invalid(
                "enemy_speed_max",
                format!(
                    "{} is below enemy_speed_min ({})",
                    self.enemy_speed_max, self.enemy_speed_min
                ),
            ));
        }
        if !(self.enemy_drift >= 0.0) {
            return Err(ConfigError::invalid("enemy_drift", "must not be negative"));
        }
        // One tick never moves anything further than the playfield is wide
        if self.player_step > SCREEN_WIDTH {
            return Err(ConfigError::invalid(
                "player_step",
                format!("must not exceed {SCREEN_WIDTH}"),
            ));
        }
        if self.enemy_speed_max > SCREEN_HEIGHT {
            return Err(ConfigError::invalid(
                "enemy_speed_max",
                format!("must not exceed {SCREEN_HEIGHT}"),
            ));
        }
        if self.enemy_drift > SCREEN_WIDTH {
            return Err(ConfigError::invalid(
                "enemy_drift",
                format!("must not exceed {SCREEN_WIDTH}"),
            ));
        }
        if self.max_hits == 0 {
            return Err(ConfigError::invalid("max_hits", "must be at least 1"));
        }
        if self.game_over_score >= self.initial_score {
            return Err(ConfigError::invalid(
                "game_over_score",
                format!("must be below initial_score ({})", self.initial_score),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
        assert_eq!(Tuning::default().initial_score, -5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "spawn_interval": 0.25, "max_hits": 5 }"#).unwrap();
        assert_eq!(tuning.spawn_interval, 0.25);
        assert_eq!(tuning.max_hits, 5);
        assert_eq!(tuning.player_step, Tuning::default().player_step);
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let err = Tuning::from_json(r#"{ "enemy_speed_min": 9.0, "enemy_speed_max": 3.0 }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "enemy_speed_max",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_interval_and_hits() {
        let err = Tuning::from_json(r#"{ "spawn_interval": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "spawn_interval", .. }));

        let err = Tuning::from_json(r#"{ "max_hits": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "max_hits", .. }));
    }

    #[test]
    fn test_rejects_threshold_above_start() {
        let err = Tuning::from_json(r#"{ "game_over_score": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "game_over_score", .. }));
    }

    #[test]
    fn test_rejects_overflowing_floats() {
        for field in ["enemy_speed_max", "enemy_drift", "player_step"] {
            let json = format!(r#"{{ "{field}": 1e39 }}"#);
            match Tuning::from_json(&json) {
                Err(ConfigError::Invalid { field: rejected, .. }) => assert_eq!(rejected, field),
                other => panic!("{field}=1e39 was not rejected: {other:?}"),
            }
        }
    }

    #[test]
    fn test_rejects_oversized_steps() {
        let err = Tuning::from_json(r#"{ "enemy_drift": 3e38 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "enemy_drift", .. }));

        let err = Tuning::from_json(r#"{ "player_step": 5000.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "player_step", .. }));
    }

    #[test]
    fn test_largest_accepted_tuning_still_simulates() {
        use crate::consts::{PLAYER_MAX_X, SIM_DT};
        use crate::sim::{GamePhase, GameState, Keys, TickInput, tick};

        let tuning = Tuning::from_json(
            r#"{ "enemy_speed_max": 800.0, "enemy_drift": 1000.0, "player_step": 1000.0 }"#,
        )
        .unwrap();
        let mut state = GameState::new(6, tuning);
        tick(&mut state, &TickInput::tapping(Keys::ENTER), SIM_DT);
        for i in 0..120 {
            if state.phase != GamePhase::Playing {
                break;
            }
            let held = if i % 2 == 0 { Keys::LEFT } else { Keys::empty() };
            tick(&mut state, &TickInput::holding(held), SIM_DT);
            let x = state.run.player.x;
            assert!((0.0..=PLAYER_MAX_X).contains(&x), "player x = {x}");
        }
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            Tuning::from_json("{ spawn_interval: }"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Tuning::load_file("/definitely/not/here.json").unwrap_err();
        match err {
            ConfigError::Io { path, .. } => assert!(path.ends_with("here.json")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
