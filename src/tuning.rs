//! Game balance constants
//!
//! Every gameplay number lives here so a JSON override can retune a run
//! without a rebuild. `Tuning::default()` is the shipped balance.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a tuning override
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Runner ===
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Vertical velocity set on jump (negative is up)
    pub jump_impulse: f32,
    /// Horizontal pixels per tick while a move key is held
    pub run_speed: f32,
    pub player_start_x: f32,
    /// Runner size before its sprite loads
    pub player_width: f32,
    pub player_height: f32,
    /// On-screen runner height once its sprite loads
    pub runner_sprite_height: f32,

    // === Pace ===
    pub base_speed: f32,
    /// Score ticks per +1 game speed
    pub speed_step_ticks: u64,
    /// Parallax scroll rate relative to obstacle speed
    pub parallax_factor: f32,

    // === Spawner ===
    /// Spawn decision is made once the timer exceeds this many ticks
    pub spawn_interval: u32,
    pub spawn_chance: f32,
    /// Chance a spawned obstacle is flying rather than ground
    pub flying_chance: f32,
    /// Distance from floor to a flying obstacle's top edge
    pub flying_clearance: f32,
    pub ground_sprite_height: f32,
    pub flying_sprite_height: f32,
    pub ground_fallback_size: (f32, f32),
    pub flying_fallback_size: (f32, f32),

    // === HUD ===
    /// Internal ticks per displayed point
    pub score_divisor: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 400.0,

            gravity: 0.8,
            jump_impulse: -15.0,
            run_speed: 5.0,
            player_start_x: 50.0,
            player_width: 40.0,
            player_height: 60.0,
            runner_sprite_height: 60.0,

            base_speed: 5.0,
            speed_step_ticks: 500,
            parallax_factor: 0.25,

            spawn_interval: 60,
            spawn_chance: 0.5,
            flying_chance: 0.4,
            flying_clearance: 150.0,
            ground_sprite_height: 40.0,
            flying_sprite_height: 30.0,
            ground_fallback_size: (20.0, 40.0),
            flying_fallback_size: (30.0, 30.0),

            score_divisor: 10,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive finite number",
                })
            }
        }
        fn chance(field: &'static str, value: f32) -> Result<(), TuningError> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be within [0, 1]",
                })
            }
        }

        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("player_width", self.player_width)?;
        positive("player_height", self.player_height)?;
        positive("runner_sprite_height", self.runner_sprite_height)?;
        positive("ground_sprite_height", self.ground_sprite_height)?;
        positive("flying_sprite_height", self.flying_sprite_height)?;
        // Obstacles must drift left or they never leave the field
        positive("base_speed", self.base_speed)?;
        chance("spawn_chance", self.spawn_chance)?;
        chance("flying_chance", self.flying_chance)?;

        if !(self.parallax_factor >= 0.0 && self.parallax_factor.is_finite()) {
            return Err(TuningError::Invalid {
                field: "parallax_factor",
                reason: "must be a non-negative finite number",
            });
        }
        if self.speed_step_ticks == 0 {
            return Err(TuningError::Invalid {
                field: "speed_step_ticks",
                reason: "must be non-zero",
            });
        }
        if self.score_divisor == 0 {
            return Err(TuningError::Invalid {
                field: "score_divisor",
                reason: "must be non-zero",
            });
        }
        if self.player_width > self.field_width {
            return Err(TuningError::Invalid {
                field: "player_width",
                reason: "runner must fit inside the field",
            });
        }
        Ok(())
    }

    /// Game speed for a score: base plus one per completed speed step
    pub fn speed_for_score(&self, score: u64) -> f32 {
        self.base_speed + (score / self.speed_step_ticks) as f32
    }

    /// Storage key for a tuning override
    const STORAGE_KEY: &'static str = "parallax_runner_tuning";

    /// Load the stored override, falling back to defaults
    pub fn load() -> Self {
        match crate::platform::storage::get_item(Self::STORAGE_KEY) {
            Some(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning override");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring stored tuning: {}", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_speed_steps() {
        let t = Tuning::default();
        assert_eq!(t.speed_for_score(0), 5.0);
        assert_eq!(t.speed_for_score(499), 5.0);
        assert_eq!(t.speed_for_score(500), 6.0);
        assert_eq!(t.speed_for_score(999), 6.0);
        assert_eq!(t.speed_for_score(1000), 7.0);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "gravity": 1.2, "spawn_chance": 0.0 }"#).unwrap();
        assert_eq!(t.gravity, 1.2);
        assert_eq!(t.spawn_chance, 0.0);
        assert_eq!(t.field_width, 800.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "flying_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "flying_chance",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "speed_step_ticks": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { .. }));

        for json in [r#"{ "base_speed": 0.0 }"#, r#"{ "base_speed": -3.0 }"#] {
            assert!(matches!(
                Tuning::from_json(json),
                Err(TuningError::Invalid {
                    field: "base_speed",
                    ..
                })
            ));
        }

        assert!(matches!(
            Tuning::from_json(r#"{ "parallax_factor": -0.5 }"#),
            Err(TuningError::Invalid {
                field: "parallax_factor",
                ..
            })
        ));
        // A still background is allowed
        assert!(Tuning::from_json(r#"{ "parallax_factor": 0.0 }"#).is_ok());

        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }
}
