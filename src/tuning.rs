//! Game balance table
//!
//! Every gameplay constant lives here so a round can be retuned from a JSON
//! file without touching the simulation. Missing fields fall back to the
//! defaults, so a tuning file only needs the values it changes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a tuning table
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Gameplay constants
///
/// Spawn odds are "1 in N" per tick; an odds value of 0 disables that spawner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Round ===
    /// Milliseconds between simulation ticks
    pub tick_interval_ms: u64,
    /// Countdown budget for one round
    pub round_secs: f32,
    /// Lives at round start
    pub max_lives: u8,

    // === Speed ===
    /// Scroll speed at round start (screen units per tick)
    pub base_speed: f32,
    /// Added to the scroll speed at every ramp boundary
    pub speed_step: f32,
    /// Seconds between ramp boundaries
    pub speed_step_interval_secs: f32,

    // === Spawning ===
    pub obstacle_odds: u32,
    /// One in N obstacles sits on the ground, the rest are elevated
    pub ground_obstacle_odds: u32,
    /// No new obstacle while the newest one is still right of this x
    pub obstacle_spacing_x: f32,
    pub collectible_odds: u32,
    pub power_up_odds: u32,

    // === Player motion ===
    pub jump_velocity: f32,
    pub gravity: f32,
    /// Per-tick rise is `velocity * speed * jump_velocity_scale`
    pub jump_velocity_scale: f32,
    /// Per-tick velocity loss is `gravity * speed * gravity_scale`
    pub gravity_scale: f32,
    pub knockback_ticks: u32,
    pub knockback_step: f32,
    pub readjust_step: f32,

    // === Scoring & power-ups ===
    pub collectible_score: u64,
    pub power_up_secs: f32,
    /// Max player height that still counts as standing for ground pickups
    pub ground_pickup_tolerance: f32,
    /// Height above an elevated item's y the player must reach to grab it
    pub elevated_pickup_margin: f32,

    // === Background ===
    pub star_interval_ticks: u32,
    pub star_capacity: usize,
    pub initial_stars: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_interval_ms: 16,
            round_secs: 60.0,
            max_lives: 5,

            base_speed: 0.01,
            speed_step: 0.006,
            speed_step_interval_secs: 5.0,

            obstacle_odds: 50,
            ground_obstacle_odds: 3,
            obstacle_spacing_x: 0.5,
            collectible_odds: 80,
            power_up_odds: 180,

            jump_velocity: 0.05,
            gravity: 0.002,
            jump_velocity_scale: 100.0,
            gravity_scale: 50.0,
            knockback_ticks: 30,
            knockback_step: 0.02,
            readjust_step: 0.01,

            collectible_score: 500,
            power_up_secs: 5.0,
            ground_pickup_tolerance: 0.1,
            elevated_pickup_margin: 0.5,

            star_interval_ticks: 50,
            star_capacity: 200,
            initial_stars: 40,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning table
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.tick_interval_ms == 0 {
            return Err(invalid("tick_interval_ms", "must be at least 1"));
        }
        if self.max_lives == 0 {
            return Err(invalid("max_lives", "must be at least 1"));
        }
        if self.star_capacity == 0 {
            return Err(invalid("star_capacity", "must be at least 1"));
        }
        if self.initial_stars > self.star_capacity {
            return Err(invalid(
                "initial_stars",
                format!("{} exceeds star_capacity {}", self.initial_stars, self.star_capacity),
            ));
        }

        let positive = [
            ("round_secs", self.round_secs),
            ("base_speed", self.base_speed),
            ("speed_step_interval_secs", self.speed_step_interval_secs),
            ("jump_velocity", self.jump_velocity),
            ("power_up_secs", self.power_up_secs),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, format!("{value} is not a positive number")));
            }
        }

        let non_negative = [
            ("speed_step", self.speed_step),
            ("obstacle_spacing_x", self.obstacle_spacing_x),
            ("gravity", self.gravity),
            ("jump_velocity_scale", self.jump_velocity_scale),
            ("gravity_scale", self.gravity_scale),
            ("knockback_step", self.knockback_step),
            ("readjust_step", self.readjust_step),
            ("ground_pickup_tolerance", self.ground_pickup_tolerance),
            ("elevated_pickup_margin", self.elevated_pickup_margin),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, format!("{value} is negative or not finite")));
            }
        }

        // Finer than a tick means several steps per tick for no benefit
        if self.speed_step_interval_secs < self.tick_secs() {
            return Err(invalid(
                "speed_step_interval_secs",
                format!(
                    "{} is shorter than one tick ({}s)",
                    self.speed_step_interval_secs,
                    self.tick_secs()
                ),
            ));
        }

        // Readjusting would never reach home
        if self.knockback_ticks > 0 && self.knockback_step > 0.0 && self.readjust_step == 0.0 {
            return Err(invalid("readjust_step", "must be positive when knockback moves the player"));
        }

        Ok(())
    }

    /// Tick interval as a duration
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Tick interval in seconds
    pub fn tick_secs(&self) -> f32 {
        self.tick_interval_ms as f32 / 1000.0
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}
