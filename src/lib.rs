//! Astro Runner - A side-scrolling space runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, game state)
//! - `round`: Fixed-tick round driver wiring the simulation to its collaborators
//! - `renderer`: Read-only snapshots and the renderer interface
//! - `audio`: Sound cue dispatch
//! - `input`: Key events, the per-tick input latch and the demo autopilot
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod input;
pub mod renderer;
pub mod round;
pub mod sim;
pub mod tuning;

pub use round::{Round, Schedule};
pub use tuning::{Tuning, TuningError};

/// Fixed playfield geometry (normalized screen coordinates, x and y in [-1, 1])
pub mod consts {
    /// Entities enter at the right screen edge
    pub const SPAWN_X: f32 = 1.0;
    /// Entities left of this x are off-screen
    pub const DESPAWN_X: f32 = -1.0;

    /// Player's nominal x position
    pub const PLAYER_HOME_X: f32 = -0.8;
    /// Width of the player's horizontal collision band (starts at home x)
    pub const PLAYER_BAND_WIDTH: f32 = 0.1;
    /// World y of the player's feet while standing on the ground
    pub const PLAYER_GROUND_Y: f32 = -0.7;

    /// Ground obstacles sit on the grass and must be jumped over
    pub const GROUND_OBSTACLE_Y: f32 = -0.7;
    pub const GROUND_OBSTACLE_HEIGHT: f32 = 0.2;
    /// Elevated obstacles hang at head height and must be ducked under
    pub const ELEVATED_OBSTACLE_Y: f32 = -0.5;
    pub const ELEVATED_OBSTACLE_HEIGHT: f32 = 0.25;
    pub const OBSTACLE_WIDTH: f32 = 0.1;

    /// Collectibles and power-ups
    pub const GROUND_ITEM_Y: f32 = -0.6;
    pub const ELEVATED_ITEM_Y: f32 = 0.5;
    pub const ITEM_SIZE: f32 = 0.05;
}

/// Open-interval overlap test between `[a_min, a_max]` and `[b_min, b_max]`
///
/// Touching edges do not count as overlap.
#[inline]
pub fn spans_overlap(a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> bool {
    a_min < b_max && a_max > b_min
}
