//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only; time comes in as an argument
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod movement;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{PlayerBand, obstacle_hit, within_reach};
pub use state::{
    Collectible, Cosmetics, GameEvent, GamePhase, GameState, HitKind, Obstacle, Placement,
    Player, PowerUp, PowerUpKind, PowerUpTimers, Recoil, RoundOutcome, Star, StarField, Vertical,
};
pub use tick::{TickInput, tick};
