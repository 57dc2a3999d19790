//! Read-only copy of the round handed to the renderer each tick
//!
//! The renderer never sees `GameState` itself. Copying keeps the simulation
//! free to mutate while a frame is being drawn, and is the hand-off point if
//! drawing ever moves to its own thread.

use glam::Vec2;
use serde::Serialize;

use crate::consts::PLAYER_GROUND_Y;
use crate::sim::{Collectible, Cosmetics, GamePhase, GameState, Obstacle, PowerUp, Star};

/// Heads-up display values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub lives: u8,
    pub score: u64,
    /// Countdown in whole seconds
    pub remaining_secs: u32,
}

/// What the renderer needs to draw the player
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PlayerView {
    /// World position of the player's feet
    pub pos: Vec2,
    pub jumping: bool,
    pub ducking: bool,
    pub knocked_back: bool,
    pub invincible: bool,
    pub magnet: bool,
}

/// One frame's worth of round state
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub speed: f32,
    pub hud: Hud,
    pub player: PlayerView,
    pub obstacles: Vec<Obstacle>,
    /// Active collectibles only
    pub collectibles: Vec<Collectible>,
    /// Active power-ups only
    pub power_ups: Vec<PowerUp>,
    /// Oldest first
    pub stars: Vec<Star>,
    pub cosmetics: Cosmetics,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            tick: 0,
            phase: GamePhase::Running,
            speed: 0.0,
            hud: Hud::default(),
            player: PlayerView::default(),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            power_ups: Vec::new(),
            stars: Vec::new(),
            cosmetics: Cosmetics::default(),
        }
    }
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let mut snapshot = Self::default();
        snapshot.refresh(state);
        snapshot
    }

    /// Overwrite with the current state, reusing the entity buffers
    pub fn refresh(&mut self, state: &GameState) {
        let player = &state.player;

        self.tick = state.time_ticks;
        self.phase = state.phase;
        self.speed = state.speed;
        self.hud = Hud {
            lives: player.lives,
            score: player.score,
            remaining_secs: state.remaining_whole_secs(),
        };
        self.player = PlayerView {
            pos: Vec2::new(player.pos.x, PLAYER_GROUND_Y + player.height()),
            jumping: player.is_jumping(),
            ducking: player.ducking,
            knocked_back: player.is_knocked_back(),
            invincible: player.is_invincible(),
            magnet: player.has_magnet(),
        };

        self.obstacles.clear();
        self.obstacles.extend_from_slice(&state.obstacles);
        self.collectibles.clear();
        self.collectibles
            .extend(state.collectibles.iter().filter(|c| c.active).cloned());
        self.power_ups.clear();
        self.power_ups
            .extend(state.power_ups.iter().filter(|p| p.active).cloned());
        self.stars.clear();
        self.stars.extend(state.stars.iter().copied());
        self.cosmetics = state.cosmetics;
    }
}
