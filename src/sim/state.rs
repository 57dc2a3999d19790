//! Game state and core simulation types
//!
//! Everything a round mutates lives in [`GameState`]. Collaborators only ever
//! see it through snapshots or the drained event queue.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Vertical placement of an obstacle or item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Sits on the ground
    Ground,
    /// Floats above the ground
    Elevated,
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Bottom-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub placement: Placement,
    /// Set when this obstacle cost the player a life; never cleared
    pub has_hit_player: bool,
}

impl Obstacle {
    pub fn new(id: u32, placement: Placement) -> Self {
        let (y, height) = match placement {
            Placement::Ground => (GROUND_OBSTACLE_Y, GROUND_OBSTACLE_HEIGHT),
            Placement::Elevated => (ELEVATED_OBSTACLE_Y, ELEVATED_OBSTACLE_HEIGHT),
        };
        Self {
            id,
            pos: Vec2::new(SPAWN_X, y),
            width: OBSTACLE_WIDTH,
            height,
            placement,
            has_hit_player: false,
        }
    }
}

/// A score item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub placement: Placement,
    pub active: bool,
}

impl Collectible {
    pub fn new(id: u32, placement: Placement) -> Self {
        Self {
            id,
            pos: Vec2::new(SPAWN_X, item_y(placement)),
            size: ITEM_SIZE,
            placement,
            active: true,
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Auto-collects every item that reaches the player
    Magnet,
    /// Obstacles pass through harmlessly
    Invincibility,
}

/// A power-up pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: f32,
    pub placement: Placement,
    pub active: bool,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, placement: Placement) -> Self {
        Self {
            id,
            kind,
            pos: Vec2::new(SPAWN_X, item_y(placement)),
            size: ITEM_SIZE,
            placement,
            active: true,
        }
    }
}

fn item_y(placement: Placement) -> f32 {
    match placement {
        Placement::Ground => GROUND_ITEM_Y,
        Placement::Elevated => ELEVATED_ITEM_Y,
    }
}

/// Decorative background star
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
}

/// Fixed-capacity star ring; pushing onto a full field evicts the oldest star
#[derive(Debug, Clone)]
pub struct StarField {
    stars: VecDeque<Star>,
    capacity: usize,
}

impl StarField {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            stars: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, star: Star) {
        if self.stars.len() == self.capacity {
            self.stars.pop_front();
        }
        self.stars.push_back(star);
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Star> {
        self.stars.iter()
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}

/// Vertical motion. A player is always exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Vertical {
    Grounded,
    /// Airborne with the current upward velocity
    Jumping { velocity: f32 },
}

/// Horizontal recoil after an obstacle hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recoil {
    /// At home x
    Steady,
    /// Being pushed back for the remaining ticks
    Knockback { ticks_left: u32 },
    /// Walking forward toward home x
    Readjusting,
}

/// Absolute expiry times (round seconds) of the timed power-ups
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerUpTimers {
    pub magnet_until: Option<f32>,
    pub invincible_until: Option<f32>,
}

impl PowerUpTimers {
    pub fn expiry(&self, kind: PowerUpKind) -> Option<f32> {
        match kind {
            PowerUpKind::Magnet => self.magnet_until,
            PowerUpKind::Invincibility => self.invincible_until,
        }
    }

    pub fn slot_mut(&mut self, kind: PowerUpKind) -> &mut Option<f32> {
        match kind {
            PowerUpKind::Magnet => &mut self.magnet_until,
            PowerUpKind::Invincibility => &mut self.invincible_until,
        }
    }
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// x is the screen position; y is height above the ground (0 = standing)
    pub pos: Vec2,
    pub vertical: Vertical,
    pub ducking: bool,
    pub recoil: Recoil,
    pub lives: u8,
    pub score: u64,
    pub timers: PowerUpTimers,
}

impl Player {
    pub fn new(lives: u8) -> Self {
        Self {
            pos: Vec2::new(PLAYER_HOME_X, 0.0),
            vertical: Vertical::Grounded,
            ducking: false,
            recoil: Recoil::Steady,
            lives,
            score: 0,
            timers: PowerUpTimers::default(),
        }
    }

    /// Height above the ground
    #[inline]
    pub fn height(&self) -> f32 {
        self.pos.y
    }

    pub fn is_jumping(&self) -> bool {
        matches!(self.vertical, Vertical::Jumping { .. })
    }

    pub fn is_grounded(&self) -> bool {
        matches!(self.vertical, Vertical::Grounded)
    }

    pub fn is_knocked_back(&self) -> bool {
        matches!(self.recoil, Recoil::Knockback { .. })
    }

    pub fn has_magnet(&self) -> bool {
        self.timers.magnet_until.is_some()
    }

    pub fn is_invincible(&self) -> bool {
        self.timers.invincible_until.is_some()
    }
}

/// Why an obstacle hit landed. Names the player's mistake, not where the
/// obstacle sits: a ground obstacle clipped on a low jump is `TooLow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitKind {
    /// Standing on the ground in front of a ground obstacle
    Standing,
    /// Neither above the obstacle's height nor ducking
    TooLow,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Countdown reached zero with lives to spare
    TimeUp,
    /// Last life lost
    OutOfLives,
}

impl RoundOutcome {
    /// End screen headline
    pub fn headline(&self) -> &'static str {
        match self {
            RoundOutcome::TimeUp => "Game End",
            RoundOutcome::OutOfLives => "Game Lose",
        }
    }
}

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    Ended(RoundOutcome),
}

/// Discrete things that happened during a tick, consumed after the pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Round began; background theme should start
    ThemeStarted,
    CollectiblePicked { score: u64 },
    PowerUpPicked(PowerUpKind),
    ObstacleHit { kind: HitKind, lives_left: u8 },
    PowerUpExpired(PowerUpKind),
    RoundEnded(RoundOutcome),
}

/// Purely visual animation state (doesn't affect gameplay)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cosmetics {
    /// Power-up spin, degrees in [0, 360)
    pub spin_degrees: f32,
    /// Collectible pulse, ping-pongs between 0.8 and 1.2
    pub pulse_scale: f32,
    pub pulse_growing: bool,
}

impl Default for Cosmetics {
    fn default() -> Self {
        Self {
            spin_degrees: 0.0,
            pulse_scale: 1.0,
            pulse_growing: true,
        }
    }
}

impl Cosmetics {
    pub const PULSE_MIN: f32 = 0.8;
    pub const PULSE_MAX: f32 = 1.2;

    /// Advance one tick; both animations run faster as the game speeds up
    pub fn advance(&mut self, speed: f32) {
        self.spin_degrees += 1.0 + speed * 0.1;
        if self.spin_degrees >= 360.0 {
            self.spin_degrees = 0.0;
        }

        let step = 0.01 + speed * 0.001;
        if self.pulse_growing {
            self.pulse_scale += step;
            if self.pulse_scale >= Self::PULSE_MAX {
                self.pulse_growing = false;
            }
        } else {
            self.pulse_scale -= step;
            if self.pulse_scale <= Self::PULSE_MIN {
                self.pulse_growing = true;
            }
        }
    }
}

/// Complete round state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance table this round runs with
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Seconds since round start
    pub elapsed: f32,
    /// Seconds left on the countdown
    pub remaining: f32,
    /// Scroll speed (screen units per tick)
    pub speed: f32,
    /// Speed ramp boundaries already applied
    pub speed_steps: u32,
    pub phase: GamePhase,
    pub player: Player,
    /// Oldest first; the last entry is the newest spawn
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    pub power_ups: Vec<PowerUp>,
    pub stars: StarField,
    pub cosmetics: Cosmetics,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    /// Ticks since the last star was added
    pub(crate) star_ticks: u32,
    next_id: u32,
}

impl GameState {
    /// Create a new round with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new round with the given balance table
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            elapsed: 0.0,
            remaining: tuning.round_secs,
            speed: tuning.base_speed,
            speed_steps: 0,
            phase: GamePhase::Running,
            player: Player::new(tuning.max_lives),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            power_ups: Vec::new(),
            stars: StarField::with_capacity(tuning.star_capacity),
            cosmetics: Cosmetics::default(),
            events: vec![GameEvent::ThemeStarted],
            star_ticks: 0,
            next_id: 1,
            tuning,
        };

        for _ in 0..state.tuning.initial_stars {
            super::spawn::spawn_star(&mut state);
        }

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.phase {
            GamePhase::Running => None,
            GamePhase::Ended(outcome) => Some(outcome),
        }
    }

    pub fn ended_by_time(&self) -> bool {
        self.outcome() == Some(RoundOutcome::TimeUp)
    }

    pub fn ended_by_loss(&self) -> bool {
        self.outcome() == Some(RoundOutcome::OutOfLives)
    }

    /// Whole seconds shown on the HUD countdown
    pub fn remaining_whole_secs(&self) -> u32 {
        self.remaining.max(0.0).ceil() as u32
    }

    /// Take every event raised since the last drain
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// End the round once; later calls keep the first outcome
    pub(crate) fn finish(&mut self, outcome: RoundOutcome) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.phase = GamePhase::Ended(outcome);
        self.events.push(GameEvent::RoundEnded(outcome));
        log::info!(
            "Round over ({}) after {:.1}s, score {}",
            outcome.headline(),
            self.elapsed,
            self.player.score
        );
    }
}
