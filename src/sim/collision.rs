//! Collision and pickup resolution
//!
//! The player's collision footprint is a fixed horizontal band starting at
//! home x; knockback moves the sprite but not the band. Obstacles cost a
//! life at most once each. Items are picked up depending on the player's
//! height, or unconditionally while the magnet is active.

use super::player::{grant_power_up, start_knockback};
use super::state::{GameEvent, GameState, HitKind, Obstacle, Placement, Player, RoundOutcome};
use crate::consts::{PLAYER_BAND_WIDTH, PLAYER_HOME_X};
use crate::spans_overlap;
use crate::tuning::Tuning;

/// The player's horizontal collision band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerBand {
    pub left: f32,
    pub right: f32,
}

impl PlayerBand {
    pub const fn fixed() -> Self {
        Self {
            left: PLAYER_HOME_X,
            right: PLAYER_HOME_X + PLAYER_BAND_WIDTH,
        }
    }

    /// Does `[x, x + width]` overlap the band?
    #[inline]
    pub fn overlaps(&self, x: f32, width: f32) -> bool {
        spans_overlap(self.left, self.right, x, x + width)
    }
}

/// Would this obstacle hit the player right now? Ignores horizontal overlap
/// and the obstacle's `has_hit_player` flag.
pub fn obstacle_hit(player: &Player, obstacle: &Obstacle) -> Option<HitKind> {
    if player.is_invincible() {
        return None;
    }
    if obstacle.placement == Placement::Ground && player.height() <= 0.0 {
        Some(HitKind::Standing)
    } else if !player.ducking && player.height() <= obstacle.height {
        Some(HitKind::TooLow)
    } else {
        None
    }
}

/// Can the player grab an item at this placement / y without the magnet?
pub fn within_reach(player: &Player, placement: Placement, item_y: f32, tuning: &Tuning) -> bool {
    match placement {
        Placement::Ground => player.height() <= tuning.ground_pickup_tolerance,
        Placement::Elevated => player.height() >= item_y + tuning.elevated_pickup_margin,
    }
}

/// Test every obstacle against the band, applying hits.
/// Returns the loss outcome if the last life was lost.
pub fn resolve_obstacles(state: &mut GameState) -> Option<RoundOutcome> {
    let band = PlayerBand::fixed();
    let player = &mut state.player;

    for obstacle in state.obstacles.iter_mut() {
        if obstacle.has_hit_player || !band.overlaps(obstacle.pos.x, obstacle.width) {
            continue;
        }
        let Some(kind) = obstacle_hit(player, obstacle) else {
            continue;
        };

        obstacle.has_hit_player = true;
        player.lives = player.lives.saturating_sub(1);
        start_knockback(player, &state.tuning);
        log::debug!(
            "{kind:?} hit by obstacle {}, {} lives left",
            obstacle.id,
            player.lives
        );
        state.events.push(GameEvent::ObstacleHit {
            kind,
            lives_left: player.lives,
        });

        if player.lives == 0 {
            return Some(RoundOutcome::OutOfLives);
        }
    }
    None
}

/// Pick up collectibles overlapping the band
pub fn resolve_collectibles(state: &mut GameState) {
    let band = PlayerBand::fixed();
    let player = &mut state.player;
    let tuning = &state.tuning;

    for collectible in state.collectibles.iter_mut() {
        if !collectible.active || !band.overlaps(collectible.pos.x, collectible.size) {
            continue;
        }
        let magnet = player.has_magnet();
        if !magnet && !within_reach(player, collectible.placement, collectible.pos.y, tuning) {
            continue;
        }

        collectible.active = false;
        player.score += tuning.collectible_score;
        log::debug!(
            "Collected {:?} collectible {}{}, score {}",
            collectible.placement,
            collectible.id,
            if magnet { " (magnet)" } else { "" },
            player.score
        );
        state.events.push(GameEvent::CollectiblePicked {
            score: player.score,
        });
    }
}

/// Pick up power-ups overlapping the band, starting their timers at `now`
pub fn resolve_power_ups(state: &mut GameState, now: f32) {
    let band = PlayerBand::fixed();
    let player = &mut state.player;
    let tuning = &state.tuning;

    for power_up in state.power_ups.iter_mut() {
        if !power_up.active || !band.overlaps(power_up.pos.x, power_up.size) {
            continue;
        }
        if !player.has_magnet() && !within_reach(player, power_up.placement, power_up.pos.y, tuning)
        {
            if power_up.placement == Placement::Elevated {
                log::trace!(
                    "Power-up {} out of reach: height {:.2}, item y {:.2}",
                    power_up.id,
                    player.height(),
                    power_up.pos.y
                );
            }
            continue;
        }

        power_up.active = false;
        grant_power_up(player, power_up.kind, now, tuning.power_up_secs);
        log::debug!("Collected {:?} power-up {}", power_up.kind, power_up.id);
        state.events.push(GameEvent::PowerUpPicked(power_up.kind));
    }
}
