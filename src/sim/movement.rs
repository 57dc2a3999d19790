//! Scrolling and culling
//!
//! Everything scrolls left by the current game speed each tick. Off-screen
//! obstacles are dropped immediately; items are flagged inactive and swept
//! out by [`compact`] at the end of the tick along with picked-up items.

use super::state::GameState;
use crate::consts::DESPAWN_X;

/// Scroll obstacles and drop the ones past the left edge
pub fn advance_obstacles(state: &mut GameState) {
    let speed = state.speed;
    state.obstacles.retain_mut(|obstacle| {
        obstacle.pos.x -= speed;
        obstacle.pos.x >= DESPAWN_X
    });
}

/// Scroll active collectibles and power-ups, deactivating the ones past the left edge
pub fn advance_items(state: &mut GameState) {
    let speed = state.speed;
    for collectible in state.collectibles.iter_mut().filter(|c| c.active) {
        collectible.pos.x -= speed;
        if collectible.pos.x < DESPAWN_X {
            collectible.active = false;
        }
    }
    for power_up in state.power_ups.iter_mut().filter(|p| p.active) {
        power_up.pos.x -= speed;
        if power_up.pos.x < DESPAWN_X {
            power_up.active = false;
        }
    }
}

/// Remove inactive items so the pools don't grow without bound
pub fn compact(state: &mut GameState) {
    state.collectibles.retain(|c| c.active);
    state.power_ups.retain(|p| p.active);
}
