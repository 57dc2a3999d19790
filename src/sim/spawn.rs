//! Entity spawning
//!
//! Each spawner rolls once per tick against its "1 in N" odds from the tuning
//! table. New entities enter at the right screen edge.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Collectible, GameState, Obstacle, Placement, PowerUp, PowerUpKind, Star};

/// One "1 in `odds`" trial; odds of 0 never succeed
fn roll(rng: &mut Pcg32, odds: u32) -> bool {
    odds > 0 && rng.random_ratio(1, odds)
}

fn coin_flip_placement(rng: &mut Pcg32) -> Placement {
    if rng.random_bool(0.5) {
        Placement::Ground
    } else {
        Placement::Elevated
    }
}

/// Roll for a new obstacle, respecting the minimum spacing behind the newest one.
/// Returns true if one was spawned.
pub fn spawn_obstacle(state: &mut GameState) -> bool {
    if !roll(&mut state.rng, state.tuning.obstacle_odds) {
        return false;
    }
    if let Some(newest) = state.obstacles.last() {
        if newest.pos.x > state.tuning.obstacle_spacing_x {
            return false;
        }
    }

    let placement = if roll(&mut state.rng, state.tuning.ground_obstacle_odds) {
        Placement::Ground
    } else {
        Placement::Elevated
    };
    let id = state.next_entity_id();
    log::trace!("Spawned {placement:?} obstacle {id}");
    state.obstacles.push(Obstacle::new(id, placement));
    true
}

/// Roll for a new collectible. Returns true if one was spawned.
pub fn spawn_collectible(state: &mut GameState) -> bool {
    if !roll(&mut state.rng, state.tuning.collectible_odds) {
        return false;
    }
    let placement = coin_flip_placement(&mut state.rng);
    let id = state.next_entity_id();
    log::trace!("Spawned {placement:?} collectible {id}");
    state.collectibles.push(Collectible::new(id, placement));
    true
}

/// Roll for a new power-up. Returns true if one was spawned.
pub fn spawn_power_up(state: &mut GameState) -> bool {
    if !roll(&mut state.rng, state.tuning.power_up_odds) {
        return false;
    }
    let placement = coin_flip_placement(&mut state.rng);
    let kind = if state.rng.random_bool(0.5) {
        PowerUpKind::Magnet
    } else {
        PowerUpKind::Invincibility
    };
    let id = state.next_entity_id();
    log::trace!("Spawned {placement:?} {kind:?} power-up {id}");
    state.power_ups.push(PowerUp::new(id, kind, placement));
    true
}

/// Add one star somewhere on screen (x, y on a 0.01 grid in [-1, 1))
pub fn spawn_star(state: &mut GameState) {
    let x = state.rng.random_range(-100..100) as f32 / 100.0;
    let y = state.rng.random_range(-100..100) as f32 / 100.0;
    let size = 0.005 * state.rng.random_range(1..=3) as f32;
    state.stars.push(Star {
        pos: Vec2::new(x, y),
        size,
    });
}

/// Count ticks and add a star every `star_interval_ticks`
pub fn tick_stars(state: &mut GameState) {
    if state.tuning.star_interval_ticks == 0 {
        return;
    }
    state.star_ticks += 1;
    if state.star_ticks >= state.tuning.star_interval_ticks {
        state.star_ticks = 0;
        spawn_star(state);
    }
}
