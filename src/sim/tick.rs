//! Fixed timestep simulation tick
//!
//! One call advances the round by one pass in a fixed order. Once the round
//! has ended every further call is a no-op.

use super::collision::{resolve_collectibles, resolve_obstacles, resolve_power_ups};
use super::movement::{advance_items, advance_obstacles, compact};
use super::player::{expire_power_ups, integrate_jump, try_jump, update_recoil};
use super::spawn::{spawn_collectible, spawn_obstacle, spawn_power_up, tick_stars};
use super::state::{GamePhase, GameState, RoundOutcome};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump was pressed since the last tick
    pub jump: bool,
    /// Duck is held
    pub duck: bool,
}

/// Advance the round by one tick.
///
/// `elapsed` is seconds since the round started, read from the caller's
/// monotonic clock. Returns the phase after the pass.
pub fn tick(state: &mut GameState, input: &TickInput, elapsed: f32) -> GamePhase {
    if !state.is_running() {
        return state.phase;
    }

    // Clock
    state.elapsed = state.elapsed.max(elapsed);
    state.remaining = (state.tuning.round_secs - state.elapsed).max(0.0);
    if state.remaining <= 0.0 {
        state.finish(RoundOutcome::TimeUp);
        return state.phase;
    }

    state.time_ticks += 1;
    let now = state.elapsed;

    // Player
    state.player.ducking = input.duck;
    if input.jump && try_jump(&mut state.player, &state.tuning) {
        log::trace!("Jump at tick {}", state.time_ticks);
    }
    update_recoil(&mut state.player, &state.tuning);
    integrate_jump(&mut state.player, state.speed, &state.tuning);

    // Obstacles
    advance_obstacles(state);
    if let Some(outcome) = resolve_obstacles(state) {
        // Nothing else moves once the last life is gone
        state.finish(outcome);
        return state.phase;
    }

    // Items
    advance_items(state);
    resolve_collectibles(state);
    resolve_power_ups(state, now);

    // Spawners
    spawn_collectible(state);
    spawn_power_up(state);
    spawn_obstacle(state);

    ramp_speed(state);
    expire_power_ups(&mut state.player, now, &mut state.events);

    // Background
    tick_stars(state);
    state.cosmetics.advance(state.speed);

    compact(state);
    state.phase
}

/// Catch the speed up with every ramp boundary crossed so far. Skipped
/// boundaries (a stalled clock) are applied together.
fn ramp_speed(state: &mut GameState) {
    let boundaries = (state.elapsed / state.tuning.speed_step_interval_secs).floor() as u32;
    if boundaries <= state.speed_steps {
        return;
    }
    state.speed_steps = boundaries;
    state.speed = state.tuning.base_speed + boundaries as f32 * state.tuning.speed_step;
    log::debug!(
        "Speed ramp {} at {:.1}s: speed {:.4}",
        state.speed_steps,
        state.elapsed,
        state.speed
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_HOME_X;
    use crate::sim::state::{Collectible, GameEvent, Obstacle, Placement, PowerUp, PowerUpKind};
    use crate::tuning::Tuning;

    const DT: f32 = 0.016;

    /// A round with every spawner off so tests control the pools
    fn quiet_state() -> GameState {
        let mut state = GameState::with_tuning(
            12345,
            Tuning {
                obstacle_odds: 0,
                collectible_odds: 0,
                power_up_odds: 0,
                initial_stars: 0,
                ..Default::default()
            },
        );
        state.drain_events().for_each(drop);
        state
    }

    fn run(state: &mut GameState, input: TickInput, ticks: u32) {
        for _ in 0..ticks {
            let elapsed = (state.time_ticks + 1) as f32 * DT;
            tick(state, &input, elapsed);
        }
    }

    #[test]
    fn test_tick_advances_clock() {
        let mut state = quiet_state();
        tick(&mut state, &TickInput::default(), 1.5);
        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.elapsed, 1.5);
        assert_eq!(state.remaining, 58.5);
        assert_eq!(state.remaining_whole_secs(), 59);
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let mut state = quiet_state();
        tick(&mut state, &TickInput::default(), 2.0);
        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.elapsed, 2.0);
    }

    #[test]
    fn test_time_up() {
        let mut state = quiet_state();
        assert_eq!(tick(&mut state, &TickInput::default(), 59.99), GamePhase::Running);
        let phase = tick(&mut state, &TickInput::default(), 60.0);
        assert_eq!(phase, GamePhase::Ended(RoundOutcome::TimeUp));
        assert!(state.ended_by_time());
        assert!(!state.ended_by_loss());
        assert_eq!(state.player.lives, 5);
        assert_eq!(
            state.events.last(),
            Some(&GameEvent::RoundEnded(RoundOutcome::TimeUp))
        );
    }

    #[test]
    fn test_ended_round_is_frozen() {
        let mut state = quiet_state();
        state.obstacles.push(Obstacle::new(1, Placement::Elevated));
        tick(&mut state, &TickInput::default(), 61.0);
        let ticks = state.time_ticks;
        let x = state.obstacles[0].pos.x;
        state.drain_events().for_each(drop);

        tick(&mut state, &TickInput { jump: true, duck: true }, 62.0);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.obstacles[0].pos.x, x);
        assert!(!state.player.ducking);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_jump_input() {
        let mut state = quiet_state();
        run(&mut state, TickInput { jump: true, duck: false }, 1);
        assert!(state.player.is_jumping());
        assert!(state.player.height() > 0.0);

        run(&mut state, TickInput::default(), 200);
        assert!(state.player.is_grounded());
        assert_eq!(state.player.height(), 0.0);
    }

    #[test]
    fn test_duck_is_level_triggered() {
        let mut state = quiet_state();
        run(&mut state, TickInput { jump: false, duck: true }, 3);
        assert!(state.player.ducking);
        run(&mut state, TickInput::default(), 1);
        assert!(!state.player.ducking);
    }

    #[test]
    fn test_speed_ramps_once_per_boundary() {
        let mut state = quiet_state();
        let base = state.speed;
        let step = state.tuning.speed_step;

        tick(&mut state, &TickInput::default(), 4.99);
        assert_eq!(state.speed, base);
        tick(&mut state, &TickInput::default(), 5.0);
        assert!((state.speed - (base + step)).abs() < 1e-6);
        // Whole second after the boundary: no further increase
        for i in 1..60 {
            tick(&mut state, &TickInput::default(), 5.0 + i as f32 * DT);
        }
        assert!((state.speed - (base + step)).abs() < 1e-6);

        // A stalled clock that skips two boundaries applies both
        tick(&mut state, &TickInput::default(), 15.2);
        assert_eq!(state.speed_steps, 3);
        assert!((state.speed - (base + 3.0 * step)).abs() < 1e-6);
    }

    #[test]
    fn test_long_stall_ramps_in_one_step() {
        let mut state = GameState::with_tuning(
            3,
            Tuning {
                round_secs: 100_000.0,
                speed_step_interval_secs: 0.02,
                obstacle_odds: 0,
                collectible_odds: 0,
                power_up_odds: 0,
                initial_stars: 0,
                ..Default::default()
            },
        );
        tick(&mut state, &TickInput::default(), 10_000.0);
        let expected = state.tuning.base_speed + state.speed_steps as f32 * state.tuning.speed_step;
        assert!(state.speed_steps >= 499_999);
        assert_eq!(state.speed, expected);
        assert!(state.speed > 2_999.0);
    }

    #[test]
    fn test_hit_and_knockback_through_tick() {
        let mut state = quiet_state();
        let mut obstacle = Obstacle::new(1, Placement::Ground);
        obstacle.pos.x = PLAYER_HOME_X + 0.05;
        state.obstacles.push(obstacle);

        run(&mut state, TickInput::default(), 1);
        assert_eq!(state.player.lives, 4);
        assert!(state.player.is_knocked_back());
        assert!(state.player.pos.x < PLAYER_HOME_X);

        // Obstacle drifts through the band without a second hit
        run(&mut state, TickInput::default(), 30);
        assert_eq!(state.player.lives, 4);

        run(&mut state, TickInput::default(), 200);
        assert_eq!(state.player.pos.x, PLAYER_HOME_X);
    }

    #[test]
    fn test_loss_stops_pass() {
        let mut state = quiet_state();
        state.player.lives = 1;
        let mut obstacle = Obstacle::new(1, Placement::Ground);
        obstacle.pos.x = PLAYER_HOME_X + 0.05;
        state.obstacles.push(obstacle);
        let mut c = Collectible::new(2, Placement::Ground);
        c.pos.x = 0.2;
        state.collectibles.push(c);

        let phase = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(phase, GamePhase::Ended(RoundOutcome::OutOfLives));
        assert_eq!(state.player.lives, 0);
        // Items didn't move after the fatal hit
        assert_eq!(state.collectibles[0].pos.x, 0.2);
        assert_eq!(
            state.events,
            vec![
                GameEvent::ObstacleHit {
                    kind: crate::sim::state::HitKind::Standing,
                    lives_left: 0
                },
                GameEvent::RoundEnded(RoundOutcome::OutOfLives),
            ]
        );
    }

    #[test]
    fn test_power_up_expires_after_duration() {
        let mut state = quiet_state();
        let mut p = PowerUp::new(1, PowerUpKind::Magnet, Placement::Ground);
        p.pos.x = PLAYER_HOME_X + 0.05;
        state.power_ups.push(p);

        tick(&mut state, &TickInput::default(), 1.0);
        assert!(state.player.has_magnet());
        // Collected power-up is compacted away
        assert!(state.power_ups.is_empty());

        tick(&mut state, &TickInput::default(), 5.99);
        assert!(state.player.has_magnet());
        tick(&mut state, &TickInput::default(), 6.0);
        assert!(!state.player.has_magnet());
        assert_eq!(
            state.events.last(),
            Some(&GameEvent::PowerUpExpired(PowerUpKind::Magnet))
        );
    }

    #[test]
    fn test_stars_accumulate_up_to_capacity() {
        let mut state = GameState::with_tuning(
            1,
            Tuning {
                obstacle_odds: 0,
                collectible_odds: 0,
                power_up_odds: 0,
                initial_stars: 0,
                star_interval_ticks: 1,
                star_capacity: 16,
                ..Default::default()
            },
        );
        run(&mut state, TickInput::default(), 100);
        assert_eq!(state.stars.len(), 16);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        let inputs = [
            TickInput { jump: true, duck: false },
            TickInput::default(),
            TickInput { jump: false, duck: true },
            TickInput::default(),
        ];
        for i in 0..2000u32 {
            let input = inputs[(i / 37) as usize % inputs.len()];
            let elapsed = (i + 1) as f32 * DT;
            tick(&mut state1, &input, elapsed);
            tick(&mut state2, &input, elapsed);
        }
        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.obstacles, state2.obstacles);
        assert_eq!(state1.collectibles, state2.collectibles);
        assert_eq!(state1.events, state2.events);
    }
}
