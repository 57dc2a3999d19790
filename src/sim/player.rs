//! Player motion and power-up timers
//!
//! Vertical motion is a two-state machine (grounded / jumping). Ducking is a
//! level-triggered modifier. Obstacle hits push the player through
//! knockback and then readjusting before they're steady at home x again.
//! Magnet and invincibility are independent timers, not states.

use super::state::{GameEvent, Player, PowerUpKind, Recoil, Vertical};
use crate::consts::PLAYER_HOME_X;
use crate::tuning::Tuning;

/// Start a jump if the player is on the ground. Returns true if a jump began.
pub fn try_jump(player: &mut Player, tuning: &Tuning) -> bool {
    if player.is_jumping() {
        return false;
    }
    player.vertical = Vertical::Jumping {
        velocity: tuning.jump_velocity,
    };
    true
}

/// Integrate one tick of jump motion; both rise and gravity scale with speed
pub fn integrate_jump(player: &mut Player, speed: f32, tuning: &Tuning) {
    let Vertical::Jumping { velocity } = player.vertical else {
        return;
    };

    player.pos.y += velocity * speed * tuning.jump_velocity_scale;
    let velocity = velocity - tuning.gravity * speed * tuning.gravity_scale;

    if player.pos.y <= 0.0 {
        player.pos.y = 0.0;
        player.vertical = Vertical::Grounded;
    } else {
        player.vertical = Vertical::Jumping { velocity };
    }
}

/// Knock the player back after an obstacle hit
pub fn start_knockback(player: &mut Player, tuning: &Tuning) {
    player.recoil = Recoil::Knockback {
        ticks_left: tuning.knockback_ticks,
    };
    player.pos.x -= tuning.knockback_step;
}

/// Advance knockback / readjusting by one tick
pub fn update_recoil(player: &mut Player, tuning: &Tuning) {
    match player.recoil {
        Recoil::Steady => {}
        Recoil::Knockback { ticks_left } => {
            if ticks_left == 0 {
                player.recoil = Recoil::Readjusting;
                return;
            }
            let ticks_left = ticks_left - 1;
            player.pos.x -= tuning.knockback_step;
            player.recoil = if ticks_left == 0 {
                Recoil::Readjusting
            } else {
                Recoil::Knockback { ticks_left }
            };
        }
        Recoil::Readjusting => {
            if player.pos.x < PLAYER_HOME_X {
                player.pos.x += tuning.readjust_step;
            }
            if player.pos.x >= PLAYER_HOME_X {
                player.pos.x = PLAYER_HOME_X;
                player.recoil = Recoil::Steady;
            }
        }
    }
}

/// Activate a power-up until `now + duration`; picking up the same kind again
/// refreshes the expiry
pub fn grant_power_up(player: &mut Player, kind: PowerUpKind, now: f32, duration: f32) {
    *player.timers.slot_mut(kind) = Some(now + duration);
}

/// Clear every power-up whose expiry has passed, raising an event per kind
pub fn expire_power_ups(player: &mut Player, now: f32, events: &mut Vec<GameEvent>) {
    for kind in [PowerUpKind::Magnet, PowerUpKind::Invincibility] {
        let slot = player.timers.slot_mut(kind);
        if let Some(until) = *slot {
            if now >= until {
                *slot = None;
                log::debug!("{kind:?} power-up expired at {now:.2}s");
                events.push(GameEvent::PowerUpExpired(kind));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> Tuning {
        Tuning::default()
    }

    #[test]
    fn test_jump_ignored_while_airborne() {
        let tuning = tuning();
        let mut player = Player::new(5);
        assert!(try_jump(&mut player, &tuning));
        integrate_jump(&mut player, 0.01, &tuning);
        let Vertical::Jumping { velocity } = player.vertical else {
            panic!("expected jumping");
        };
        assert!(!try_jump(&mut player, &tuning));
        // Velocity was not reset by the second press
        assert_eq!(player.vertical, Vertical::Jumping { velocity });
    }

    #[test]
    fn test_jump_arc_lands() {
        let tuning = tuning();
        let mut player = Player::new(5);
        try_jump(&mut player, &tuning);

        let mut peak: f32 = 0.0;
        let mut ticks = 0;
        while player.is_jumping() {
            integrate_jump(&mut player, 0.01, &tuning);
            peak = peak.max(player.height());
            ticks += 1;
            assert!(ticks < 1000, "jump never landed");
        }
        assert_eq!(player.height(), 0.0);
        assert!(player.is_grounded());
        // v0 = 0.05, decay 0.001 per tick at base speed
        assert!(peak > 1.2 && peak < 1.3, "peak was {peak}");
        assert!((95..=105).contains(&ticks), "airborne for {ticks} ticks");

        // Next jump starts from the full initial velocity again
        try_jump(&mut player, &tuning);
        assert_eq!(
            player.vertical,
            Vertical::Jumping {
                velocity: tuning.jump_velocity
            }
        );
    }

    #[test]
    fn test_integrate_noop_when_grounded() {
        let tuning = tuning();
        let mut player = Player::new(5);
        integrate_jump(&mut player, 0.01, &tuning);
        assert_eq!(player.height(), 0.0);
        assert!(player.is_grounded());
    }

    #[test]
    fn test_knockback_then_readjust_to_home() {
        let tuning = tuning();
        let mut player = Player::new(5);
        start_knockback(&mut player, &tuning);
        assert!(player.is_knocked_back());
        assert!(player.pos.x < PLAYER_HOME_X);

        for _ in 0..tuning.knockback_ticks {
            update_recoil(&mut player, &tuning);
        }
        assert_eq!(player.recoil, Recoil::Readjusting);
        let furthest = player.pos.x;
        let expected = PLAYER_HOME_X - tuning.knockback_step * (tuning.knockback_ticks + 1) as f32;
        assert!((furthest - expected).abs() < 1e-4);

        let mut ticks = 0;
        while player.recoil != Recoil::Steady {
            update_recoil(&mut player, &tuning);
            assert!(player.pos.x <= PLAYER_HOME_X);
            ticks += 1;
            assert!(ticks < 1000, "never got home");
        }
        assert_eq!(player.pos.x, PLAYER_HOME_X);
    }

    #[test]
    fn test_zero_length_knockback() {
        let tuning = Tuning {
            knockback_ticks: 0,
            ..Default::default()
        };
        let mut player = Player::new(5);
        start_knockback(&mut player, &tuning);
        update_recoil(&mut player, &tuning);
        assert_eq!(player.recoil, Recoil::Readjusting);
    }

    #[test]
    fn test_power_up_expiry() {
        let mut player = Player::new(5);
        let mut events = Vec::new();
        grant_power_up(&mut player, PowerUpKind::Magnet, 10.0, 5.0);
        grant_power_up(&mut player, PowerUpKind::Invincibility, 12.0, 5.0);

        expire_power_ups(&mut player, 14.99, &mut events);
        assert!(player.has_magnet());
        assert!(events.is_empty());

        expire_power_ups(&mut player, 15.0, &mut events);
        assert!(!player.has_magnet());
        assert!(player.is_invincible());
        assert_eq!(events, vec![GameEvent::PowerUpExpired(PowerUpKind::Magnet)]);

        expire_power_ups(&mut player, 17.5, &mut events);
        assert!(!player.is_invincible());
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_power_up_refresh() {
        let mut player = Player::new(5);
        let mut events = Vec::new();
        grant_power_up(&mut player, PowerUpKind::Magnet, 0.0, 5.0);
        grant_power_up(&mut player, PowerUpKind::Magnet, 3.0, 5.0);
        expire_power_ups(&mut player, 6.0, &mut events);
        assert!(player.has_magnet());
        assert_eq!(player.timers.magnet_until, Some(8.0));
    }
}
