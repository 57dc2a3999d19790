//! Player input
//!
//! Key events arrive between ticks and are folded into a [`TickInput`] by the
//! [`InputLatch`]. Jump is edge-triggered: one press gives one jump request no
//! matter how long the key is held. Duck is level-triggered.

use crate::renderer::Snapshot;
use crate::sim::{Placement, PlayerBand, TickInput};

/// Game controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Jump,
    Duck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(Control),
    Up(Control),
}

/// Collects key events between ticks
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    jump_held: bool,
    jump_pending: bool,
    duck_held: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Down(Control::Jump) => {
                // Auto-repeat doesn't count as a new press
                if !self.jump_held {
                    self.jump_pending = true;
                }
                self.jump_held = true;
            }
            KeyEvent::Up(Control::Jump) => self.jump_held = false,
            KeyEvent::Down(Control::Duck) => self.duck_held = true,
            KeyEvent::Up(Control::Duck) => self.duck_held = false,
        }
    }

    /// Input for the next tick; clears the one-shot jump request
    pub fn take(&mut self) -> TickInput {
        let input = TickInput {
            jump: self.jump_pending,
            duck: self.duck_held,
        };
        self.jump_pending = false;
        input
    }
}

/// Source of key events, polled once per tick before the pass
pub trait InputSource {
    fn poll(&mut self, snapshot: &Snapshot, out: &mut Vec<KeyEvent>);
}

/// Source that never presses anything
#[derive(Debug, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll(&mut self, _snapshot: &Snapshot, _out: &mut Vec<KeyEvent>) {}
}

/// Replays a fixed list of (tick, event) pairs, sorted by tick
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: Vec<(u64, KeyEvent)>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(mut script: Vec<(u64, KeyEvent)>) -> Self {
        script.sort_by_key(|(tick, _)| *tick);
        Self { script, cursor: 0 }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, snapshot: &Snapshot, out: &mut Vec<KeyEvent>) {
        while let Some(&(tick, event)) = self.script.get(self.cursor) {
            if tick > snapshot.tick {
                break;
            }
            out.push(event);
            self.cursor += 1;
        }
    }
}

/// Demo-mode player: jumps ground obstacles and ducks elevated ones
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Lookahead in ticks of scrolling
    pub jump_lead_ticks: f32,
    pub duck_lead_ticks: f32,
    ducking: bool,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            jump_lead_ticks: 12.0,
            duck_lead_ticks: 8.0,
            ducking: false,
        }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, snapshot: &Snapshot, out: &mut Vec<KeyEvent>) {
        let band = PlayerBand::fixed();
        let speed = snapshot.speed.max(f32::EPSILON);

        // Obstacles still approaching or inside the band
        let incoming = snapshot
            .obstacles
            .iter()
            .filter(|o| !o.has_hit_player && o.pos.x + o.width >= band.left);

        let mut jump = false;
        let mut duck = false;
        for obstacle in incoming {
            let gap = obstacle.pos.x - band.right;
            match obstacle.placement {
                Placement::Ground => {
                    if gap > 0.0 && gap <= speed * self.jump_lead_ticks {
                        jump = true;
                    }
                }
                Placement::Elevated => {
                    if gap <= speed * self.duck_lead_ticks {
                        duck = true;
                    }
                }
            }
        }

        if jump && !snapshot.player.jumping {
            log::trace!("Autopilot jump at tick {}", snapshot.tick);
            out.push(KeyEvent::Down(Control::Jump));
            out.push(KeyEvent::Up(Control::Jump));
        }
        if duck != self.ducking {
            self.ducking = duck;
            out.push(if duck {
                KeyEvent::Down(Control::Duck)
            } else {
                KeyEvent::Up(Control::Duck)
            });
        }
    }
}
