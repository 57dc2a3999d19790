//! Round controller
//!
//! Drives one round on a fixed tick schedule: reads the clock, folds pending
//! key events into a tick input, runs the simulation pass, then hands the
//! drained events to audio and a snapshot to the renderer. Once an outcome is
//! set the end screen is rendered and the schedule halts for good.

use std::time::{Duration, Instant};

use crate::audio::{AudioManager, AudioSink};
use crate::input::{InputLatch, InputSource, KeyEvent};
use crate::renderer::{RenderRequest, Renderer, Snapshot};
use crate::sim::{GamePhase, GameState, RoundOutcome, tick};
use crate::tuning::Tuning;

/// What the scheduler should do after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Run the next step after this interval
    Continue(Duration),
    /// Round is over; never step again
    Halt(RoundOutcome),
}

/// Time source for the tick loop
pub trait Clock {
    /// Time since the round started
    fn elapsed(&mut self) -> Duration;
    /// Block (or pretend to) until the next tick is due
    fn wait(&mut self, interval: Duration);
}

/// Wall clock; sleeps between ticks
#[derive(Debug)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn elapsed(&mut self) -> Duration {
        self.start.elapsed()
    }

    fn wait(&mut self, interval: Duration) {
        std::thread::sleep(interval);
    }
}

/// Simulated clock; every wait advances time by exactly the interval
#[derive(Debug, Default)]
pub struct SteppedClock {
    now: Duration,
}

impl SteppedClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SteppedClock {
    fn elapsed(&mut self) -> Duration {
        self.now
    }

    fn wait(&mut self, interval: Duration) {
        self.now += interval;
    }
}

/// One round of play with its collaborators
pub struct Round<R, A> {
    state: GameState,
    latch: InputLatch,
    snapshot: Snapshot,
    renderer: R,
    audio: AudioManager<A>,
    halted: Option<RoundOutcome>,
}

impl<R: Renderer, A: AudioSink> Round<R, A> {
    pub fn new(seed: u64, tuning: Tuning, renderer: R, audio: A) -> Self {
        let state = GameState::with_tuning(seed, tuning);
        let snapshot = Snapshot::capture(&state);
        log::info!(
            "Round starting: seed {seed}, {:.0}s, {} lives",
            state.tuning.round_secs,
            state.tuning.max_lives
        );
        Self {
            state,
            latch: InputLatch::new(),
            snapshot,
            renderer,
            audio: AudioManager::new(audio),
            halted: None,
        }
    }

    /// Feed a key event; applied on the next step
    pub fn handle_key(&mut self, event: KeyEvent) {
        self.latch.handle(event);
    }

    /// Run one tick at `elapsed` since round start
    pub fn step(&mut self, elapsed: Duration) -> Schedule {
        if let Some(outcome) = self.halted {
            return Schedule::Halt(outcome);
        }

        let input = self.latch.take();
        let phase = tick(&mut self.state, &input, elapsed.as_secs_f32());
        self.audio.dispatch(self.state.drain_events());
        self.snapshot.refresh(&self.state);

        match phase {
            GamePhase::Running => {
                self.renderer.render(RenderRequest::Scene(&self.snapshot));
                Schedule::Continue(self.state.tuning.tick_interval())
            }
            GamePhase::Ended(outcome) => {
                self.renderer.render(RenderRequest::EndScreen {
                    outcome,
                    final_score: self.state.player.score,
                });
                self.halted = Some(outcome);
                Schedule::Halt(outcome)
            }
        }
    }

    /// Run until the round ends, polling `input` before every tick
    pub fn run<C, I>(&mut self, clock: &mut C, input: &mut I) -> RoundOutcome
    where
        C: Clock + ?Sized,
        I: InputSource + ?Sized,
    {
        let mut pending = Vec::new();
        loop {
            input.poll(&self.snapshot, &mut pending);
            for event in pending.drain(..) {
                self.latch.handle(event);
            }
            match self.step(clock.elapsed()) {
                Schedule::Continue(interval) => clock.wait(interval),
                Schedule::Halt(outcome) => return outcome,
            }
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Latest snapshot handed to the renderer
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.audio.set_muted(muted);
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_parts(self) -> (GameState, R, A) {
        (self.state, self.renderer, self.audio.into_sink())
    }
}
