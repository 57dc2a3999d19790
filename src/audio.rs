//! Audio cues
//!
//! The round never plays sound itself. Events drained after each pass are
//! mapped to named cues and handed to an [`AudioSink`]; a failing sink is
//! logged and otherwise ignored.

use thiserror::Error;

use crate::sim::{GameEvent, PowerUpKind, RoundOutcome};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Background theme at round start
    ThemeStart,
    /// Score item picked up
    PickupCollectible,
    PickupMagnet,
    PickupInvincibility,
    /// Lost a life to an obstacle
    HitObstacle,
    PowerUpExpiredMagnet,
    PowerUpExpiredInvincible,
    /// Countdown ran out
    GameEndTime,
    /// Out of lives
    GameEndLoss,
}

impl SoundCue {
    pub const ALL: [SoundCue; 9] = [
        SoundCue::ThemeStart,
        SoundCue::PickupCollectible,
        SoundCue::PickupMagnet,
        SoundCue::PickupInvincibility,
        SoundCue::HitObstacle,
        SoundCue::PowerUpExpiredMagnet,
        SoundCue::PowerUpExpiredInvincible,
        SoundCue::GameEndTime,
        SoundCue::GameEndLoss,
    ];

    /// Asset name for the cue
    pub fn name(self) -> &'static str {
        match self {
            SoundCue::ThemeStart => "theme-start",
            SoundCue::PickupCollectible => "pickup-collectible",
            SoundCue::PickupMagnet => "pickup-magnet",
            SoundCue::PickupInvincibility => "pickup-invincibility",
            SoundCue::HitObstacle => "hit-obstacle",
            SoundCue::PowerUpExpiredMagnet => "power-up-expired-magnet",
            SoundCue::PowerUpExpiredInvincible => "power-up-expired-invincible",
            SoundCue::GameEndTime => "game-end-time",
            SoundCue::GameEndLoss => "game-end-loss",
        }
    }

    pub fn for_event(event: &GameEvent) -> SoundCue {
        match *event {
            GameEvent::ThemeStarted => SoundCue::ThemeStart,
            GameEvent::CollectiblePicked { .. } => SoundCue::PickupCollectible,
            GameEvent::PowerUpPicked(PowerUpKind::Magnet) => SoundCue::PickupMagnet,
            GameEvent::PowerUpPicked(PowerUpKind::Invincibility) => SoundCue::PickupInvincibility,
            GameEvent::ObstacleHit { .. } => SoundCue::HitObstacle,
            GameEvent::PowerUpExpired(PowerUpKind::Magnet) => SoundCue::PowerUpExpiredMagnet,
            GameEvent::PowerUpExpired(PowerUpKind::Invincibility) => {
                SoundCue::PowerUpExpiredInvincible
            }
            GameEvent::RoundEnded(RoundOutcome::TimeUp) => SoundCue::GameEndTime,
            GameEvent::RoundEnded(RoundOutcome::OutOfLives) => SoundCue::GameEndLoss,
        }
    }
}

/// Why a cue couldn't be played
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to play {}: {reason}", .cue.name())]
    Playback { cue: SoundCue, reason: String },
}

/// Something that can play cues
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue) -> Result<(), AudioError>;
}

/// Headless sink that logs each cue
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: SoundCue) -> Result<(), AudioError> {
        log::debug!("Sound: {}", cue.name());
        Ok(())
    }
}

/// Audio manager for the round
pub struct AudioManager<S> {
    sink: S,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, muted: false }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Play a cue. Failures are logged and dropped.
    pub fn play(&mut self, cue: SoundCue) {
        if self.muted {
            return;
        }
        if let Err(e) = self.sink.play(cue) {
            log::warn!("{e}");
        }
    }

    /// Play the cue for every event, in order
    pub fn dispatch<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = GameEvent>,
    {
        for event in events {
            self.play(SoundCue::for_event(&event));
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
