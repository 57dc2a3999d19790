//! Renderer interface
//!
//! Drawing is someone else's job. Each tick the round hands the renderer
//! either a scene snapshot or, once the round is over, an end screen request.

pub mod snapshot;

use std::io::Write;

use serde::Serialize;

pub use snapshot::{Hud, PlayerView, Snapshot};

use crate::sim::RoundOutcome;

/// What to draw this tick
#[derive(Debug, Clone, Copy)]
pub enum RenderRequest<'a> {
    /// Regular gameplay frame
    Scene(&'a Snapshot),
    /// Round is over; show the result
    EndScreen { outcome: RoundOutcome, final_score: u64 },
}

/// Consumes one request per tick. Must not feed anything back into the round.
pub trait Renderer {
    fn render(&mut self, request: RenderRequest<'_>);
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, request: RenderRequest<'_>) {
        (**self).render(request)
    }
}

/// Draws nothing
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _request: RenderRequest<'_>) {}
}

/// Headless renderer that logs the HUD every `interval` ticks
#[derive(Debug)]
pub struct HudLogRenderer {
    interval: u64,
}

impl HudLogRenderer {
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
        }
    }
}

impl Renderer for HudLogRenderer {
    fn render(&mut self, request: RenderRequest<'_>) {
        match request {
            RenderRequest::Scene(snapshot) => {
                if snapshot.tick % self.interval != 0 {
                    return;
                }
                let Hud {
                    lives,
                    score,
                    remaining_secs,
                } = snapshot.hud;
                log::info!(
                    "Score: {score}  Time: {remaining_secs}  Lives: {lives}  ({} obstacles, {} items on screen)",
                    snapshot.obstacles.len(),
                    snapshot.collectibles.len() + snapshot.power_ups.len()
                );
            }
            RenderRequest::EndScreen {
                outcome,
                final_score,
            } => {
                log::info!("{}", outcome.headline());
                log::info!("Your final score is: {final_score}");
            }
        }
    }
}

/// Line of JSON written per request
#[derive(Serialize)]
#[serde(tag = "frame", rename_all = "snake_case")]
enum JsonFrame<'a> {
    Scene(&'a Snapshot),
    EndScreen {
        outcome: RoundOutcome,
        final_score: u64,
    },
}

/// Writes every request as one JSON line, for replay tooling and debugging
pub struct JsonLinesRenderer<W: Write> {
    out: W,
    failed: bool,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, failed: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn render(&mut self, request: RenderRequest<'_>) {
        if self.failed {
            return;
        }
        let frame = match request {
            RenderRequest::Scene(snapshot) => JsonFrame::Scene(snapshot),
            RenderRequest::EndScreen {
                outcome,
                final_score,
            } => JsonFrame::EndScreen {
                outcome,
                final_score,
            },
        };
        let result = serde_json::to_writer(&mut self.out, &frame)
            .map_err(std::io::Error::from)
            .and_then(|()| writeln!(self.out));
        if let Err(e) = result {
            // Keep the round going; just stop tracing
            log::warn!("Frame trace disabled: {e}");
            self.failed = true;
        }
    }
}
