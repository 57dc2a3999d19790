//! Astro Runner entry point
//!
//! Runs one headless round with the demo autopilot at the controls.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;

use astro_runner::audio::LogAudio;
use astro_runner::input::Autopilot;
use astro_runner::renderer::{HudLogRenderer, JsonLinesRenderer, Renderer};
use astro_runner::round::{Clock, MonotonicClock, SteppedClock};
use astro_runner::{Round, Tuning};

#[derive(Parser, Debug)]
#[command(about = "Side-scrolling space runner (headless demo round)", version)]
struct Args {
    /// RNG seed; defaults to the current time
    #[arg(long)]
    seed: Option<u64>,
    /// JSON file overriding the default tuning table
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Sleep on the real tick schedule instead of simulating the clock
    #[arg(long)]
    realtime: bool,
    /// Print every frame as a JSON line on stdout
    #[arg(long)]
    trace_json: bool,
    /// Log the HUD every N ticks
    #[arg(long, default_value_t = 60)]
    log_every: u64,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{e}");
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(seed_from_time)
            .unwrap_or_default()
    });

    let renderer: Box<dyn Renderer> = if args.trace_json {
        Box::new(JsonLinesRenderer::new(std::io::stdout().lock()))
    } else {
        Box::new(HudLogRenderer::new(args.log_every))
    };

    let mut round = Round::new(seed, tuning, renderer, LogAudio);
    let mut autopilot = Autopilot::default();
    let mut clock: Box<dyn Clock> = if args.realtime {
        Box::new(MonotonicClock::start())
    } else {
        Box::new(SteppedClock::new())
    };

    let outcome = round.run(clock.as_mut(), &mut autopilot);
    let state = round.state();
    if !args.trace_json {
        println!("{}", outcome.headline());
        println!("Your final score is: {}", state.player.score);
    }
    log::info!(
        "Seed {seed}: {} ticks, {} lives left",
        state.time_ticks,
        state.player.lives
    );
    ExitCode::SUCCESS
}

/// Mix wall-clock seconds and nanoseconds into a seed without truncation
fn seed_from_time(since_epoch: Duration) -> u64 {
    since_epoch.as_secs() ^ u64::from(since_epoch.subsec_nanos())
}
