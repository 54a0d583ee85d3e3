//! # VELOCITY Headless Runner
//!
//! Runs the seeded demonstration for a fixed number of ticks with no window
//! and no audio, then logs a summary.
//!
//! ## Usage
//!
//! ```bash
//! velocity-headless --config velocity.toml --ticks 600 --seed 42
//! ```

use std::process::ExitCode;

use tracing::{error, info};
use velocity::cli::{HeadlessArgs, USAGE};
use velocity::{demo, telemetry, DriverConfig, DriverResult, FrameDriver, InputSource, KeyBindings};
use velocity_core::{Action, InputState, World};
use velocity_shared::GameConfig;

/// Ticks between scripted shots.
const FIRE_PERIOD: u64 = 120;

/// Taps fire once every `period` ticks.
struct FireEvery {
    fire: InputState,
    period: u64,
    tick: u64,
}

impl InputSource for FireEvery {
    fn poll(&mut self) -> InputState {
        let tick = self.tick;
        self.tick += 1;
        if tick % self.period == 0 {
            self.fire
        } else {
            InputState::default()
        }
    }
}

fn main() -> ExitCode {
    let args = match HeadlessArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    if args.help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "headless run failed");
            eprintln!("velocity-headless: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &HeadlessArgs) -> DriverResult<()> {
    let mut config = GameConfig::load(&args.config)?;
    if let Some(seed) = args.seed {
        config.gameplay.seed = seed;
    }
    telemetry::init_logging(&config.logging.level)?;

    info!(
        config = %args.config.display(),
        seed = config.gameplay.seed,
        genre = %config.gameplay.genre,
        arena_mode = %config.gameplay.arena_mode,
        tick_rate = config.simulation.tick_rate,
        "starting headless run"
    );

    let mut world = World::new();
    demo::install(&mut world, &config)?;

    let bindings = KeyBindings::from_config(&config.controls);
    let trigger = FireEvery {
        fire: bindings.resolve([bindings.key_for(Action::Fire)]),
        period: FIRE_PERIOD,
        tick: 0,
    };

    let mut driver =
        FrameDriver::new(world, DriverConfig::from_game_config(&config)).with_input(trigger);
    let summary = driver.run(args.ticks);

    info!(
        ticks = summary.ticks,
        completed = summary.completed,
        faulted = summary.faulted,
        slow_ticks = summary.stats.slow_ticks,
        entities = summary.entities,
        entities_issued = driver.world().entities_issued(),
        avg_tick_ms = summary.stats.avg_tick_ms(),
        "headless run complete"
    );
    Ok(())
}
