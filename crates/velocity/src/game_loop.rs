//! # VELOCITY Frame Driver
//!
//! One fixed step of the simulation:
//! ```text
//! Tick N:
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. POLL INPUT                                                       │
//! │    └─ Input source writes this tick's InputState (sole writer)      │
//! │                                                                     │
//! │ 2. CAMERA ADVANCE                                                   │
//! │    └─ Shake timer counts down by dt                                 │
//! │                                                                     │
//! │ 3. FAULT BOUNDARY OPENS                                             │
//! │    └─ Snapshot component state + camera                            │
//! │                                                                     │
//! │ 4. WORLD SYSTEMS                                                    │
//! │    └─ Every system, registration order, same dt                     │
//! │                                                                     │
//! │ 5. FAULT BOUNDARY CLOSES                                            │
//! │    ├─ OK: keep results                                              │
//! │    └─ Error or panic: log, roll back to snapshot, count the fault   │
//! │                                                                     │
//! │ 6. STATS                                                            │
//! │    └─ Record wall time, warn on slow ticks                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The driver never retries a tick. A faulted tick is dropped and the next
//! one starts from the pre-fault state.

use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, error, info, warn};
use velocity_core::{Camera, InputState, TickError, World};
use velocity_shared::{GameConfig, FIXED_DT, SLOW_TICK_MS};

use crate::input::{IdleInput, InputSource};

/// Configuration for the frame driver.
#[derive(Clone, Debug, PartialEq)]
pub struct DriverConfig {
    /// Fixed simulation step in seconds.
    pub dt: f64,
    /// Ticks slower than this are counted and logged.
    pub slow_tick: Duration,
    /// Roll component state back when a tick faults.
    ///
    /// Rollback needs a snapshot taken before the systems run, which is a
    /// deep clone of the component store (every entity's name map included)
    /// on every tick. Turn this off for large worlds that can live with a
    /// partially applied faulted tick.
    pub rollback_on_fault: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            dt: FIXED_DT,
            slow_tick: Duration::from_millis(SLOW_TICK_MS),
            rollback_on_fault: true,
        }
    }
}

impl DriverConfig {
    /// Takes cadence settings from the `[simulation]` config section.
    #[must_use]
    pub fn from_game_config(config: &GameConfig) -> Self {
        Self {
            dt: config.fixed_dt(),
            slow_tick: Duration::from_millis(config.simulation.slow_tick_ms),
            ..Self::default()
        }
    }
}

/// A fault caught by the driver's fault boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FaultReport {
    /// A system returned an error.
    #[error(transparent)]
    System(#[from] TickError),

    /// A system panicked.
    #[error("tick {tick} panicked: {message}")]
    Panic {
        /// Tick number the panic happened on.
        tick: u64,
        /// Panic payload, if it was a string.
        message: String,
    },
}

/// Result of one driver tick.
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// Every system ran.
    Completed,
    /// The tick faulted and was rolled back (if rollback is enabled).
    Faulted(FaultReport),
}

impl TickOutcome {
    /// Whether the tick completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Timing for a single tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickStats {
    /// Tick number.
    pub tick: u64,
    /// Wall time spent in the tick.
    pub duration: Duration,
    /// Whether the tick faulted.
    pub faulted: bool,
}

/// Accumulator for tick statistics.
#[derive(Clone, Debug)]
pub struct TickStatsAccumulator {
    /// Ticks recorded.
    pub ticks_recorded: u64,
    /// Ticks that faulted.
    pub faults: u64,
    /// Ticks slower than the configured threshold.
    pub slow_ticks: u64,
    /// Sum of tick wall times.
    pub total: Duration,
    /// Fastest tick.
    pub min: Duration,
    /// Slowest tick.
    pub max: Duration,
}

impl TickStatsAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ticks_recorded: 0,
            faults: 0,
            slow_ticks: 0,
            total: Duration::ZERO,
            min: Duration::MAX,
            max: Duration::ZERO,
        }
    }

    /// Records one tick. `slow` marks it as over budget.
    pub fn record(&mut self, stats: TickStats, slow: bool) {
        self.ticks_recorded += 1;
        self.total += stats.duration;
        self.min = self.min.min(stats.duration);
        self.max = self.max.max(stats.duration);
        if stats.faulted {
            self.faults += 1;
        }
        if slow {
            self.slow_ticks += 1;
        }
    }

    /// Average tick wall time in milliseconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_tick_ms(&self) -> f64 {
        if self.ticks_recorded == 0 {
            return 0.0;
        }
        self.total.as_secs_f64() * 1000.0 / self.ticks_recorded as f64
    }

    /// Fraction of ticks that faulted.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fault_ratio(&self) -> f64 {
        if self.ticks_recorded == 0 {
            return 0.0;
        }
        self.faults as f64 / self.ticks_recorded as f64
    }
}

impl Default for TickStatsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

/// What a call to [`FrameDriver::run`] did.
#[derive(Clone, Debug)]
pub struct RunSummary {
    /// Ticks run by this call.
    pub ticks: u64,
    /// Ticks that completed.
    pub completed: u64,
    /// Ticks that faulted.
    pub faulted: u64,
    /// Live entities at the end.
    pub entities: usize,
    /// Statistics over the driver's whole life.
    pub stats: TickStatsAccumulator,
}

/// The fixed-step frame driver.
///
/// Owns the world, the camera, the latched input and the input source.
pub struct FrameDriver {
    world: World,
    camera: Camera,
    input: InputState,
    source: Box<dyn InputSource>,
    config: DriverConfig,
    stats: TickStatsAccumulator,
}

impl FrameDriver {
    /// Creates a driver around `world` with idle input.
    #[must_use]
    pub fn new(world: World, config: DriverConfig) -> Self {
        Self {
            world,
            camera: Camera::new(),
            input: InputState::default(),
            source: Box::new(IdleInput),
            config,
            stats: TickStatsAccumulator::new(),
        }
    }

    /// Replaces the input source.
    #[must_use]
    pub fn with_input<S: InputSource + 'static>(mut self, source: S) -> Self {
        self.source = Box::new(source);
        self
    }

    /// Replaces the camera.
    #[must_use]
    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    /// The simulated world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the world, for setup between ticks.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The camera, for renderers.
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Input latched for the most recent tick.
    #[must_use]
    pub const fn input(&self) -> &InputState {
        &self.input
    }

    /// Driver configuration.
    #[must_use]
    pub const fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Statistics so far.
    #[must_use]
    pub const fn stats(&self) -> &TickStatsAccumulator {
        &self.stats
    }

    /// Runs one tick inside the fault boundary.
    pub fn tick(&mut self) -> TickOutcome {
        let start = Instant::now();
        let dt = self.config.dt;
        let tick = self.world.tick_count();

        self.input = self.source.poll();
        self.camera.advance(dt);

        let snapshot = self.config.rollback_on_fault.then(|| (self.world.snapshot(), self.camera));

        let world = &mut self.world;
        let camera = &mut self.camera;
        let input = &self.input;
        let result = panic::catch_unwind(AssertUnwindSafe(|| world.run_tick(dt, input, camera)));

        let outcome = match result {
            Ok(Ok(())) => TickOutcome::Completed,
            Ok(Err(e)) => TickOutcome::Faulted(FaultReport::System(e)),
            Err(payload) => TickOutcome::Faulted(FaultReport::Panic {
                tick,
                message: panic_message(payload.as_ref()),
            }),
        };

        if let TickOutcome::Faulted(fault) = &outcome {
            error!(tick, error = %fault, "tick faulted");
            if let Some((components, camera)) = snapshot {
                self.world.restore(components);
                self.camera = camera;
                debug!(tick, "rolled back to pre-fault state");
            }
        }

        let duration = start.elapsed();
        let slow = duration > self.config.slow_tick;
        if slow {
            warn!(
                tick,
                elapsed_ms = duration.as_secs_f64() * 1000.0,
                budget_ms = self.config.slow_tick.as_secs_f64() * 1000.0,
                "tick exceeded budget"
            );
        }
        self.stats.record(
            TickStats {
                tick,
                duration,
                faulted: !outcome.is_completed(),
            },
            slow,
        );

        outcome
    }

    /// Runs `ticks` ticks back to back.
    ///
    /// Faulted ticks don't stop the run.
    pub fn run(&mut self, ticks: u64) -> RunSummary {
        info!(ticks, dt = self.config.dt, systems = self.world.system_count(), "run starting");

        let mut completed = 0;
        for _ in 0..ticks {
            if self.tick().is_completed() {
                completed += 1;
            }
        }

        let summary = RunSummary {
            ticks,
            completed,
            faulted: ticks - completed,
            entities: self.world.entity_count(),
            stats: self.stats.clone(),
        };
        info!(
            completed = summary.completed,
            faulted = summary.faulted,
            entities = summary.entities,
            avg_tick_ms = summary.stats.avg_tick_ms(),
            "run finished"
        );
        summary
    }
}

/// Extracts a readable message from a panic payload.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use velocity_core::{FnSystem, SystemError};

    #[test]
    fn test_driver_creation() {
        let driver = FrameDriver::new(World::new(), DriverConfig::default());
        assert_eq!(driver.world().tick_count(), 0);
        assert_eq!(driver.stats().ticks_recorded, 0);
        assert!((driver.config().dt - 1.0 / 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_config_from_game_config() {
        let mut game = GameConfig::default();
        game.simulation.tick_rate = 120;
        game.simulation.slow_tick_ms = 5;
        let config = DriverConfig::from_game_config(&game);
        assert!((config.dt - 1.0 / 120.0).abs() < f64::EPSILON);
        assert_eq!(config.slow_tick, Duration::from_millis(5));
        assert!(config.rollback_on_fault);
    }

    #[test]
    fn test_error_fault_is_counted_and_run_continues() {
        let mut world = World::new();
        world.register_system(FnSystem::new("odd_ticks_fail", |_dt, ctx| {
            if ctx.tick() % 2 == 1 {
                Err(SystemError::failed("odd"))
            } else {
                Ok(())
            }
        }));
        let mut driver = FrameDriver::new(world, DriverConfig::default());

        let summary = driver.run(10);
        assert_eq!(summary.ticks, 10);
        assert_eq!(summary.completed, 5);
        assert_eq!(summary.faulted, 5);
        assert_eq!(driver.stats().faults, 5);
        assert!((driver.stats().fault_ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_panic_is_caught() {
        let mut world = World::new();
        world.register_system(FnSystem::new("panics", |_dt, _ctx| -> velocity_core::SystemResult {
            panic!("kaboom")
        }));
        let mut driver = FrameDriver::new(world, DriverConfig::default());

        match driver.tick() {
            TickOutcome::Faulted(FaultReport::Panic { tick, message }) => {
                assert_eq!(tick, 0);
                assert_eq!(message, "kaboom");
            }
            other => panic!("expected a panic fault, got {other:?}"),
        }
        // Next tick still runs
        assert!(!driver.tick().is_completed());
        assert_eq!(driver.world().tick_count(), 2);
    }

    #[test]
    fn test_stats_accumulator() {
        let mut acc = TickStatsAccumulator::new();
        for i in 0..100 {
            acc.record(
                TickStats {
                    tick: i,
                    duration: Duration::from_micros(1000 + i * 10),
                    faulted: i % 10 == 0,
                },
                i >= 90,
            );
        }
        assert_eq!(acc.ticks_recorded, 100);
        assert_eq!(acc.faults, 10);
        assert_eq!(acc.slow_ticks, 10);
        assert_eq!(acc.min, Duration::from_micros(1000));
        assert_eq!(acc.max, Duration::from_micros(1990));
        assert!(acc.avg_tick_ms() > 1.0 && acc.avg_tick_ms() < 2.0);
    }
}
