//! # Simulation Constants
//!
//! Reference cadence for the frame driver. Runs may override the tick rate
//! through configuration; these are the values used when they don't.

/// Tick rate (updates per second)
pub const TICK_RATE: u32 = 60;

/// Fixed simulation step for the reference cadence, in seconds.
pub const FIXED_DT: f64 = 1.0 / TICK_RATE as f64;

/// Ticks slower than this (milliseconds of wall time) are reported.
pub const SLOW_TICK_MS: u64 = 33;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "velocity.toml";
