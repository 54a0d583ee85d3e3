//! # VELOCITY
//!
//! The frame driver around the simulation core.
//!
//! ```text
//! ┌──────────────────┐   poll    ┌──────────────────┐
//! │   InputSource    │──────────>│    InputState    │ (latched, read-only
//! └──────────────────┘           └────────┬─────────┘  to systems)
//!                                         │
//! ┌──────────────────┐  advance  ┌────────▼─────────┐
//! │     Camera       │<──────────│   FrameDriver    │
//! └──────────────────┘           └────────┬─────────┘
//!                                         │ fault boundary
//!                                ┌────────▼─────────┐
//!                                │ World::run_tick  │
//!                                └──────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `game_loop`: the driver, its fault boundary and tick statistics
//! - `input`: input sources and key bindings
//! - `demo`: seeded systems used by the headless runner
//! - `telemetry`: log subscriber setup
//! - `cli`: headless runner arguments

#![deny(unsafe_code)]

pub mod cli;
pub mod demo;
pub mod error;
pub mod game_loop;
pub mod input;
pub mod telemetry;

pub use velocity_core as core;
pub use velocity_shared as shared;

pub use error::{DriverError, DriverResult};
pub use game_loop::{
    DriverConfig, FaultReport, FrameDriver, RunSummary, TickOutcome, TickStats,
    TickStatsAccumulator,
};
pub use input::{IdleInput, InputSource, KeyBindings, ScriptedInput};
