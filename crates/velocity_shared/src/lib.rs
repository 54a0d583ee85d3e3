//! # VELOCITY Shared
//!
//! Types used by the simulation core, the frame driver and the
//! collaborators around them.
//!
//! ## CRITICAL RULE
//!
//! This crate holds data, not behavior. No simulation state lives here and
//! nothing here knows about entities or systems.

#![deny(unsafe_code)]

pub mod config;
pub mod constants;
pub mod error;
pub mod genre;
pub mod math;

pub use config::{
    AudioConfig, ControlsConfig, DisplayConfig, GameConfig, GameplayConfig, LoggingConfig,
    SimulationConfig,
};
pub use constants::{CONFIG_FILE, FIXED_DT, SLOW_TICK_MS, TICK_RATE};
pub use error::{ConfigError, ConfigResult};
pub use genre::Genre;
pub use math::Vec2;
