//! # Game Configuration
//!
//! Loaded once at startup from a TOML file. Every section and every field is
//! optional; anything left out takes its default. A missing file is not an
//! error, a malformed one is.
//!
//! ```toml
//! [gameplay]
//! genre = "horror"
//! seed = 42
//!
//! [simulation]
//! tick_rate = 120
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{SLOW_TICK_MS, TICK_RATE};
use crate::error::{ConfigError, ConfigResult};
use crate::genre::Genre;

/// Complete run configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window settings.
    pub display: DisplayConfig,
    /// Mixer volumes.
    pub audio: AudioConfig,
    /// Genre, arena mode and run seed.
    pub gameplay: GameplayConfig,
    /// Key names bound to each logical action.
    pub controls: ControlsConfig,
    /// Fixed-step cadence.
    pub simulation: SimulationConfig,
    /// Log filter.
    pub logging: LoggingConfig,
}

/// Window settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Logical width in pixels.
    pub width: u32,
    /// Logical height in pixels.
    pub height: u32,
    /// Start fullscreen.
    pub fullscreen: bool,
    /// Sync presentation to the display refresh.
    pub vsync: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Mixer volumes, each in `[0, 1]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Master gain.
    pub master_volume: f64,
    /// Music bus gain.
    pub music_volume: f64,
    /// Effects bus gain.
    pub sfx_volume: f64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            music_volume: 0.6,
            sfx_volume: 0.8,
        }
    }
}

/// Gameplay settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Theme handed to collaborators.
    pub genre: Genre,
    /// How the arena edges behave (e.g. `"wrap"`).
    pub arena_mode: String,
    /// Seed for every deterministic source of the run.
    pub seed: u64,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            genre: Genre::default(),
            arena_mode: "wrap".to_string(),
            seed: 0,
        }
    }
}

/// Key names bound to the six logical actions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Forward thrust.
    pub thrust: String,
    /// Rotate counter-clockwise.
    pub rotate_left: String,
    /// Rotate clockwise.
    pub rotate_right: String,
    /// Primary weapon.
    pub fire: String,
    /// Secondary weapon.
    pub secondary: String,
    /// Pause toggle.
    pub pause: String,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            thrust: "W".to_string(),
            rotate_left: "A".to_string(),
            rotate_right: "D".to_string(),
            fire: "Space".to_string(),
            secondary: "Shift".to_string(),
            pause: "Escape".to_string(),
        }
    }
}

/// Fixed-step cadence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Ticks per simulated second. Must be non-zero.
    pub tick_rate: u32,
    /// Wall-time threshold above which a tick is reported as slow.
    pub slow_tick_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            slow_tick_ms: SLOW_TICK_MS,
        }
    }
}

impl SimulationConfig {
    /// Fixed delta time in seconds.
    #[must_use]
    pub fn fixed_dt(&self) -> f64 {
        1.0 / f64::from(self.tick_rate.max(1))
    }
}

/// Log filter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `"info"` or `"velocity_core=debug"`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from `path`.
    ///
    /// A missing file yields [`GameConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file exists but can't be read,
    /// [`ConfigError::Parse`] if it isn't valid TOML for this schema, and
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_toml_str(&text)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] or [`ConfigError::Invalid`].
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let mut config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks ranges and clamps volumes into `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero tick rate or zero-sized display.
    pub fn validate(&mut self) -> ConfigResult<()> {
        if self.simulation.tick_rate == 0 {
            return Err(ConfigError::Invalid(
                "simulation.tick_rate must be greater than zero".to_string(),
            ));
        }
        if self.display.width == 0 || self.display.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "display size must be non-zero, got {}x{}",
                self.display.width, self.display.height
            )));
        }

        let audio = &mut self.audio;
        for volume in [
            &mut audio.master_volume,
            &mut audio.music_volume,
            &mut audio.sfx_volume,
        ] {
            let v = *volume;
            *volume = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        }
        Ok(())
    }

    /// Fixed delta time for this run, in seconds.
    #[must_use]
    pub fn fixed_dt(&self) -> f64 {
        self.simulation.fixed_dt()
    }
}
