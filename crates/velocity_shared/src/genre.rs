//! Genre selection.
//!
//! The genre is a plain configuration value. Collaborators that theme their
//! output (audio, rendering, HUD, procedural content) receive it explicitly
//! when they are constructed; the simulation core never sees it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Supported genres.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    /// Swords and sorcery.
    Fantasy,
    /// Default: neon space.
    #[default]
    #[serde(rename = "scifi")]
    SciFi,
    /// Desaturated dread.
    Horror,
    /// Neon glow over rain.
    Cyberpunk,
    /// Dust and film grain.
    #[serde(rename = "postapoc")]
    PostApoc,
}

impl Genre {
    /// Every genre, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Fantasy,
        Self::SciFi,
        Self::Horror,
        Self::Cyberpunk,
        Self::PostApoc,
    ];

    /// Stable string id, as written in config files.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Fantasy => "fantasy",
            Self::SciFi => "scifi",
            Self::Horror => "horror",
            Self::Cyberpunk => "cyberpunk",
            Self::PostApoc => "postapoc",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Genre {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownGenre(s.to_string()))
    }
}
