//! # Simulation Error Types
//!
//! Absence is not an error in this crate: missing entities and components
//! are reported as `None`. Errors are reserved for systems that fail.

use thiserror::Error;

use crate::ecs::Entity;

/// A failure reported by a system's `update`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SystemError {
    /// A component the system depends on is not attached.
    #[error("entity {entity} has no `{name}` component")]
    MissingComponent {
        /// The entity that was queried.
        entity: Entity,
        /// The component name that was absent.
        name: String,
    },

    /// A component is attached but holds a different kind of value.
    #[error("component `{name}` on entity {entity} holds {found}, expected {expected}")]
    UnexpectedKind {
        /// The entity that was queried.
        entity: Entity,
        /// The component name.
        name: String,
        /// Kind the system asked for.
        expected: &'static str,
        /// Kind actually stored.
        found: &'static str,
    },

    /// Anything else a system wants to report.
    #[error("{0}")]
    Failed(String),
}

impl SystemError {
    /// Builds a free-form failure.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// A scheduler pass that stopped early.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TickError {
    /// A system returned an error; the systems after it did not run.
    #[error("system `{system}` (#{index}) failed on tick {tick}: {source}")]
    SystemFailed {
        /// Name of the failing system.
        system: String,
        /// Registration index of the failing system.
        index: usize,
        /// Tick number the failure happened on.
        tick: u64,
        /// What the system reported.
        #[source]
        source: SystemError,
    },
}

impl TickError {
    /// Name of the system that stopped the pass.
    #[must_use]
    pub fn system(&self) -> &str {
        match self {
            Self::SystemFailed { system, .. } => system,
        }
    }
}

/// Result type returned by systems.
pub type SystemResult = Result<(), SystemError>;
