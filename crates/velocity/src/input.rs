//! # Input Polling
//!
//! The input poller is the only writer of [`InputState`]. The frame driver
//! calls it exactly once per tick, before any system runs, and hands the
//! resulting snapshot to the world by shared reference.

use std::collections::VecDeque;

use velocity_core::{Action, InputState};
use velocity_shared::ControlsConfig;

/// Something that can produce this tick's input snapshot.
pub trait InputSource {
    /// Polls the device (or script) and returns the snapshot for this tick.
    fn poll(&mut self) -> InputState;
}

/// Input source that never presses anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdleInput;

impl InputSource for IdleInput {
    fn poll(&mut self) -> InputState {
        InputState::default()
    }
}

/// Replays a fixed sequence of snapshots, then idles.
///
/// Used for headless runs and for reproducing a recorded session.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputState>,
}

impl ScriptedInput {
    /// Creates a script from per-tick snapshots.
    pub fn new(frames: impl IntoIterator<Item = InputState>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Appends `state`, held for `ticks` ticks.
    #[must_use]
    pub fn hold(mut self, state: InputState, ticks: usize) -> Self {
        self.frames.extend(std::iter::repeat(state).take(ticks));
        self
    }

    /// Snapshots left before the script runs dry.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputState {
        self.frames.pop_front().unwrap_or_default()
    }
}

/// Maps key names to logical actions, from the `[controls]` config section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    bindings: [(Action, String); 6],
}

impl KeyBindings {
    /// Builds bindings from configuration.
    #[must_use]
    pub fn from_config(controls: &ControlsConfig) -> Self {
        Self {
            bindings: [
                (Action::Thrust, controls.thrust.clone()),
                (Action::RotateLeft, controls.rotate_left.clone()),
                (Action::RotateRight, controls.rotate_right.clone()),
                (Action::Fire, controls.fire.clone()),
                (Action::Secondary, controls.secondary.clone()),
                (Action::Pause, controls.pause.clone()),
            ],
        }
    }

    /// Key bound to `action`.
    #[must_use]
    pub fn key_for(&self, action: Action) -> &str {
        self.bindings
            .iter()
            .find(|(a, _)| *a == action)
            .map_or("", |(_, key)| key.as_str())
    }

    /// Builds a snapshot from the names of currently held keys.
    ///
    /// Key names compare case-insensitively; unbound keys are ignored.
    #[must_use]
    pub fn resolve<'k>(&self, held_keys: impl IntoIterator<Item = &'k str>) -> InputState {
        let mut state = InputState::default();
        for key in held_keys {
            for (action, bound) in &self.bindings {
                if bound.eq_ignore_ascii_case(key) {
                    state.set(*action, true);
                }
            }
        }
        state
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_config(&ControlsConfig::default())
    }
}
