//! # Camera
//!
//! Viewport offset plus a timed screen shake.
//!
//! ```text
//!            shake(a > 0, d > 0)
//!   ┌──────┐ ─────────────────────> ┌──────────┐
//!   │ Idle │                        │ Shaking  │ ──┐ shake(..) overwrites
//!   └──────┘ <───────────────────── └──────────┘ <─┘
//!            advance: remaining <= 0
//!            (amplitude and duration reset to exactly 0)
//! ```

use velocity_shared::Vec2;

use crate::rng::DeterministicSource;

/// Remaining shake time at or below this counts as expired.
///
/// Sub-steps that sum to the shake duration in exact arithmetic can leave
/// a residue of a few ULPs in `f64`; this swallows it.
pub const SHAKE_EPSILON: f64 = 1e-9;

/// Observable camera state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraState {
    /// No shake in progress.
    Idle,
    /// Shake in progress.
    Shaking,
}

/// Viewport position and screen-shake effect.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Camera {
    position: Vec2,
    shake_amount: f64,
    shake_duration: f64,
}

impl Camera {
    /// Creates an idle camera at the origin.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            shake_amount: 0.0,
            shake_duration: 0.0,
        }
    }

    /// Viewport offset.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Moves the viewport to `position`.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Moves the viewport by `delta`.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Remaining shake amplitude.
    #[inline]
    #[must_use]
    pub const fn shake_amount(&self) -> f64 {
        self.shake_amount
    }

    /// Remaining shake time in seconds.
    #[inline]
    #[must_use]
    pub const fn shake_duration(&self) -> f64 {
        self.shake_duration
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> CameraState {
        if self.shake_duration > 0.0 {
            CameraState::Shaking
        } else {
            CameraState::Idle
        }
    }

    /// Starts a shake, replacing any shake in progress. Shakes don't stack.
    ///
    /// A non-positive (or NaN) amount or duration leaves the camera idle.
    pub fn shake(&mut self, amount: f64, duration: f64) {
        if amount > 0.0 && duration > 0.0 {
            self.shake_amount = amount;
            self.shake_duration = duration;
        } else {
            self.stop_shake();
        }
    }

    /// Ends any shake immediately.
    pub fn stop_shake(&mut self) {
        self.shake_amount = 0.0;
        self.shake_duration = 0.0;
    }

    /// Advances the shake timer by `dt` seconds.
    ///
    /// A non-finite `dt` ends the shake.
    pub fn advance(&mut self, dt: f64) {
        if self.shake_duration > 0.0 || self.shake_amount > 0.0 {
            self.shake_duration -= dt;
            if self.shake_duration.is_nan() || self.shake_duration <= SHAKE_EPSILON {
                self.stop_shake();
            }
        }
    }

    /// Random jitter within `[-amplitude, amplitude]` on each axis, for
    /// renderers. Zero when idle (and draws nothing from `rng`).
    pub fn shake_offset(&self, rng: &mut DeterministicSource) -> Vec2 {
        if self.shake_amount <= 0.0 {
            return Vec2::ZERO;
        }
        let a = self.shake_amount;
        Vec2::new(rng.range_f64(-a, a), rng.range_f64(-a, a))
    }
}
