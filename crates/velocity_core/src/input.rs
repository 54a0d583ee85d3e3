//! # Latched Input
//!
//! A flat snapshot of the six logical actions. The input poller overwrites
//! it wholesale once per tick, before the scheduler runs; systems only ever
//! see it through a shared reference.

/// Logical player actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Forward thrust.
    Thrust,
    /// Rotate counter-clockwise.
    RotateLeft,
    /// Rotate clockwise.
    RotateRight,
    /// Primary weapon.
    Fire,
    /// Secondary weapon.
    Secondary,
    /// Pause toggle.
    Pause,
}

impl Action {
    /// Every action, in a fixed order.
    pub const ALL: [Self; 6] = [
        Self::Thrust,
        Self::RotateLeft,
        Self::RotateRight,
        Self::Fire,
        Self::Secondary,
        Self::Pause,
    ];

    /// Config-file style name (`"rotate_left"`).
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Thrust => "thrust",
            Self::RotateLeft => "rotate_left",
            Self::RotateRight => "rotate_right",
            Self::Fire => "fire",
            Self::Secondary => "secondary",
            Self::Pause => "pause",
        }
    }
}

/// Snapshot of which actions are held this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InputState {
    /// Forward thrust held.
    pub thrust: bool,
    /// Rotate-left held.
    pub rotate_left: bool,
    /// Rotate-right held.
    pub rotate_right: bool,
    /// Fire held.
    pub fire: bool,
    /// Secondary held.
    pub secondary: bool,
    /// Pause held.
    pub pause: bool,
}

impl InputState {
    /// Builds a snapshot with exactly the given actions held.
    pub fn from_actions(actions: impl IntoIterator<Item = Action>) -> Self {
        let mut state = Self::default();
        for action in actions {
            state.set(action, true);
        }
        state
    }

    /// Whether `action` is held.
    #[must_use]
    pub const fn is_active(&self, action: Action) -> bool {
        match action {
            Action::Thrust => self.thrust,
            Action::RotateLeft => self.rotate_left,
            Action::RotateRight => self.rotate_right,
            Action::Fire => self.fire,
            Action::Secondary => self.secondary,
            Action::Pause => self.pause,
        }
    }

    /// Sets one action. For input pollers only.
    pub fn set(&mut self, action: Action, held: bool) {
        let slot = match action {
            Action::Thrust => &mut self.thrust,
            Action::RotateLeft => &mut self.rotate_left,
            Action::RotateRight => &mut self.rotate_right,
            Action::Fire => &mut self.fire,
            Action::Secondary => &mut self.secondary,
            Action::Pause => &mut self.pause,
        };
        *slot = held;
    }

    /// Whether any action is held.
    #[must_use]
    pub fn any(&self) -> bool {
        Action::ALL.into_iter().any(|a| self.is_active(a))
    }

    /// Held actions, in [`Action::ALL`] order.
    pub fn active(&self) -> impl Iterator<Item = Action> + '_ {
        Action::ALL.into_iter().filter(|a| self.is_active(*a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        let input = InputState::default();
        assert!(!input.any());
        assert_eq!(input.active().count(), 0);
    }

    #[test]
    fn test_from_actions() {
        let input = InputState::from_actions([Action::Thrust, Action::Fire]);
        assert!(input.thrust);
        assert!(input.fire);
        assert!(!input.pause);
        assert_eq!(
            input.active().collect::<Vec<_>>(),
            vec![Action::Thrust, Action::Fire]
        );
    }

    #[test]
    fn test_set_and_query_every_action() {
        for action in Action::ALL {
            let mut input = InputState::default();
            input.set(action, true);
            assert!(input.is_active(action));
            assert_eq!(input.active().collect::<Vec<_>>(), vec![action]);
            input.set(action, false);
            assert!(!input.any());
        }
    }
}
