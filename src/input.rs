//! Logical actions and edge-triggered sampling of a polled input provider.

use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    FlipGravity,
    Fire,
    NextWeapon,
    PreviousWeapon,
}

impl Action {
    pub const COUNT: usize = 4;

    /// Processing order within a frame.
    pub const ALL: [Action; Action::COUNT] = [
        Action::FlipGravity,
        Action::Fire,
        Action::NextWeapon,
        Action::PreviousWeapon,
    ];

    fn slot(self) -> usize {
        match self {
            Action::FlipGravity => 0,
            Action::Fire => 1,
            Action::NextWeapon => 2,
            Action::PreviousWeapon => 3,
        }
    }
}

/// Current held/released state per action. Sampled, never mutated, by the
/// simulation.
pub trait InputState {
    fn is_active(&self, action: Action) -> bool;
}

/// Simple boolean key map, filled in by whatever owns the window or terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyMap {
    pressed: [bool; Action::COUNT],
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, action: Action, pressed: bool) {
        self.pressed[action.slot()] = pressed;
    }

    pub fn press(&mut self, action: Action) {
        self.set(action, true);
    }

    pub fn release(&mut self, action: Action) {
        self.set(action, false);
    }

    pub fn release_all(&mut self) {
        self.pressed = [false; Action::COUNT];
    }
}

impl InputState for KeyMap {
    fn is_active(&self, action: Action) -> bool {
        self.pressed[action.slot()]
    }
}

impl InputState for HashMap<Action, bool> {
    fn is_active(&self, action: Action) -> bool {
        self.get(&action).copied().unwrap_or(false)
    }
}

// ── Edge triggers ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerState {
    /// Released; the next press fires.
    Armed,
    /// Fired on this press; waits for release.
    Idle,
}

/// One two-state machine per action: fires once per press, re-arms on release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeTriggers {
    states: [TriggerState; Action::COUNT],
}

impl Default for EdgeTriggers {
    fn default() -> Self {
        Self {
            states: [TriggerState::Armed; Action::COUNT],
        }
    }
}

impl EdgeTriggers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, action: Action) -> TriggerState {
        self.states[action.slot()]
    }

    /// Feed the current level of `action`; returns true on the frame it fires.
    pub fn poll(&mut self, action: Action, pressed: bool) -> bool {
        let slot = &mut self.states[action.slot()];
        match (*slot, pressed) {
            (TriggerState::Armed, true) => {
                *slot = TriggerState::Idle;
                true
            }
            (TriggerState::Idle, false) => {
                *slot = TriggerState::Armed;
                false
            }
            _ => false,
        }
    }

    /// Poll every action from `input` in [`Action::ALL`] order and return
    /// the ones that fired.
    pub fn sample<I: InputState + ?Sized>(&mut self, input: &I) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|&action| self.poll(action, input.is_active(action)))
            .collect()
    }
}
