//! A decrementing timer with an active flag and a floor.
//!
//! Countdowns only move when their owner steps them at the start of a turn;
//! nothing in the simulation depends on wall-clock time.

use serde::{Deserialize, Serialize};

/// A timer that reports when stepping reaches its floor.
///
/// While inactive the stored value is meaningless and [`Countdown::value`]
/// hides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Countdown {
    value: i32,
    min_value: i32,
    active: bool,
}

impl Countdown {
    /// Create a countdown with explicit state.
    pub const fn new(value: i32, min_value: i32, active: bool) -> Self {
        Self {
            value,
            min_value,
            active,
        }
    }

    /// Create a stopped countdown with a floor of 0.
    pub const fn inactive() -> Self {
        Self::new(0, 0, false)
    }

    /// Reset the value and activate the countdown.
    pub const fn start(&mut self, value: i32) {
        self.value = value;
        self.active = true;
    }

    /// Deactivate the countdown.
    pub const fn stop(&mut self) {
        self.active = false;
    }

    /// Whether the countdown is running.
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// The remaining value, or `None` while stopped.
    pub const fn value(&self) -> Option<i32> {
        if self.active { Some(self.value) } else { None }
    }

    /// Add `delta` to the value and report whether it is at or below the floor.
    ///
    /// Stepping does not consult the active flag; callers check
    /// [`Countdown::is_active`] first.
    pub const fn step(&mut self, delta: i32) -> bool {
        self.value = self.value.saturating_add(delta);
        self.value <= self.min_value
    }
}
