//! Gamepad controller wrapper

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::AxisSource;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Default stick deadband.
pub const DEFAULT_DEADBAND: f64 = 0.15;

const LEFT_X_AXIS: usize = 0;
const LEFT_Y_AXIS: usize = 1;
const LEFT_TRIGGER_AXIS: usize = 2;
const RIGHT_TRIGGER_AXIS: usize = 3;
const RIGHT_X_AXIS: usize = 4;
const RIGHT_Y_AXIS: usize = 5;

const NUM_BUTTONS: usize = 10;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An Xbox style controller read through an `AxisSource`.
///
/// Stick readings have the deadband applied and are inverted so that pushing
/// a stick up or left reads +1.
#[derive(Debug, Clone)]
pub struct Controller<S> {
    source: S,
    deadband: f64,

    /// Time each button last reported a debounced press.
    ///
    /// Units: seconds
    latest_press_s: [f64; NUM_BUTTONS],
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The standard controller buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    A,
    B,
    X,
    Y,
    LB,
    RB,
    Select,
    Start,
    LS,
    RS,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Button {
    /// The raw button number, starting from 1.
    pub fn number(self) -> usize {
        self.index() + 1
    }

    fn index(self) -> usize {
        match self {
            Button::A => 0,
            Button::B => 1,
            Button::X => 2,
            Button::Y => 3,
            Button::LB => 4,
            Button::RB => 5,
            Button::Select => 6,
            Button::Start => 7,
            Button::LS => 8,
            Button::RS => 9,
        }
    }
}

impl<S: AxisSource + Default> Default for Controller<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: AxisSource> Controller<S> {
    pub fn new(source: S) -> Self {
        Self::with_deadband(source, DEFAULT_DEADBAND)
    }

    pub fn with_deadband(source: S, deadband: f64) -> Self {
        Self {
            source,
            deadband,
            latest_press_s: [0.0; NUM_BUTTONS],
        }
    }

    pub fn deadband(&self) -> f64 {
        self.deadband
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Replace the source with a new sample, keeping the debounce state.
    pub fn update_source(&mut self, source: S) {
        self.source = source;
    }

    pub fn left_x(&self) -> f64 {
        self.stick_axis(LEFT_X_AXIS)
    }

    pub fn left_y(&self) -> f64 {
        self.stick_axis(LEFT_Y_AXIS)
    }

    pub fn right_x(&self) -> f64 {
        self.stick_axis(RIGHT_X_AXIS)
    }

    pub fn right_y(&self) -> f64 {
        self.stick_axis(RIGHT_Y_AXIS)
    }

    pub fn left_trigger(&self) -> f64 {
        self.source.raw_axis(LEFT_TRIGGER_AXIS)
    }

    pub fn right_trigger(&self) -> f64 {
        self.source.raw_axis(RIGHT_TRIGGER_AXIS)
    }

    /// Combined trigger axis, the left trigger minus the right trigger.
    ///
    /// Pressing both triggers reads zero.
    pub fn triggers(&self) -> f64 {
        self.left_trigger() - self.right_trigger()
    }

    /// Directional pad angle in degrees, `None` when released.
    pub fn dpad(&self) -> Option<i32> {
        self.source.pov()
    }

    pub fn button_held(&self, button: Button) -> bool {
        self.source.raw_button(button.number())
    }

    /// Returns true at most once every `period_s` while the button is held.
    pub fn button_pressed_debounced(&mut self, button: Button, period_s: f64, now_s: f64) -> bool {
        if !self.button_held(button) {
            return false;
        }

        let latest = &mut self.latest_press_s[button.index()];
        if now_s - *latest > period_s {
            *latest = now_s;
            true
        }
        else {
            false
        }
    }

    fn stick_axis(&self, axis: usize) -> f64 {
        let raw = self.source.raw_axis(axis);

        if raw.abs() > self.deadband {
            -raw
        }
        else {
            0.0
        }
    }
}
