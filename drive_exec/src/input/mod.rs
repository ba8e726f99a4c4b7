//! Operator input module
//!
//! Turns raw gamepad readings into normalised drive inputs. The drive code
//! only depends on the `AxisSource` capability, so any device (or a
//! recorded `PadState`) can stand behind a `Controller`.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod controller;
mod mapping;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use controller::*;
pub use mapping::*;

use comms_if::tc::pad::PadState;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Something which produces raw axis, button and POV readings.
pub trait AxisSource {
    /// Raw value of the given axis, zero if the axis does not exist.
    fn raw_axis(&self, axis: usize) -> f64;

    /// State of the given button, numbered from 1. Missing buttons read as
    /// released.
    fn raw_button(&self, button: usize) -> bool;

    /// POV hat angle in degrees, or `None` if the hat is released.
    fn pov(&self) -> Option<i32>;
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl AxisSource for PadState {
    fn raw_axis(&self, axis: usize) -> f64 {
        self.axes.get(axis).copied().unwrap_or(0.0)
    }

    fn raw_button(&self, button: usize) -> bool {
        match button {
            0 => false,
            n => self.buttons.get(n - 1).copied().unwrap_or(false),
        }
    }

    fn pov(&self) -> Option<i32> {
        self.pov
    }
}
