//! # Gamepad telecommands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Raw state of an operator gamepad, as read from the device.
///
/// Axis values are the device's raw readings (no deadband or inversion applied).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PadState {
    /// Raw axis values, indexed by axis number.
    pub axes: Vec<f64>,

    /// Button states, indexed from zero. Button number `n` is stored at index `n - 1`.
    pub buttons: Vec<bool>,

    /// POV hat angle in degrees, or `None` when the hat is released.
    pub pov: Option<i32>,
}
