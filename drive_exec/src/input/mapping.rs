//! Mapping of controller samples onto drive inputs

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::tc::drive::DriveInput;
use serde::{Deserialize, Serialize};

use super::{AxisSource, Button, Controller};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// How the sticks of a controller drive the robot.
///
/// In all modes the right bumper is the quick-turn button where one is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PadMapping {
    /// Left stick drives the left side, right stick the right side.
    Tank,

    /// Left stick is throttle, right stick turns.
    Cheesy,

    /// As `Cheesy` without the quick-turn button.
    CheesyThreshold,

    /// Left stick is throttle, right stick position steers.
    Culver,

    /// As `Culver` using the alternate raw curve.
    CulverAlt,

    /// Left stick translates, right stick rotates.
    Swerve,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PadMapping {
    /// Build the drive input from the current controller sample.
    ///
    /// `heading_deg` is only used by field-centric swerve driving.
    pub fn input<S: AxisSource>(&self, ctrl: &Controller<S>, heading_deg: f64) -> DriveInput {
        let quick_turn = ctrl.button_held(Button::RB);

        match self {
            PadMapping::Tank => DriveInput::Tank {
                left: ctrl.left_y(),
                right: ctrl.right_y(),
            },
            PadMapping::Cheesy => DriveInput::Cheesy {
                throttle: ctrl.left_y(),
                turn: ctrl.right_x(),
                quick_turn,
            },
            PadMapping::CheesyThreshold => DriveInput::CheesyThreshold {
                throttle: ctrl.left_y(),
                turn: ctrl.right_x(),
            },
            PadMapping::Culver => DriveInput::Culver {
                throttle: ctrl.left_y(),
                x: ctrl.right_x(),
                y: ctrl.right_y(),
                quick_turn,
            },
            PadMapping::CulverAlt => DriveInput::CulverAlt {
                throttle: ctrl.left_y(),
                x: ctrl.right_x(),
                y: ctrl.right_y(),
            },
            // Strafe and rotation are positive to the right
            PadMapping::Swerve => DriveInput::Swerve {
                strafe: -ctrl.left_x(),
                throttle: ctrl.left_y(),
                rotation: -ctrl.right_x(),
                gyro_deg: heading_deg,
            },
        }
    }
}
