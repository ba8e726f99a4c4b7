//! # Drive input telecommands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A new gyro heading for field-centric driving.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeadingUpdate {
    /// Units: degrees
    pub heading_deg: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// One operator input sample, already normalised, for one of the drive kinematics.
///
/// All scalars are nominally in [-1, 1]. Values outside of that range are not rejected, they
/// propagate through the kinematics and are clamped when the demands are produced.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq)]
pub enum DriveInput {
    /// Direct left/right side efforts.
    Tank { left: f64, right: f64 },

    /// Cheesy drive with the quick-turn button.
    ///
    /// When `quick_turn` is held the robot may turn in place, otherwise turn authority is
    /// proportional to throttle.
    Cheesy {
        throttle: f64,
        turn: f64,
        quick_turn: bool,
    },

    /// Cheesy drive where turn scaling only engages above the throttle threshold.
    CheesyThreshold { throttle: f64, turn: f64 },

    /// Constant curvature arc, used for autonomous manouvres.
    ///
    /// Negative curves turn left, positive curves turn right.
    Curvature { magnitude: f64, curve: f64 },

    /// Culver drive using the steering stick position and the quick-turn button.
    Culver {
        throttle: f64,
        x: f64,
        y: f64,
        quick_turn: bool,
    },

    /// Culver drive using the alternate raw enablement curve (no quick-turn).
    CulverAlt { throttle: f64, x: f64, y: f64 },

    /// Swerve drive.
    Swerve {
        strafe: f64,
        throttle: f64,
        rotation: f64,

        /// Gyro heading for field-centric driving, zero for robot-centric.
        ///
        /// Units: degrees
        gyro_deg: f64,
    },

    /// Stop all drive motion.
    Stop,
}
