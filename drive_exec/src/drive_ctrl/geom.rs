//! Geometric primitives used by the swerve kinematics

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::fmt;

use super::DriveCtrlError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An immutable point in the robot body frame, relative to the centre of
/// rotation.
///
/// Units: meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    x: f64,
    y: f64,
}

/// Desired speed and heading of one swerve module.
///
/// Instances are owned by the swerve engine and overwritten every cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct WheelVector {
    /// Normalised speed, between -1 and +1 after normalisation.
    pub magnitude: f64,

    /// Heading measured from the chassis forward axis.
    ///
    /// Units: degrees
    pub angle: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Wheel layout of a swerve drivetrain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DriveGeometry {
    /// Symmetric rectangular chassis with a module at each corner.
    ///
    /// Module order is front-left, front-right, rear-left, rear-right.
    Rectangular { length_m: f64, width_m: f64 },

    /// Arbitrary module positions, in actuation order.
    Modules(Vec<Point2D>),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ {}, {} ]", self.x, self.y)
    }
}

impl WheelVector {
    pub fn new(magnitude: f64, angle: f64) -> Self {
        Self { magnitude, angle }
    }
}

impl fmt::Display for WheelVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ {}, {} ]", self.magnitude, self.angle)
    }
}

impl Default for DriveGeometry {
    fn default() -> Self {
        DriveGeometry::Rectangular {
            length_m: 1.0,
            width_m: 1.0,
        }
    }
}

impl DriveGeometry {
    /// Number of swerve modules described by this geometry.
    pub fn num_modules(&self) -> usize {
        match self {
            DriveGeometry::Rectangular { .. } => 4,
            DriveGeometry::Modules(m) => m.len(),
        }
    }

    /// Check that the geometry describes a physically meaningful chassis.
    pub fn validate(&self) -> Result<(), DriveCtrlError> {
        match self {
            DriveGeometry::Rectangular { length_m, width_m } => {
                let valid = |d: f64| d.is_finite() && d > 0.0;
                if !valid(*length_m) || !valid(*width_m) {
                    return Err(DriveCtrlError::InvalidGeometry(format!(
                        "chassis dimensions must be finite and positive, found {} x {}",
                        length_m, width_m
                    )));
                }
            }
            DriveGeometry::Modules(modules) => {
                if modules.is_empty() {
                    return Err(DriveCtrlError::InvalidGeometry(String::from(
                        "at least one module position is required",
                    )));
                }
                if let Some(p) = modules
                    .iter()
                    .find(|p| !p.x.is_finite() || !p.y.is_finite())
                {
                    return Err(DriveCtrlError::InvalidGeometry(format!(
                        "module position {} is not finite",
                        p
                    )));
                }
            }
        }

        Ok(())
    }
}
