//! # Drivetrain Equipment Demands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Demand for a single swerve module.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct ModuleDem {
    /// Normalised drive speed, between -1 and +1.
    pub speed: f64,

    /// Module heading relative to the chassis forward axis.
    ///
    /// Units: degrees
    pub angle_deg: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Demands that are sent from DriveCtrl to the drivetrain actuators.
///
/// Every scalar in a set of demands produced by DriveCtrl is bounded to [-1, 1], except module
/// angles which are periodic.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum DriveDems {
    /// Left and right side efforts of a differential (tank) drivetrain.
    Differential { left: f64, right: f64 },

    /// One demand per swerve module, in the configured module order.
    Swerve { modules: Vec<ModuleDem> },
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl Default for DriveDems {
    fn default() -> Self {
        DriveDems::Differential {
            left: 0.0,
            right: 0.0,
        }
    }
}

impl DriveDems {
    /// Return a copy of these demands with every drive speed set to zero.
    ///
    /// Swerve module angles are kept so that the wheels do not slew while stopping.
    pub fn stopped(&self) -> Self {
        match self {
            DriveDems::Differential { .. } => DriveDems::default(),
            DriveDems::Swerve { modules } => DriveDems::Swerve {
                modules: modules
                    .iter()
                    .map(|m| ModuleDem {
                        speed: 0.0,
                        angle_deg: m.angle_deg,
                    })
                    .collect(),
            },
        }
    }

    /// Returns true if every speed/effort in the demands is within [-1, 1].
    pub fn is_bounded(&self) -> bool {
        let in_range = |v: f64| (-1.0..=1.0).contains(&v);

        match self {
            DriveDems::Differential { left, right } => in_range(*left) && in_range(*right),
            DriveDems::Swerve { modules } => modules.iter().all(|m| in_range(m.speed)),
        }
    }
}
