//! Parameters structure for DriveCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::{DriveGeometry, FadeOutCurve, PlateauCurve};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for drive control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {

    /// Time after the last operator input at which the drivetrain is stopped.
    ///
    /// Units: seconds
    pub cmd_timeout_s: f64,

    #[serde(default)]
    pub diff: DiffParams,

    #[serde(default)]
    pub curvature: CurvatureParams,

    #[serde(default)]
    pub culver: CulverParams,

    #[serde(default)]
    pub swerve: SwerveParams,
}

/// Tuning of the cheesy (quick-turn/threshold) differential kinematics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffParams {
    /// Fraction of one side's overflow fed into the opposite side.
    pub skim_gain: f64,

    /// Gain applied to the throttle-proportional turn scaling.
    pub turn_gain: f64,

    /// Throttle magnitude above which threshold-turn scales the turn input.
    pub turn_threshold: f64,

    /// If true tank and cheesy inputs are squared (keeping sign) before use.
    pub squared_inputs: bool,
}

/// Tuning of the curvature drive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurvatureParams {
    pub sensitivity: f64,
}

/// Tuning of the Culver (polar steering) kinematics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CulverParams {
    pub radius_gain: f64,
    pub raw_gain: f64,
    pub alt_raw_gain: f64,

    /// Enablement curve of the radius and raw terms.
    pub radius_curve: FadeOutCurve,

    /// Enablement curve of the alternate raw term.
    pub alt_raw_curve: PlateauCurve,
}

/// Swerve configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SwerveParams {
    pub geometry: DriveGeometry,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            cmd_timeout_s: 0.5,
            diff: DiffParams::default(),
            curvature: CurvatureParams::default(),
            culver: CulverParams::default(),
            swerve: SwerveParams::default(),
        }
    }
}

impl Default for DiffParams {
    fn default() -> Self {
        Self {
            skim_gain: 0.5,
            turn_gain: 1.0,
            turn_threshold: 0.5,
            squared_inputs: false,
        }
    }
}

impl Default for CurvatureParams {
    fn default() -> Self {
        Self { sensitivity: 0.5 }
    }
}

impl Default for CulverParams {
    fn default() -> Self {
        Self {
            radius_gain: 1.0,
            raw_gain: 1.0,
            alt_raw_gain: 1.0,
            radius_curve: FadeOutCurve::default(),
            alt_raw_curve: PlateauCurve::default(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::drive_ctrl::Point2D;

    #[test]
    fn test_parse_minimal() {
        let p: Params = util::params::parse("cmd_timeout_s = 0.25").unwrap();

        assert_eq!(p.cmd_timeout_s, 0.25);
        assert_eq!(p.diff, DiffParams::default());
        assert_eq!(p.culver, CulverParams::default());
        assert_eq!(p.swerve.geometry, DriveGeometry::default());
    }

    #[test]
    fn test_parse_full() {
        let p: Params = util::params::parse(
            r#"
            cmd_timeout_s = 1.0

            [diff]
            skim_gain = 0.3
            turn_threshold = 0.6
            squared_inputs = true

            [curvature]
            sensitivity = 0.8

            [culver]
            raw_gain = 0.9

            [culver.radius_curve]
            full_until_deg = 90.0
            zero_at_deg = 120.0

            [swerve]
            geometry = { Modules = [ { x = 0.3, y = 0.0 }, { x = -0.3, y = 0.0 } ] }
            "#,
        )
        .unwrap();

        assert_eq!(p.diff.skim_gain, 0.3);
        assert_eq!(p.diff.turn_gain, 1.0);
        assert_eq!(p.diff.turn_threshold, 0.6);
        assert!(p.diff.squared_inputs);
        assert_eq!(p.curvature.sensitivity, 0.8);
        assert_eq!(p.culver.raw_gain, 0.9);
        assert_eq!(p.culver.radius_gain, 1.0);
        assert_eq!(
            p.culver.radius_curve,
            FadeOutCurve {
                full_until_deg: 90.0,
                zero_at_deg: 120.0
            }
        );
        assert_eq!(p.culver.alt_raw_curve, PlateauCurve::default());
        assert_eq!(
            p.swerve.geometry,
            DriveGeometry::Modules(vec![Point2D::new(0.3, 0.0), Point2D::new(-0.3, 0.0)])
        );
    }

    #[test]
    fn test_parse_rectangular() {
        let p: Params = util::params::parse(
            r#"
            cmd_timeout_s = 0.5

            [swerve]
            geometry = { Rectangular = { length_m = 0.7, width_m = 0.5 } }
            "#,
        )
        .unwrap();

        assert_eq!(
            p.swerve.geometry,
            DriveGeometry::Rectangular {
                length_m: 0.7,
                width_m: 0.5
            }
        );
    }
}
