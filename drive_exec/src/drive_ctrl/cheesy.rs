//! Cheesy drive and curvature drive calculations
//!
//! Cheesy drive maps a throttle and a turn input onto the left and right
//! sides of a differential drivetrain. Turn authority is proportional to
//! throttle so the robot does not spin uncontrollably at low speed, unless
//! quick-turn is engaged (or, in threshold mode, the throttle is low).
//!
//! When one side saturates its overflow is skimmed into the opposite side so
//! the turn rate is kept rather than being flattened by clamping.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

use super::limit::{limit, skim};
use super::params::{CurvatureParams, DiffParams};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Replacement for a zero curvature ratio, keeps the division finite.
const MIN_CURVE_RATIO: f64 = 1e-10;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Left and right efforts of a differential drivetrain, each in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DiffOutput {
    pub left: f64,
    pub right: f64,
}

/// Differential drive kinematics.
#[derive(Debug, Clone, Default)]
pub struct DiffDrive {
    params: DiffParams,
    curvature: CurvatureParams,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// How the turn input is scaled by the throttle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TurnMode {
    /// Turn is scaled by throttle unless the quick-turn button (the `bool`)
    /// is held.
    QuickTurn(bool),

    /// Turn is scaled by throttle only once the throttle magnitude exceeds
    /// the configured threshold.
    ThresholdTurn,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DiffOutput {
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// Output with both sides limited to [-1, 1].
    pub fn limited(left: f64, right: f64) -> Self {
        Self {
            left: limit(left),
            right: limit(right),
        }
    }
}

impl DiffDrive {
    pub fn new(params: DiffParams, curvature: CurvatureParams) -> Self {
        Self { params, curvature }
    }

    pub fn params(&self) -> &DiffParams {
        &self.params
    }

    /// Calculate the left and right efforts for a throttle and turn demand.
    pub fn calc(&self, throttle: f64, turn: f64, mode: TurnMode) -> DiffOutput {
        let scale_turn = match mode {
            TurnMode::QuickTurn(engaged) => !engaged,
            TurnMode::ThresholdTurn => throttle.abs() > self.params.turn_threshold,
        };

        let turn = if scale_turn {
            turn * (self.params.turn_gain * throttle.abs())
        }
        else {
            turn
        };

        let left_raw = throttle - turn;
        let right_raw = throttle + turn;

        let left = left_raw + skim(right_raw, self.params.skim_gain);
        let right = right_raw + skim(left_raw, self.params.skim_gain);

        DiffOutput::limited(left, right)
    }

    /// Drive along an arc of the given curve at the given output magnitude.
    ///
    /// Negative curves turn left by slowing the left side, positive curves
    /// turn right. The sensitivity parameter sets how quickly the inner side
    /// slows as the curve grows.
    pub fn calc_curvature(&self, magnitude: f64, curve: f64) -> DiffOutput {
        let sensitivity = self.curvature.sensitivity;

        let ratio = |value: f64| {
            let r = (value - sensitivity) / (value + sensitivity);
            // Only an infinite curve gives NaN here, whose limit is 1. An
            // infinite ratio is left alone so the inner side stops.
            if r.is_nan() {
                1.0
            }
            else if r == 0.0 {
                MIN_CURVE_RATIO
            }
            else {
                r
            }
        };

        if curve < 0.0 {
            let r = ratio((-curve).ln());
            DiffOutput::limited(magnitude / r, magnitude)
        }
        else if curve > 0.0 {
            let r = ratio(curve.ln());
            DiffOutput::limited(magnitude, magnitude / r)
        }
        else {
            // Zero (or NaN) curve drives straight
            DiffOutput::limited(magnitude, magnitude)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn diff_drive() -> DiffDrive {
        DiffDrive::new(DiffParams::default(), CurvatureParams::default())
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_no_phantom_rotation() {
        let out = diff_drive().calc(0.0, 0.5, TurnMode::QuickTurn(false));
        assert_eq!(out.left, 0.0);
        assert_eq!(out.right, 0.0);
    }

    #[test]
    fn test_quick_turn_in_place() {
        let out = diff_drive().calc(0.0, 0.5, TurnMode::QuickTurn(true));
        assert_eq!(out, DiffOutput::new(-0.5, 0.5));
    }

    #[test]
    fn test_turn_scaled_by_throttle() {
        // turn = 0.5 * 1.0 * 0.5 = 0.25
        let out = diff_drive().calc(0.5, 0.5, TurnMode::QuickTurn(false));
        assert_close(out.left, 0.25);
        assert_close(out.right, 0.75);
    }

    #[test]
    fn test_skim_keeps_turn() {
        // Raw sides are 0.0 and 2.0, the right overflow of 1.0 is skimmed by
        // half into the left side.
        let out = diff_drive().calc(1.0, 1.0, TurnMode::QuickTurn(true));
        assert_close(out.left, -0.5);
        assert_close(out.right, 1.0);
    }

    #[test]
    fn test_threshold_turn() {
        let dd = diff_drive();

        // Below the threshold the turn is unscaled, so the robot can pivot
        let out = dd.calc(0.0, 0.5, TurnMode::ThresholdTurn);
        assert_eq!(out, DiffOutput::new(-0.5, 0.5));

        let out = dd.calc(0.5, 0.4, TurnMode::ThresholdTurn);
        assert_close(out.left, 0.1);
        assert_close(out.right, 0.9);

        // Above the threshold turn authority follows throttle: 0.4 * 0.8,
        // giving raw sides of 0.48 and 1.12 before skimming
        let out = dd.calc(0.8, 0.4, TurnMode::ThresholdTurn);
        assert_close(out.left, 0.42);
        assert_close(out.right, 1.0);

        // Reverse uses the throttle magnitude
        let out = dd.calc(-0.8, 0.4, TurnMode::ThresholdTurn);
        assert_close(out.left, -1.0);
        assert_close(out.right, -0.42);
    }

    #[test]
    fn test_outputs_bounded() {
        let dd = diff_drive();

        for t in -15..=15 {
            for r in -15..=15 {
                let throttle = t as f64 / 10.0;
                let turn = r as f64 / 10.0;

                for mode in &[
                    TurnMode::QuickTurn(true),
                    TurnMode::QuickTurn(false),
                    TurnMode::ThresholdTurn,
                ] {
                    let out = dd.calc(throttle, turn, *mode);
                    assert!(out.left.abs() <= 1.0 && out.right.abs() <= 1.0);
                }
            }
        }

        let out = dd.calc(f64::NAN, 0.5, TurnMode::QuickTurn(true));
        assert!(out.left.abs() <= 1.0 && out.right.abs() <= 1.0);
    }

    #[test]
    fn test_deterministic() {
        let dd = diff_drive();
        let a = dd.calc(0.37, -0.81, TurnMode::QuickTurn(false));
        let b = dd.calc(0.37, -0.81, TurnMode::QuickTurn(false));
        assert_eq!(a.left.to_bits(), b.left.to_bits());
        assert_eq!(a.right.to_bits(), b.right.to_bits());
    }

    #[test]
    fn test_curvature() {
        let dd = diff_drive();

        assert_eq!(dd.calc_curvature(0.6, 0.0), DiffOutput::new(0.6, 0.6));

        // ln(0.5) = -0.693, ratio = (-0.693 - 0.5) / (-0.693 + 0.5) = 6.18
        let out = dd.calc_curvature(0.6, 0.5);
        let r = (0.5f64.ln() - 0.5) / (0.5f64.ln() + 0.5);
        assert_close(out.left, 0.6);
        assert_close(out.right, 0.6 / r);
        assert!(out.right < out.left);

        let out = dd.calc_curvature(0.6, -0.5);
        assert_close(out.left, 0.6 / r);
        assert_close(out.right, 0.6);

        // ln(curve) equal to the sensitivity gives a zero ratio
        let sharp = DiffDrive::new(
            DiffParams::default(),
            CurvatureParams {
                sensitivity: 2f64.ln(),
            },
        );
        assert_eq!(sharp.calc_curvature(0.5, 2.0), DiffOutput::new(0.5, 1.0));

        // Infinite curves behave as the limit of large curves
        let out = dd.calc_curvature(0.5, f64::INFINITY);
        assert_eq!(out, DiffOutput::new(0.5, 0.5));

        let out = dd.calc_curvature(3.0, -2.0);
        assert!(out.left.abs() <= 1.0 && out.right.abs() <= 1.0);
    }

    #[test]
    fn test_curvature_inner_side_stops_at_pole() {
        let dd = diff_drive();
        let pole = (-0.5f64).exp();

        // Either side of ln(curve) = -sensitivity the inner side tends to
        // zero, and it must stay there at the pole itself
        for curve in &[pole - 1e-12, pole, pole + 1e-12] {
            let out = dd.calc_curvature(0.8, *curve);
            assert_close(out.left, 0.8);
            assert!(out.right.abs() < 1e-9, "right = {}", out.right);

            let out = dd.calc_curvature(0.8, -*curve);
            assert!(out.left.abs() < 1e-9, "left = {}", out.left);
            assert_close(out.right, 0.8);
        }
    }
}
