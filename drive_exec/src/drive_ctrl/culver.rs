//! Culver drive calculations
//!
//! Culver drive steers a differential drivetrain from the position of a
//! steering stick. The stick is decomposed into its deflection `r` and its
//! angle `theta` from vertical, so that the sharpness of the turn follows
//! how far the stick is pushed sideways. Enablement curves over `|theta|`
//! stop small diagonal stick noise near vertical from injecting a turn.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use util::maths::lin_map;

use super::cheesy::DiffOutput;
use super::params::CulverParams;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Culver drive kinematics.
#[derive(Debug, Clone, Default)]
pub struct CulverDrive {
    params: CulverParams,
}

/// Enablement curve which is fully on up to `full_until_deg` and fades
/// linearly to zero at `zero_at_deg`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeOutCurve {
    pub full_until_deg: f64,
    pub zero_at_deg: f64,
}

/// Enablement curve which is off up to `rise_start_deg`, rises linearly to
/// full at `rise_end_deg`, holds until `fall_start_deg` and falls linearly to
/// zero at `fall_end_deg`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlateauCurve {
    pub rise_start_deg: f64,
    pub rise_end_deg: f64,
    pub fall_start_deg: f64,
    pub fall_end_deg: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for FadeOutCurve {
    fn default() -> Self {
        Self {
            full_until_deg: 95.0,
            zero_at_deg: 115.0,
        }
    }
}

impl FadeOutCurve {
    /// Evaluate the curve at the given absolute angle.
    pub fn eval(&self, abs_theta_deg: f64) -> f64 {
        if abs_theta_deg < self.full_until_deg {
            1.0
        }
        else if abs_theta_deg >= self.zero_at_deg {
            0.0
        }
        else {
            lin_map(
                (self.full_until_deg, self.zero_at_deg),
                (1.0, 0.0),
                abs_theta_deg,
            )
        }
    }
}

impl Default for PlateauCurve {
    fn default() -> Self {
        Self {
            rise_start_deg: 90.0,
            rise_end_deg: 135.0,
            fall_start_deg: 175.0,
            fall_end_deg: 180.0,
        }
    }
}

impl PlateauCurve {
    /// Evaluate the curve at the given absolute angle.
    pub fn eval(&self, abs_theta_deg: f64) -> f64 {
        if abs_theta_deg <= self.rise_start_deg {
            0.0
        }
        else if abs_theta_deg <= self.rise_end_deg {
            lin_map(
                (self.rise_start_deg, self.rise_end_deg),
                (0.0, 1.0),
                abs_theta_deg,
            )
        }
        else if abs_theta_deg < self.fall_start_deg {
            1.0
        }
        else if abs_theta_deg < self.fall_end_deg {
            lin_map(
                (self.fall_start_deg, self.fall_end_deg),
                (1.0, 0.0),
                abs_theta_deg,
            )
        }
        else {
            0.0
        }
    }
}

impl CulverDrive {
    pub fn new(params: CulverParams) -> Self {
        Self { params }
    }

    /// Calculate the efforts using the quick-turn button method.
    ///
    /// With quick-turn held the raw term turns the robot independently of
    /// throttle. Otherwise the throttle-scaled radius term is used, reversed
    /// when driving backwards so the turn direction stays intuitive.
    pub fn calc(&self, throttle: f64, x: f64, y: f64, quick_turn: bool) -> DiffOutput {
        let mut left = throttle;
        let mut right = throttle;

        if quick_turn {
            let raw = self.calc_raw(x, y);
            left += raw;
            right -= raw;
        }
        else {
            let radius = self.calc_radius(throttle, x, y);
            if throttle < 0.0 {
                left -= radius;
                right += radius;
            }
            else {
                left += radius;
                right -= radius;
            }
        }

        DiffOutput::limited(left, right)
    }

    /// Calculate the efforts using the alternate raw (no quick-turn) method.
    pub fn calc_alt(&self, throttle: f64, x: f64, y: f64) -> DiffOutput {
        let turn = self.calc_radius(throttle, x, y) + self.calc_alt_raw(x, y);

        let (left, right) = if throttle > 0.0 {
            (throttle - turn, throttle + turn)
        }
        else {
            (throttle + turn, throttle - turn)
        };

        DiffOutput::limited(left, right)
    }

    /// The radius term, scaled by stick deflection, stick angle and throttle.
    fn calc_radius(&self, throttle: f64, x: f64, y: f64) -> f64 {
        let r = x.hypot(y);
        let theta = theta_from_vertical(x, y);

        r * throttle
            * normalise_angle_90(theta)
            * self.params.radius_gain
            * self.params.radius_curve.eval(theta.abs())
    }

    /// The raw term, as the radius term without the throttle.
    fn calc_raw(&self, x: f64, y: f64) -> f64 {
        let r = x.hypot(y);
        let theta = theta_from_vertical(x, y);

        r * normalise_angle_90(theta)
            * self.params.raw_gain
            * self.params.radius_curve.eval(theta.abs())
    }

    /// The alternate raw term, signed by the stick side rather than scaled
    /// by its angle.
    fn calc_alt_raw(&self, x: f64, y: f64) -> f64 {
        let r = x.hypot(y);
        let theta = theta_from_vertical(x, y);
        let sign = if theta > 0.0 { 1.0 } else { -1.0 };

        r * sign * self.params.alt_raw_gain * self.params.alt_raw_curve.eval(theta.abs())
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Angle of the stick from vertical.
///
/// A vertical stick gives 0, negative x gives positive angles.
///
/// Units: degrees
pub fn theta_from_vertical(x: f64, y: f64) -> f64 {
    // Adding zero turns -0.0 into 0.0
    0.0 + -(x.atan2(y).to_degrees())
}

/// Scale an angle within +/-90 degrees to +/-1, angles beyond that give 0.
pub fn normalise_angle_90(theta_deg: f64) -> f64 {
    if theta_deg.abs() <= 90.0 {
        theta_deg / 90.0
    }
    else {
        0.0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_theta_from_vertical() {
        assert_eq!(theta_from_vertical(0.0, 1.0), 0.0);
        assert!(theta_from_vertical(0.0, 1.0).is_sign_positive());
        assert_close(theta_from_vertical(-1.0, 0.0), 90.0);
        assert_close(theta_from_vertical(1.0, 0.0), -90.0);
        assert_close(theta_from_vertical(-1.0, -1.0), 135.0);
        assert_close(theta_from_vertical(0.0, -1.0).abs(), 180.0);
    }

    #[test]
    fn test_normalise_angle_90() {
        assert_eq!(normalise_angle_90(0.0), 0.0);
        assert_eq!(normalise_angle_90(45.0), 0.5);
        assert_eq!(normalise_angle_90(-90.0), -1.0);
        assert_eq!(normalise_angle_90(91.0), 0.0);
        assert_eq!(normalise_angle_90(-135.0), 0.0);
    }

    #[test]
    fn test_fade_out_curve() {
        let c = FadeOutCurve::default();
        assert_eq!(c.eval(0.0), 1.0);
        assert_eq!(c.eval(94.9), 1.0);
        assert_eq!(c.eval(95.0), 1.0);
        assert_close(c.eval(105.0), 0.5);
        assert_eq!(c.eval(115.0), 0.0);
        assert_eq!(c.eval(170.0), 0.0);
    }

    #[test]
    fn test_plateau_curve() {
        let c = PlateauCurve::default();
        assert_eq!(c.eval(0.0), 0.0);
        assert_eq!(c.eval(90.0), 0.0);
        assert_close(c.eval(112.5), 0.5);
        assert_eq!(c.eval(135.0), 1.0);
        assert_eq!(c.eval(150.0), 1.0);
        assert_eq!(c.eval(175.0), 1.0);
        assert_close(c.eval(177.5), 0.5);
        assert_eq!(c.eval(180.0), 0.0);
    }

    #[test]
    fn test_vertical_stick_no_turn() {
        let cd = CulverDrive::default();

        for t in -10..=10 {
            let throttle = t as f64 / 10.0;
            for &quick_turn in &[true, false] {
                let out = cd.calc(throttle, 0.0, 1.0, quick_turn);
                assert_eq!(out.left, out.right);
                assert_eq!(out.left, throttle);
            }
            let out = cd.calc_alt(throttle, 0.0, 1.0);
            assert_eq!(out.left, out.right);
        }
    }

    #[test]
    fn test_zero_stick_no_turn() {
        let cd = CulverDrive::default();

        let out = cd.calc(0.4, 0.0, 0.0, true);
        assert_eq!(out, DiffOutput::new(0.4, 0.4));
        let out = cd.calc_alt(-0.4, 0.0, 0.0);
        assert_eq!(out, DiffOutput::new(-0.4, -0.4));
    }

    #[test]
    fn test_quick_turn() {
        let cd = CulverDrive::default();

        // Stick fully sideways turns in place
        let out = cd.calc(0.0, -1.0, 0.0, true);
        assert_close(out.left, 1.0);
        assert_close(out.right, -1.0);

        // Diagonal stick gives half the turn angle at full deflection
        let out = cd.calc(0.0, -FRAC_1_SQRT_2, FRAC_1_SQRT_2, true);
        assert_close(out.left, 0.5);
        assert_close(out.right, -0.5);
    }

    #[test]
    fn test_radius_reverses_with_throttle() {
        let cd = CulverDrive::default();

        let out = cd.calc(0.5, -1.0, 0.0, false);
        assert_close(out.left, 1.0);
        assert_close(out.right, 0.0);

        let out = cd.calc(-0.5, -1.0, 0.0, false);
        assert_close(out.left, 0.0);
        assert_close(out.right, -1.0);

        // No throttle, no radius turn
        let out = cd.calc(0.0, -1.0, 0.0, false);
        assert_eq!(out, DiffOutput::new(0.0, 0.0));
    }

    #[test]
    fn test_alt_raw() {
        let cd = CulverDrive::default();

        // Stick down and to the side is inside the alt raw plateau
        let out = cd.calc_alt(0.5, -FRAC_1_SQRT_2, -FRAC_1_SQRT_2);
        assert_close(out.left, -0.5);
        assert_close(out.right, 1.0);

        let out = cd.calc_alt(-0.5, -FRAC_1_SQRT_2, -FRAC_1_SQRT_2);
        assert_close(out.left, 0.5);
        assert_close(out.right, -1.0);
    }

    #[test]
    fn test_outputs_bounded() {
        let cd = CulverDrive::default();

        for t in -12..=12 {
            for i in 0..72 {
                let a = (i as f64 * 5.0).to_radians();
                let (x, y) = (1.3 * a.sin(), 1.3 * a.cos());
                let throttle = t as f64 / 10.0;

                for out in &[
                    cd.calc(throttle, x, y, true),
                    cd.calc(throttle, x, y, false),
                    cd.calc_alt(throttle, x, y),
                ] {
                    assert!(out.left.abs() <= 1.0 && out.right.abs() <= 1.0);
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let cd = CulverDrive::default();
        let (x, y) = (0.42, -0.63);

        for quick_turn in &[true, false] {
            let a = cd.calc(0.37, x, y, *quick_turn);
            let b = cd.calc(0.37, x, y, *quick_turn);
            assert_eq!(a.left.to_bits(), b.left.to_bits());
            assert_eq!(a.right.to_bits(), b.right.to_bits());
        }

        let a = cd.calc_alt(-0.58, x, y);
        let b = cd.calc_alt(-0.58, x, y);
        assert_eq!(a.left.to_bits(), b.left.to_bits());
        assert_eq!(a.right.to_bits(), b.right.to_bits());
    }
}
