//! Swerve drive calculations
//!
//! Converts a field-centric (strafe, throttle, rotation) demand into a speed
//! and heading for every swerve module. Two layouts are supported, a
//! symmetric rectangular chassis with one module in each corner and an
//! arbitrary list of module positions.
//!
//! The engine owns one `WheelVector` per module which is overwritten on each
//! call to `calc`, so the returned slice is only valid until the next call.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use util::maths::wrap_180;

use super::{DriveGeometry, Point2D, WheelVector};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Index of the front left module in a rectangular layout.
pub const FRONT_LEFT: usize = 0;

/// Index of the front right module in a rectangular layout.
pub const FRONT_RIGHT: usize = 1;

/// Index of the rear left module in a rectangular layout.
pub const REAR_LEFT: usize = 2;

/// Index of the rear right module in a rectangular layout.
pub const REAR_RIGHT: usize = 3;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Swerve drive kinematics.
#[derive(Debug, Clone)]
pub struct SwerveDrive {
    layout: Layout,

    /// Output buffer, one entry per module.
    outputs: Vec<WheelVector>,

    /// True if the last calculation had to scale the speeds down.
    normalised: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Precomputed geometry of the modules.
#[derive(Debug, Clone)]
enum Layout {
    /// Sine and cosine of the chassis angle `atan2(length, width)`.
    Rectangular { sin_phi: f64, cos_phi: f64 },

    /// Sine and cosine of each module's position angle `atan2(y, x)`.
    Modules(Vec<(f64, f64)>),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for SwerveDrive {
    fn default() -> Self {
        Self::new(&DriveGeometry::default())
    }
}

impl SwerveDrive {
    /// Create the engine for the given geometry.
    ///
    /// The geometry should have been validated beforehand.
    pub fn new(geometry: &DriveGeometry) -> Self {
        match geometry {
            DriveGeometry::Rectangular { length_m, width_m } => {
                Self::rectangular(*length_m, *width_m)
            }
            DriveGeometry::Modules(modules) => Self::from_modules(modules.clone()),
        }
    }

    /// Create the engine for a symmetric rectangular chassis.
    pub fn rectangular(length_m: f64, width_m: f64) -> Self {
        let phi = length_m.atan2(width_m);

        Self {
            layout: Layout::Rectangular {
                sin_phi: phi.sin(),
                cos_phi: phi.cos(),
            },
            outputs: vec![WheelVector::default(); 4],
            normalised: false,
        }
    }

    /// Create the engine for arbitrary module positions.
    ///
    /// Positions are in the body frame (x forward, y left) relative to the
    /// centre of rotation, and the output order follows the input order.
    pub fn from_modules(modules: Vec<Point2D>) -> Self {
        let phis: Vec<(f64, f64)> = modules
            .iter()
            .map(|p| {
                let phi = p.y().atan2(p.x());
                (phi.sin(), phi.cos())
            })
            .collect();

        Self {
            outputs: vec![WheelVector::default(); phis.len()],
            layout: Layout::Modules(phis),
            normalised: false,
        }
    }

    pub fn num_modules(&self) -> usize {
        self.outputs.len()
    }

    /// The outputs of the last calculation.
    pub fn outputs(&self) -> &[WheelVector] {
        &self.outputs
    }

    /// True if the last calculation scaled the speeds down to fit in [-1, 1].
    pub fn is_normalised(&self) -> bool {
        self.normalised
    }

    /// Calculate the module speeds and headings.
    ///
    /// # Inputs
    /// - `strafe`: sideways demand, positive right
    /// - `throttle`: forward demand
    /// - `rotation`: rotation demand, positive clockwise
    /// - `gyro_deg`: robot heading (positive anticlockwise) used to make the
    ///   demand field-centric, a non-finite heading is treated as zero
    ///
    /// # Outputs
    /// One `WheelVector` per module, speeds in [-1, 1] and headings in
    /// degrees from the chassis forward axis.
    pub fn calc(
        &mut self,
        strafe: f64,
        throttle: f64,
        rotation: f64,
        gyro_deg: f64,
    ) -> &[WheelVector] {
        let strafe = finite_or_zero(strafe);
        let throttle = finite_or_zero(throttle);
        let rotation = finite_or_zero(rotation);
        let gyro_deg = finite_or_zero(gyro_deg);

        // Rotate the demand into the field frame
        let mag = strafe.hypot(throttle);
        let theta = throttle.atan2(strafe) - gyro_deg.to_radians();
        let fwd = mag * theta.sin();
        let str_ = mag * theta.cos();

        match self.layout {
            Layout::Rectangular { sin_phi, cos_phi } => {
                let a = str_ - rotation * sin_phi;
                let b = str_ + rotation * sin_phi;
                let c = fwd - rotation * cos_phi;
                let d = fwd + rotation * cos_phi;

                // (strafe component, forward component) per module
                let raw = [(b, d), (b, c), (a, d), (a, c)];
                for (out, (s, f)) in self.outputs.iter_mut().zip(raw.iter()) {
                    out.magnitude = s.hypot(*f);
                    out.angle = s.atan2(*f).to_degrees();
                }
            }
            Layout::Modules(ref phis) => {
                for (out, (sin_phi, cos_phi)) in self.outputs.iter_mut().zip(phis.iter()) {
                    let wx = fwd + rotation * sin_phi;
                    let wy = str_ + rotation * cos_phi;
                    out.magnitude = wx.hypot(wy);
                    out.angle = wy.atan2(wx).to_degrees();
                }
            }
        }

        self.normalise();

        &self.outputs
    }

    /// Scale all speeds by the largest one if it exceeds full output, which
    /// keeps the ratios between modules.
    fn normalise(&mut self) {
        let max = self
            .outputs
            .iter()
            .fold(1.0f64, |max, o| max.max(o.magnitude.abs()));

        self.normalised = max > 1.0;

        if self.normalised {
            for o in self.outputs.iter_mut() {
                o.magnitude /= max;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Signed shortest rotation from `current_deg` to `target_deg`, in
/// (-180, 180].
pub fn shortest_angle_delta(current_deg: f64, target_deg: f64) -> f64 {
    wrap_180(target_deg - current_deg)
}

/// The module setpoint equivalent to `target_deg` which is closest to
/// `current_deg`.
///
/// Allows a module to track a heading continuously without jumping through
/// a full turn when the target crosses +/-180 degrees.
pub fn find_absolute_angle(current_deg: f64, target_deg: f64) -> f64 {
    current_deg + shortest_angle_delta(current_deg, target_deg)
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    }
    else {
        0.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const TOL: f64 = 1e-9;

    fn rect_as_modules(length_m: f64, width_m: f64) -> SwerveDrive {
        let (hl, hw) = (length_m / 2.0, width_m / 2.0);
        SwerveDrive::from_modules(vec![
            Point2D::new(hl, hw),
            Point2D::new(hl, -hw),
            Point2D::new(-hl, hw),
            Point2D::new(-hl, -hw),
        ])
    }

    #[test]
    fn test_straight_ahead() {
        let mut rect = SwerveDrive::rectangular(0.7, 0.5);
        let mut mods = rect_as_modules(0.7, 0.5);

        for out in [rect.calc(0.0, 1.0, 0.0, 0.0), mods.calc(0.0, 1.0, 0.0, 0.0)].iter() {
            assert_eq!(out.len(), 4);
            for wv in out.iter() {
                assert!((wv.magnitude - 1.0).abs() < TOL);
                assert!(wv.angle.abs() < TOL);
            }
        }
        assert!(!rect.is_normalised());
    }

    #[test]
    fn test_strafe_right() {
        let mut rect = SwerveDrive::rectangular(0.7, 0.5);

        for wv in rect.calc(1.0, 0.0, 0.0, 0.0) {
            assert!((wv.magnitude - 1.0).abs() < TOL);
            assert!((wv.angle - 90.0).abs() < TOL);
        }
    }

    #[test]
    fn test_field_centric() {
        let mut rect = SwerveDrive::rectangular(0.7, 0.5);

        // A quarter turn of heading turns a forward demand into a sideways
        // one
        for wv in rect.calc(0.0, 1.0, 0.0, 90.0) {
            assert!((wv.magnitude - 1.0).abs() < TOL);
            assert!((wv.angle - 90.0).abs() < TOL);
        }
        for wv in rect.calc(0.0, 1.0, 0.0, -90.0) {
            assert!((wv.magnitude - 1.0).abs() < TOL);
            assert!((wv.angle + 90.0).abs() < TOL);
        }
    }

    #[test]
    fn test_modules_match_rectangular() {
        let mut rect = SwerveDrive::rectangular(0.7, 0.5);
        let mut mods = rect_as_modules(0.7, 0.5);

        let demands = [
            (0.0, 0.0, 1.0, 0.0),
            (0.3, 0.5, 0.2, 0.0),
            (-0.4, 0.1, -0.6, 30.0),
            (1.0, 1.0, 1.0, -120.0),
        ];

        for &(s, t, r, g) in demands.iter() {
            let a = rect.calc(s, t, r, g).to_vec();
            let b = mods.calc(s, t, r, g).to_vec();
            for (wa, wb) in a.iter().zip(b.iter()) {
                assert!((wa.magnitude - wb.magnitude).abs() < TOL);
                assert!(shortest_angle_delta(wa.angle, wb.angle).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_pure_rotation() {
        let mut rect = SwerveDrive::rectangular(1.0, 1.0);
        let out = rect.calc(0.0, 0.0, 0.5, 0.0);

        for wv in out {
            assert!((wv.magnitude - 0.5).abs() < TOL);
        }
        assert!((out[FRONT_LEFT].angle - 45.0).abs() < TOL);
        assert!((out[FRONT_RIGHT].angle - 135.0).abs() < TOL);
        assert!((out[REAR_LEFT].angle + 45.0).abs() < TOL);
        assert!((out[REAR_RIGHT].angle + 135.0).abs() < TOL);
    }

    #[test]
    fn test_normalisation() {
        let mut rect = SwerveDrive::rectangular(0.7, 0.5);

        // Below saturation speeds are the raw magnitudes
        let out = rect.calc(0.3, 0.4, 0.0, 0.0);
        for wv in out {
            assert!((wv.magnitude - 0.5).abs() < TOL);
        }
        assert!(!rect.is_normalised());

        // Above saturation the largest speed is exactly one
        let out = rect.calc(1.0, 1.0, 1.0, 0.0).to_vec();
        let max = out.iter().fold(0.0f64, |m, w| m.max(w.magnitude.abs()));
        assert!((max - 1.0).abs() < TOL);
        assert!(rect.is_normalised());

        let mut tri = SwerveDrive::from_modules(vec![
            Point2D::new(0.3, 0.0),
            Point2D::new(-0.15, 0.26),
            Point2D::new(-0.15, -0.26),
        ]);
        for i in -10..=10 {
            let v = i as f64 / 5.0;
            for wv in tri.calc(v, -v, v * 0.7, v * 40.0) {
                assert!(wv.magnitude.abs() <= 1.0);
            }
        }
    }

    #[test]
    fn test_non_finite_inputs() {
        let mut rect = SwerveDrive::rectangular(0.7, 0.5);

        let a = rect.calc(0.0, 1.0, 0.0, f64::NAN).to_vec();
        let b = rect.calc(0.0, 1.0, 0.0, 0.0).to_vec();
        assert_eq!(a, b);

        for wv in rect.calc(f64::INFINITY, f64::NAN, 0.0, 0.0) {
            assert_eq!(wv.magnitude, 0.0);
        }
    }

    #[test]
    fn test_idempotent() {
        let mut rect = SwerveDrive::rectangular(0.7, 0.5);

        let a = rect.calc(0.2, -0.7, 0.4, 12.0).to_vec();
        let b = rect.calc(0.2, -0.7, 0.4, 12.0).to_vec();
        assert_eq!(a, b);
    }

    #[test]
    fn test_new_from_geometry() {
        let sd = SwerveDrive::new(&DriveGeometry::default());
        assert_eq!(sd.num_modules(), 4);

        let sd = SwerveDrive::new(&DriveGeometry::Modules(vec![
            Point2D::new(0.3, 0.0),
            Point2D::new(-0.3, 0.0),
        ]));
        assert_eq!(sd.num_modules(), 2);
        assert_eq!(sd.outputs(), &[WheelVector::default(); 2]);
    }

    #[test]
    fn test_shortest_angle_delta() {
        assert_eq!(shortest_angle_delta(170.0, -170.0), 20.0);
        assert_eq!(shortest_angle_delta(-170.0, 170.0), -20.0);
        assert_eq!(shortest_angle_delta(0.0, 180.0), 180.0);
        assert_eq!(shortest_angle_delta(0.0, -180.0), 180.0);
        assert_eq!(shortest_angle_delta(10.0, 10.0), 0.0);
        assert_eq!(shortest_angle_delta(720.0, 45.0), 45.0);

        for i in -100..100 {
            let d = shortest_angle_delta(i as f64 * 7.3, i as f64 * -11.9);
            assert!(d > -180.0 && d <= 180.0);
        }
    }

    #[test]
    fn test_find_absolute_angle() {
        assert_eq!(find_absolute_angle(170.0, -170.0), 190.0);
        assert_eq!(find_absolute_angle(350.0, 10.0), 370.0);
        assert_eq!(find_absolute_angle(0.0, 90.0), 90.0);
    }
}
