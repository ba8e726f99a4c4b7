//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Map a value from one range into another.
pub fn lin_map<T>(source_range: (T, T), target_range: (T, T), value: T) -> T
where 
    T: Float 
{
    target_range.0 
        + ((value - source_range.0) 
        * (target_range.1 - target_range.0) 
        / (source_range.1 - source_range.0))
}

/// Clamp a value between `min` and `max`.
///
/// NaN is passed through unchanged, callers which need a bounded result must
/// handle it themselves.
pub fn clamp<T>(value: T, min: T, max: T) -> T 
where
    T: Float
{
    let mut ret = value;

    if ret > max {
        ret = max
    }
    if ret < min {
        ret = min
    }

    ret
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
/// 
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()`, violating the mathematical definition, if
/// `self` is much smaller than `rhs.abs()` in magnitude and `self < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float
{
    let r = lhs % rhs;
    if r < T::zero() { r + rhs.abs() } else { r }
}

/// Wrap an angle in degrees into the range (-180, 180].
pub fn wrap_180<T>(angle_deg: T) -> T
where
    T: Float
{
    let half: T = T::from(180.0).unwrap_or_else(T::zero);
    let full = half + half;

    let wrapped = half - rem_euclid(half - angle_deg, full);

    // Round-off in rem_euclid can land exactly on the excluded bound
    if wrapped <= -half {
        wrapped + full
    }
    else {
        wrapped
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lin_map() {
        assert_eq!(lin_map((0f64, 10f64), (0f64, 1f64), 5f64), 0.5);
        assert_eq!(lin_map((95f64, 115f64), (1f64, 0f64), 105f64), 0.5);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(1.5f64, -1.0, 1.0), 1.0);
        assert_eq!(clamp(-3f64, -1.0, 1.0), -1.0);
        assert_eq!(clamp(0.25f64, -1.0, 1.0), 0.25);
        assert!(clamp(f64::NAN, -1.0, 1.0).is_nan());
    }

    #[test]
    fn test_wrap_180() {
        assert_eq!(wrap_180(0f64), 0.0);
        assert_eq!(wrap_180(180f64), 180.0);
        assert_eq!(wrap_180(-180f64), 180.0);
        assert_eq!(wrap_180(190f64), -170.0);
        assert_eq!(wrap_180(-340f64), 20.0);
        assert_eq!(wrap_180(720f64), 0.0);
        assert_eq!(wrap_180(-90f64), -90.0);

        for i in -2000..2000 {
            let a = wrap_180(i as f64 * 0.73);
            assert!(a > -180.0 && a <= 180.0, "{} wrapped to {}", i as f64 * 0.73, a);
        }
    }
}
