//! Output limiting and skim functions shared by the differential kinematics

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Maximum magnitude of a normalised actuator demand.
pub const MAX_OUTPUT: f64 = 1.0;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Limit a demand to the actuation range [-1, 1].
///
/// NaN is mapped to zero so that the output is bounded for every input.
pub fn limit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }

    util::maths::clamp(value, -MAX_OUTPUT, MAX_OUTPUT)
}

/// Compute the correction to feed into the opposite side of a differential
/// drive when this side's raw demand saturates.
///
/// Returns zero while `value` is within [-1, 1], otherwise the overflow
/// scaled by `gain` with the opposite sign.
pub fn skim(value: f64, gain: f64) -> f64 {
    if value > MAX_OUTPUT {
        -((value - MAX_OUTPUT) * gain)
    }
    else if value < -MAX_OUTPUT {
        -((value + MAX_OUTPUT) * gain)
    }
    else {
        0.0
    }
}

/// Square an input while keeping its sign, reducing sensitivity around zero.
pub fn square_input(value: f64) -> f64 {
    (value * value).copysign(value)
}
