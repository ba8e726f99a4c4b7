//! # Sensors
//!
//! Small wrappers around the sensors used alongside the drivetrain.

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Default voltage at or above which a photoeye is considered covered.
///
/// Units: volts
pub const PHOTOEYE_DEFAULT_MIN_V: f64 = 0.5;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// An analogue input reading a voltage.
pub trait VoltageSource {
    /// Units: volts
    fn voltage(&self) -> f64;
}

/// Something a PID controller can write its output to.
pub trait PidOutput {
    fn pid_write(&mut self, output: f64);
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A proximity photoeye which reports covered once its voltage reaches a
/// threshold.
#[derive(Debug, Clone)]
pub struct Photoeye<V> {
    input: V,
    min_v: f64,
}

/// A `PidOutput` which drives nothing and only keeps the last output, so it
/// can be read elsewhere.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PidOutputMimic {
    output: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<V: VoltageSource> Photoeye<V> {
    pub fn new(input: V) -> Self {
        Self::with_min_voltage(input, PHOTOEYE_DEFAULT_MIN_V)
    }

    pub fn with_min_voltage(input: V, min_v: f64) -> Self {
        Self { input, min_v }
    }

    pub fn is_covered(&self) -> bool {
        self.input.voltage() >= self.min_v
    }
}

impl PidOutputMimic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> f64 {
        self.output
    }
}

impl PidOutput for PidOutputMimic {
    fn pid_write(&mut self, output: f64) {
        self.output = output;
    }
}
