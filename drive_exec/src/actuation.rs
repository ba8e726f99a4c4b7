//! # Actuation
//!
//! Capabilities of the drivetrain hardware as seen from the drive code, and
//! the glue which applies a set of `DriveDems` to them.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::drive::{DriveDems, ModuleDem};
use log::trace;
use thiserror::Error;

use crate::drive_ctrl::{
    limit, square_input, CulverDrive, DiffDrive, DiffOutput, Params, TurnMode,
};

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Accepts bounded left and right efforts for a differential drivetrain.
pub trait DualEffortSink {
    /// Set the efforts, both in [-1, 1].
    fn set_efforts(&mut self, left: f64, right: f64);
}

/// Accepts per-module demands for a swerve drivetrain.
pub trait SwerveSink {
    /// Number of modules driven by this sink.
    fn num_modules(&self) -> usize;

    /// Set the module demands, in the sink's module order.
    fn set_modules(&mut self, modules: &[ModuleDem]);
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A differential drivetrain with the drive kinematics attached.
pub struct TankDrive<S> {
    sink: S,
    diff: DiffDrive,
    culver: CulverDrive,
}

/// A simulated drivetrain which records and traces the demands it is given.
#[derive(Debug, Clone, Default)]
pub struct SimDrivetrain {
    pub efforts: Option<(f64, f64)>,
    pub modules: Vec<ModuleDem>,
    num_modules: usize,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur when applying demands.
#[derive(Debug, Error, PartialEq)]
pub enum ActuationError {
    #[error("The demands contain values outside of [-1, 1]: {0:?}")]
    Unbounded(DriveDems),

    #[error("Expected demands for {expected} swerve modules but found {found}")]
    ModuleCountMismatch { expected: usize, found: usize },
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Apply a set of demands to the drivetrain.
///
/// Demands which break the actuation contract are rejected without being
/// passed on.
pub fn apply_dems<S>(dems: &DriveDems, sink: &mut S) -> Result<(), ActuationError>
where
    S: DualEffortSink + SwerveSink,
{
    if !dems.is_bounded() {
        return Err(ActuationError::Unbounded(dems.clone()));
    }

    match dems {
        DriveDems::Differential { left, right } => sink.set_efforts(*left, *right),
        DriveDems::Swerve { modules } => {
            if modules.len() != sink.num_modules() {
                return Err(ActuationError::ModuleCountMismatch {
                    expected: sink.num_modules(),
                    found: modules.len(),
                });
            }
            sink.set_modules(modules)
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<S: DualEffortSink> TankDrive<S> {
    pub fn new(sink: S, params: &Params) -> Self {
        Self {
            sink,
            diff: DiffDrive::new(params.diff, params.curvature),
            culver: CulverDrive::new(params.culver),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_inner(self) -> S {
        self.sink
    }

    /// Drive each side directly, optionally squaring the inputs.
    pub fn tank_drive(&mut self, left: f64, right: f64, squared_inputs: bool) {
        let (left, right) = squared(left, right, squared_inputs);
        self.sink.set_efforts(limit(left), limit(right));
    }

    /// Cheesy drive with the quick-turn button.
    pub fn cheesy_drive(&mut self, throttle: f64, turn: f64, quick_turn: bool, squared_inputs: bool) {
        let (throttle, turn) = squared(throttle, turn, squared_inputs);
        let out = self.diff.calc(throttle, turn, TurnMode::QuickTurn(quick_turn));
        self.set(out);
    }

    /// Cheesy drive with the throttle threshold.
    pub fn cheesy_drive_threshold(&mut self, throttle: f64, turn: f64, squared_inputs: bool) {
        let (throttle, turn) = squared(throttle, turn, squared_inputs);
        let out = self.diff.calc(throttle, turn, TurnMode::ThresholdTurn);
        self.set(out);
    }

    pub fn curvature_drive(&mut self, magnitude: f64, curve: f64) {
        let out = self.diff.calc_curvature(magnitude, curve);
        self.set(out);
    }

    pub fn culver_drive(&mut self, throttle: f64, x: f64, y: f64, quick_turn: bool) {
        let out = self.culver.calc(throttle, x, y, quick_turn);
        self.set(out);
    }

    pub fn culver_drive_alt(&mut self, throttle: f64, x: f64, y: f64) {
        let out = self.culver.calc_alt(throttle, x, y);
        self.set(out);
    }

    fn set(&mut self, out: DiffOutput) {
        self.sink.set_efforts(out.left, out.right);
    }
}

impl SimDrivetrain {
    /// Create a simulated drivetrain with the given number of swerve modules.
    pub fn new(num_modules: usize) -> Self {
        Self {
            efforts: None,
            modules: vec![ModuleDem::default(); num_modules],
            num_modules,
        }
    }
}

impl DualEffortSink for SimDrivetrain {
    fn set_efforts(&mut self, left: f64, right: f64) {
        trace!("Sim efforts: left {:.3}, right {:.3}", left, right);
        self.efforts = Some((left, right));
    }
}

impl SwerveSink for SimDrivetrain {
    fn num_modules(&self) -> usize {
        self.num_modules
    }

    fn set_modules(&mut self, modules: &[ModuleDem]) {
        trace!("Sim modules: {:?}", modules);
        self.modules.clear();
        self.modules.extend_from_slice(modules);
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn squared(a: f64, b: f64, squared_inputs: bool) -> (f64, f64) {
    if squared_inputs {
        (square_input(a), square_input(b))
    }
    else {
        (a, b)
    }
}
