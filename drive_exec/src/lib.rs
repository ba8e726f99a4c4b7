//! # Drive library.
//!
//! This library allows other crates in the workspace (and the benchmarks) to access items defined
//! inside the drive crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Actuation - capabilities of the drivetrain hardware and application of demands to them
pub mod actuation;

/// Data store - global state of the executable
pub mod data_store;

/// Drive control module - converts operator inputs into individual wheel demands
pub mod drive_ctrl;

/// Operator input - gamepad abstraction and mapping of samples onto drive inputs
pub mod input;

/// Executable parameters
pub mod params;

/// Sensor wrappers
pub mod sensors;
