//! # Communications interface crate.
//!
//! Provides all common interface types for the drive software.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

pub mod tc;

/// Demand definitions for equipment (like the drivetrain)
pub mod eqpt;
