//! Drive control module
//!
//! Contains the drive kinematics engines, which map operator demands onto
//! wheel demands, and the `DriveCtrl` cyclic module which owns them.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod cheesy;
mod culver;
mod geom;
mod limit;
mod params;
mod state;
mod swerve;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use cheesy::*;
pub use culver::*;
pub use geom::*;
pub use limit::*;
pub use params::*;
pub use state::*;
pub use swerve::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during DriveCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum DriveCtrlError {
    #[error("Invalid drive geometry: {0}")]
    InvalidGeometry(String),

    #[error("Could not load DriveCtrl parameters: {0}")]
    ParamsLoad(#[from] util::params::LoadError),

    #[error("Could not archive DriveCtrl data: {0}")]
    Archive(#[from] util::archive::ArchiveError),
}
