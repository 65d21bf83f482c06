//! # Locomotion kinematics module
//!
//! Converts chassis speed demands (forward, lateral and angular velocity) into
//! per-wheel speeds for a drivetrain with a fixed set of wheels, and recovers
//! the chassis speeds from measured wheel speeds.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod speeds;
mod state;
mod wheel;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::*;
pub use speeds::*;
pub use state::*;
pub use wheel::*;

use crate::{linalg::LinalgError, ErrorKind};
use util::params::LoadError;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The number of chassis degrees of freedom, (vx, vy, omega).
pub const NUM_CHASSIS_DOF: usize = 3;

/// The minimum number of wheels a drivetrain can have.
pub const MIN_NUM_WHEELS: usize = 2;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur in the kinematics calculations.
#[derive(Debug, thiserror::Error)]
pub enum KinError {
    #[error("Expected at least {} wheels, found {0}", MIN_NUM_WHEELS)]
    NotEnoughWheels(usize),

    #[error("Wheel {0} has a non-finite position or a zero/non-finite drive direction")]
    InvalidWheel(usize),

    #[error(
        "The wheel geometry is degenerate: kinematics matrix has rank {rank}, {required} required"
    )]
    DegenerateGeometry { rank: usize, required: usize },

    #[error("Expected speeds for {expected} wheels, found {found}")]
    WheelCountMismatch { expected: usize, found: usize },

    #[error("Found {num_pos} wheel positions but {num_dir} wheel directions in the parameters")]
    ParamMismatch { num_pos: usize, num_dir: usize },

    #[error("Could not load parameters: {0}")]
    ParamLoadError(LoadError),

    #[error("Linear algebra error: {0}")]
    Linalg(#[from] LinalgError),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl KinError {
    /// The broad category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            KinError::ParamLoadError(LoadError::FileLoadError(_)) => ErrorKind::Io,
            KinError::ParamLoadError(LoadError::DeserialiseError(_)) => ErrorKind::Parse,
            KinError::Linalg(e) => e.kind(),
            _ => ErrorKind::Dimension,
        }
    }
}
