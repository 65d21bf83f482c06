//! # Control maths library.
//!
//! Optimal control and drivetrain kinematics maths for a mobile robot's
//! control loop: matrix functions for discretising continuous models,
//! stabilisability testing and Riccati solutions for LQR design, wheel/chassis
//! kinematics and the trajectory data model with its interchange codecs.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Linear algebra primitives - dimension-checked matrices, rank and pseudo-inverse
pub mod linalg;

/// Matrix functions - exponential and real power
pub mod mat_func;

/// Linear quadratic regulator maths - stabilisability, DARE, gains and discretisation
pub mod lqr;

/// Locomotion kinematics - converts chassis speeds into wheel speeds and back
pub mod loco_kin;

/// Trajectory model and its codecs
pub mod traj;

/// Flat interface - row-major arrays and strings for callers across a language boundary
pub mod flat_if;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Serialize;

// ------------------------------------------------------------------------------------------------
// ENUMERATIONS
// ------------------------------------------------------------------------------------------------

/// Broad categories of failure reported by the library.
///
/// Every module error can be mapped to one of these with its `kind()` method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Inconsistent matrix, vector or buffer sizes, or an invalid geometry.
    Dimension,

    /// An iteration or decomposition failed to converge, or the input is outside the domain of
    /// the numerical method (singular, non-finite, or without a principal real power).
    NonConvergence,

    /// The system is not stabilisable.
    Uncontrollable,

    /// Interchange text or element buffers could not be decoded.
    Parse,

    /// A file could not be read or written.
    Io,
}
