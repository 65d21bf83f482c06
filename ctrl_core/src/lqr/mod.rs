//! # Linear quadratic regulator module
//!
//! Stabilisability testing, the discrete algebraic Riccati equation solver and
//! the helpers built on it (LQR gain, zero-order-hold discretisation).

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod dare;
mod discretise;
mod params;
mod stabilisable;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use dare::*;
pub use discretise::*;
pub use params::*;
pub use stabilisable::*;

use crate::{linalg::LinalgError, ErrorKind};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during LQR calculations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LqrError {
    #[error("Invalid matrix: {0}")]
    Linalg(#[from] LinalgError),

    /// An eigenvalue of A on or outside the unit circle cannot be influenced by B.
    #[error("The system (A, B) is not stabilisable")]
    Uncontrollable,

    /// An eigenvalue of A on or outside the unit circle is not penalised by Q, so the
    /// Riccati equation has no stabilising solution.
    #[error("The pair (A, Q) is not detectable")]
    Undetectable,

    #[error("R is not symmetric positive definite")]
    RNotPositiveDefinite,

    #[error("The Riccati iteration did not converge after {iterations} iterations (residual {residual:e})")]
    NonConvergence { iterations: usize, residual: f64 },

    #[error("The timestep must be finite and positive, found {0}")]
    InvalidTimestep(f64),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LqrError {
    /// The broad category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LqrError::Linalg(e) => e.kind(),
            LqrError::Uncontrollable | LqrError::Undetectable => ErrorKind::Uncontrollable,
            LqrError::RNotPositiveDefinite | LqrError::InvalidTimestep(_) => ErrorKind::Dimension,
            LqrError::NonConvergence { .. } => ErrorKind::NonConvergence,
        }
    }
}
