//! Parameters for the Riccati solver

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Options for [`solve_dare_with`](super::solve_dare_with).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DareOptions {
    /// Maximum number of doubling iterations before giving up.
    pub max_iterations: usize,

    /// Relative change in the solution, measured in the 1-norm, under which
    /// the iteration is considered converged.
    pub rel_tol: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for DareOptions {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            rel_tol: 1e-10,
        }
    }
}
