//! # Flat interface
//!
//! Entry points for callers on the far side of a language boundary which can
//! only pass row-major `f64` buffers, explicit dimensions and strings. Every
//! buffer is checked against its dimensions and copied into an owned matrix
//! before any maths is done, and every failure comes back as a [`FlatError`]
//! carrying its [`ErrorKind`] and a message.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::warn;
use serde::Serialize;
use std::fmt::Display;

// Internal
use crate::{
    linalg::{from_row_major, to_row_major, LinalgError},
    loco_kin::KinError,
    lqr::{self, LqrError},
    mat_func,
    traj::{self, TrajError, Trajectory},
    ErrorKind,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An error reported across the flat interface.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{kind:?} error: {message}")]
pub struct FlatError {
    pub kind: ErrorKind,
    pub message: String,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl FlatError {
    fn new<E: Display>(kind: ErrorKind, err: E) -> Self {
        let message = err.to_string();
        warn!("{:?} error across the flat interface: {}", kind, message);

        Self { kind, message }
    }
}

impl From<LinalgError> for FlatError {
    fn from(e: LinalgError) -> Self {
        Self::new(e.kind(), e)
    }
}

impl From<LqrError> for FlatError {
    fn from(e: LqrError) -> Self {
        Self::new(e.kind(), e)
    }
}

impl From<KinError> for FlatError {
    fn from(e: KinError) -> Self {
        Self::new(e.kind(), e)
    }
}

impl From<TrajError> for FlatError {
    fn from(e: TrajError) -> Self {
        Self::new(e.kind(), e)
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Solve the discrete algebraic Riccati equation.
///
/// `a` and `q` are `states x states`, `b` is `states x inputs` and `r` is
/// `inputs x inputs`, all row-major. Returns the `states x states` solution.
pub fn dare(
    a: &[f64],
    b: &[f64],
    q: &[f64],
    r: &[f64],
    states: usize,
    inputs: usize,
) -> Result<Vec<f64>, FlatError> {
    let a = from_row_major(states, states, a)?;
    let b = from_row_major(states, inputs, b)?;
    let q = from_row_major(states, states, q)?;
    let r = from_row_major(inputs, inputs, r)?;

    Ok(to_row_major(&lqr::solve_dare(&a, &b, &q, &r)?))
}

/// Matrix exponential of the row-major `rows x rows` matrix `src`.
pub fn exp(src: &[f64], rows: usize) -> Result<Vec<f64>, FlatError> {
    let a = from_row_major(rows, rows, src)?;

    Ok(to_row_major(&mat_func::exp(&a)?))
}

/// Real power of the row-major `rows x rows` matrix `src`.
pub fn pow(src: &[f64], rows: usize, exponent: f64) -> Result<Vec<f64>, FlatError> {
    let a = from_row_major(rows, rows, src)?;

    Ok(to_row_major(&mat_func::pow(&a, exponent)?))
}

/// Check whether the pair (A, B) is stabilisable, where `a` is
/// `states x states` and `b` is `states x inputs`.
pub fn is_stabilizable(
    states: usize,
    inputs: usize,
    a: &[f64],
    b: &[f64],
) -> Result<bool, FlatError> {
    let a = from_row_major(states, states, a)?;
    let b = from_row_major(states, inputs, b)?;

    Ok(lqr::is_stabilisable(&a, &b)?)
}

/// Load a PathWeaver JSON file as flattened trajectory elements.
pub fn from_pathweaver_json(path: &str) -> Result<Vec<f64>, FlatError> {
    Ok(traj::read_pathweaver_json(path)?.to_elements())
}

/// Write flattened trajectory elements to a PathWeaver JSON file.
pub fn to_pathweaver_json(elements: &[f64], path: &str) -> Result<(), FlatError> {
    let traj = Trajectory::from_elements(elements)?;

    Ok(traj::write_pathweaver_json(&traj, path)?)
}

/// Decode PathWeaver JSON text into flattened trajectory elements.
pub fn deserialize_trajectory(json: &str) -> Result<Vec<f64>, FlatError> {
    Ok(traj::deserialize(json)?.to_elements())
}

/// Encode flattened trajectory elements as PathWeaver JSON text.
pub fn serialize_trajectory(elements: &[f64]) -> Result<String, FlatError> {
    let traj = Trajectory::from_elements(elements)?;

    Ok(traj::serialize(&traj)?)
}
