//! # Linear algebra primitives
//!
//! Owned, dimension-checked matrices and the decompositions shared by the
//! rest of the library. Caller supplied buffers are always copied into a
//! [`Matrix`] through [`from_row_major`], so nothing outside the boundary
//! ever sees an unchecked slice.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod rank;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::{Complex, DMatrix};

// Internal
pub use rank::*;
use crate::ErrorKind;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Maximum number of QR sweeps allowed in a Schur or SVD decomposition.
pub const MAX_DECOMP_ITER: usize = 10_000;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Dense, owned, real-valued matrix used throughout the library.
pub type Matrix = DMatrix<f64>;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors raised by the linear algebra primitives and matrix functions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LinalgError {
    #[error(
        "Expected a buffer of {expected} elements for a {rows}x{cols} matrix, found {found}"
    )]
    BufferLength {
        rows: usize,
        cols: usize,
        expected: usize,
        found: usize,
    },

    #[error("Matrix dimensions must be non-zero, found {rows}x{cols}")]
    EmptyDimension { rows: usize, cols: usize },

    #[error("A {rows}x{cols} matrix has more elements than can be addressed")]
    SizeOverflow { rows: usize, cols: usize },

    #[error("Expected a square matrix, found {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("The matrix is singular")]
    Singular,

    #[error("The matrix or its result contains non-finite values")]
    NonFinite,

    #[error(
        "The matrix has the eigenvalue {0} on the closed negative real axis, so it has no \
         principal real power"
    )]
    NoPrincipalPower(Complex<f64>),

    #[error("Decomposition failed to converge: {0}")]
    Decomposition(&'static str),

    #[error("Iteration did not converge after {iterations} iterations (residual {residual:e})")]
    NonConvergence { iterations: usize, residual: f64 },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LinalgError {
    /// The broad category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LinalgError::BufferLength { .. }
            | LinalgError::EmptyDimension { .. }
            | LinalgError::SizeOverflow { .. }
            | LinalgError::NotSquare { .. }
            | LinalgError::DimensionMismatch(_) => ErrorKind::Dimension,
            LinalgError::NoPrincipalPower(_)
            | LinalgError::Singular
            | LinalgError::NonFinite
            | LinalgError::Decomposition(_)
            | LinalgError::NonConvergence { .. } => ErrorKind::NonConvergence,
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Copy a row-major buffer into a new matrix.
///
/// The buffer length must be exactly `rows * cols` and both dimensions must be
/// non-zero.
pub fn from_row_major(rows: usize, cols: usize, data: &[f64]) -> Result<Matrix, LinalgError> {
    if rows == 0 || cols == 0 {
        return Err(LinalgError::EmptyDimension { rows, cols });
    }

    let expected = rows
        .checked_mul(cols)
        .ok_or(LinalgError::SizeOverflow { rows, cols })?;

    if data.len() != expected {
        return Err(LinalgError::BufferLength {
            rows,
            cols,
            expected,
            found: data.len(),
        });
    }

    Ok(Matrix::from_row_slice(rows, cols, data))
}

/// Flatten a matrix into a row-major buffer.
pub fn to_row_major(m: &Matrix) -> Vec<f64> {
    m.transpose().as_slice().to_vec()
}

/// Check that the matrix is square, returning its size.
pub fn check_square(m: &Matrix) -> Result<usize, LinalgError> {
    if m.is_square() && m.nrows() > 0 {
        Ok(m.nrows())
    } else {
        Err(LinalgError::NotSquare {
            rows: m.nrows(),
            cols: m.ncols(),
        })
    }
}

/// Check that the matrix has the expected shape.
///
/// `name` is used to identify the matrix in the error message.
pub fn check_shape(m: &Matrix, rows: usize, cols: usize, name: &str) -> Result<(), LinalgError> {
    if m.shape() == (rows, cols) {
        Ok(())
    } else {
        Err(LinalgError::DimensionMismatch(format!(
            "expected {} to be {}x{}, found {}x{}",
            name,
            rows,
            cols,
            m.nrows(),
            m.ncols()
        )))
    }
}

/// Check that every element of the matrix is finite.
pub fn check_finite(m: &Matrix) -> Result<(), LinalgError> {
    if m.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(LinalgError::NonFinite)
    }
}

/// The induced 1-norm (maximum absolute column sum).
pub fn norm_1(m: &Matrix) -> f64 {
    m.column_iter()
        .map(|c| c.iter().map(|v| v.abs()).sum::<f64>())
        .fold(0.0, f64::max)
}

/// The induced infinity-norm (maximum absolute row sum).
pub fn norm_inf(m: &Matrix) -> f64 {
    m.row_iter()
        .map(|r| r.iter().map(|v| v.abs()).sum::<f64>())
        .fold(0.0, f64::max)
}

/// Compute the (possibly complex) eigenvalues of a square real matrix from its
/// real Schur form.
pub fn eigenvalues(m: &Matrix) -> Result<Vec<Complex<f64>>, LinalgError> {
    check_square(m)?;
    check_finite(m)?;

    let schur = m
        .clone()
        .try_schur(f64::EPSILON, MAX_DECOMP_ITER)
        .ok_or(LinalgError::Decomposition("real Schur decomposition"))?;

    Ok(schur.complex_eigenvalues().iter().cloned().collect())
}
