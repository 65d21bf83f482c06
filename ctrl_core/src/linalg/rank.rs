//! Rank-revealing decomposition and pseudo-inverse.
//!
//! Both use a singular value decomposition with a tolerance relative to the
//! largest singular value, never an exact comparison against zero.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::{ComplexField, DMatrix};

use super::{LinalgError, Matrix, MAX_DECOMP_ITER};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// The default relative rank tolerance for a matrix of the given shape,
/// `max(rows, cols) * eps`.
pub fn default_rank_tol(rows: usize, cols: usize) -> f64 {
    rows.max(cols) as f64 * f64::EPSILON
}

/// Numerical rank of a real or complex matrix using the default tolerance.
pub fn rank<T>(m: &DMatrix<T>) -> Result<usize, LinalgError>
where
    T: ComplexField<RealField = f64>,
{
    rank_with_tol(m, default_rank_tol(m.nrows(), m.ncols()))
}

/// Numerical rank of a real or complex matrix.
///
/// A singular value counts towards the rank if it is greater than
/// `rel_tol * sigma_max`.
pub fn rank_with_tol<T>(m: &DMatrix<T>, rel_tol: f64) -> Result<usize, LinalgError>
where
    T: ComplexField<RealField = f64>,
{
    if m.is_empty() {
        return Ok(0);
    }

    let svd = m
        .clone()
        .try_svd(false, false, f64::EPSILON, MAX_DECOMP_ITER)
        .ok_or(LinalgError::Decomposition("singular value decomposition"))?;

    let sigma_max = svd.singular_values.iter().cloned().fold(0.0, f64::max);
    if !sigma_max.is_finite() {
        return Err(LinalgError::NonFinite);
    }

    let tol = rel_tol * sigma_max;

    Ok(svd
        .singular_values
        .iter()
        .filter(|&&s| s > tol && s > 0.0)
        .count())
}

/// Moore-Penrose pseudo-inverse of a real matrix using the default tolerance.
///
/// Singular values under the tolerance are treated as zero, so a rank
/// deficient input gives the minimum-norm least-squares inverse rather than
/// blowing up.
pub fn pseudo_inverse(m: &Matrix) -> Result<Matrix, LinalgError> {
    if m.is_empty() {
        return Err(LinalgError::EmptyDimension {
            rows: m.nrows(),
            cols: m.ncols(),
        });
    }

    let svd = m
        .clone()
        .try_svd(true, true, f64::EPSILON, MAX_DECOMP_ITER)
        .ok_or(LinalgError::Decomposition("singular value decomposition"))?;

    let sigma_max = svd.singular_values.iter().cloned().fold(0.0, f64::max);
    if !sigma_max.is_finite() {
        return Err(LinalgError::NonFinite);
    }

    let tol = default_rank_tol(m.nrows(), m.ncols()) * sigma_max;

    svd.pseudo_inverse(tol).map_err(LinalgError::Decomposition)
}
