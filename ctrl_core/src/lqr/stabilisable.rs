//! Stabilisability test

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use nalgebra::{Complex, DMatrix};

// Internal
use super::LqrError;
use crate::linalg::{
    check_finite, check_shape, check_square, eigenvalues, rank_with_tol, LinalgError, Matrix,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Relative tolerance used for the rank of `[lambda I - A | B]`.
///
/// Looser than machine precision since `lambda` itself carries the rounding
/// error of the eigenvalue solver.
pub const STABILISABLE_RANK_TOL: f64 = 1e-10;

/// Eigenvalues with a magnitude within this distance of one are treated as
/// lying on the unit circle.
pub const UNIT_CIRCLE_TOL: f64 = 1e-10;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Determine whether the discrete-time pair (A, B) is stabilisable.
///
/// Every eigenvalue `lambda` of A with `|lambda| >= 1` must be controllable,
/// i.e. `rank([lambda I - A | B]) == n`. Eigenvalues on the unit circle (to
/// within [`UNIT_CIRCLE_TOL`]) are tested too. The first uncontrollable mode
/// found short-circuits to `false`.
pub fn is_stabilisable(a: &Matrix, b: &Matrix) -> Result<bool, LqrError> {
    let n = check_square(a)?;
    let m = b.ncols();
    if m == 0 {
        return Err(LinalgError::EmptyDimension {
            rows: b.nrows(),
            cols: m,
        }
        .into());
    }
    check_shape(b, n, m, "B")?;
    check_finite(a)?;
    check_finite(b)?;

    for lambda in eigenvalues(a)? {
        // Strictly stable modes don't need to be controllable
        if lambda.norm() < 1.0 - UNIT_CIRCLE_TOL {
            continue;
        }

        let mut e = DMatrix::<Complex<f64>>::zeros(n, n + m);
        for i in 0..n {
            for j in 0..n {
                e[(i, j)] = Complex::new(-a[(i, j)], 0.0);
            }
            e[(i, i)] += lambda;

            for j in 0..m {
                e[(i, n + j)] = Complex::new(b[(i, j)], 0.0);
            }
        }

        if rank_with_tol(&e, STABILISABLE_RANK_TOL)? < n {
            debug!("Uncontrollable mode at eigenvalue {}", lambda);
            return Ok(false);
        }
    }

    Ok(true)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_stable_system() {
        // All eigenvalues inside the unit circle, B has no influence at all
        let a = Matrix::from_row_slice(2, 2, &[0.5, 0.2, -0.1, 0.3]);
        let b = Matrix::zeros(2, 1);

        assert!(is_stabilisable(&a, &b).unwrap());
    }

    #[test]
    fn test_unstable_uncontrollable() {
        // The unstable mode (1.2) has no coupling to the input
        let a = Matrix::from_row_slice(2, 2, &[1.2, 0.0, 0.0, 0.5]);
        let b = Matrix::from_row_slice(2, 1, &[0.0, 1.0]);

        assert!(!is_stabilisable(&a, &b).unwrap());
    }

    #[test]
    fn test_unstable_controllable() {
        let a = Matrix::from_row_slice(2, 2, &[1.2, 0.0, 0.0, 0.5]);
        let b = Matrix::from_row_slice(2, 1, &[1.0, 0.0]);
        assert!(is_stabilisable(&a, &b).unwrap());

        // Coupled through A rather than directly through B
        let a = Matrix::from_row_slice(2, 2, &[1.0, 0.1, 0.0, 1.0]);
        let b = Matrix::from_row_slice(2, 1, &[0.0, 0.1]);
        assert!(is_stabilisable(&a, &b).unwrap());
    }

    #[test]
    fn test_marginal_mode_requires_control() {
        // Eigenvalue exactly on the unit circle with no input coupling
        let a = Matrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 0.5]);
        let b = Matrix::from_row_slice(2, 1, &[0.0, 1.0]);
        assert!(!is_stabilisable(&a, &b).unwrap());

        // Complex pair on the unit circle (pure rotation) with no input
        let t = 0.3f64;
        let a = Matrix::from_row_slice(2, 2, &[t.cos(), -t.sin(), t.sin(), t.cos()]);
        assert!(!is_stabilisable(&a, &Matrix::zeros(2, 1)).unwrap());
        assert!(is_stabilisable(&a, &Matrix::from_row_slice(2, 1, &[1.0, 0.0])).unwrap());
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = Matrix::identity(2, 2);
        let b = Matrix::zeros(3, 1);

        assert_eq!(is_stabilisable(&a, &b).unwrap_err().kind(), ErrorKind::Dimension);
        assert_eq!(
            is_stabilisable(&Matrix::zeros(2, 3), &b).unwrap_err().kind(),
            ErrorKind::Dimension
        );
        assert_eq!(
            is_stabilisable(&a, &Matrix::zeros(2, 0)).unwrap_err().kind(),
            ErrorKind::Dimension
        );
    }
}
