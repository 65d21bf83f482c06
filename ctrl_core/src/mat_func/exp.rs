//! Matrix exponential

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::trace;

use crate::linalg::{check_finite, check_square, norm_inf, LinalgError, Matrix};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Degree of the diagonal Padé approximant.
///
/// With the scaled norm at most 1/2 the relative truncation error is below
/// 4e-16.
const PADE_DEGREE: usize = 6;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Compute the matrix exponential `e^A`.
///
/// Uses scaling and squaring with a diagonal Padé approximant: `A` is scaled
/// by `2^-j` so that its infinity-norm is at most 1/2, the approximant is
/// evaluated, and the result squared `j` times.
///
/// Non-square or non-finite inputs are rejected, and a result which overflows
/// is reported as [`LinalgError::NonFinite`] rather than returned.
pub fn exp(a: &Matrix) -> Result<Matrix, LinalgError> {
    let n = check_square(a)?;
    check_finite(a)?;

    // Scale so that ||A/2^j|| <= 1/2
    let norm = norm_inf(a);
    let j = if norm > 0.5 {
        norm.log2().ceil() as i32 + 1
    } else {
        0
    };
    let scaled = a * 0.5f64.powi(j);

    // Evaluate the Padé approximant N(A)/D(A)
    let identity = Matrix::identity(n, n);
    let mut x = identity.clone();
    let mut num = identity.clone();
    let mut den = identity;
    let mut c = 1.0;

    let q = PADE_DEGREE as f64;
    for k in 1..=PADE_DEGREE {
        let k_f = k as f64;
        c *= (q - k_f + 1.0) / ((2.0 * q - k_f + 1.0) * k_f);
        x = &scaled * &x;

        num += c * &x;
        if k % 2 == 0 {
            den += c * &x;
        } else {
            den -= c * &x;
        }
    }

    let mut result = den.lu().solve(&num).ok_or(LinalgError::Singular)?;

    // Undo the scaling by repeated squaring
    for _ in 0..j {
        result = &result * &result;
        check_finite(&result)?;
    }

    trace!("exp: n = {}, norm = {:e}, squarings = {}", n, norm, j);

    check_finite(&result)?;
    Ok(result)
}
