//! Zero-order-hold discretisation of continuous models

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::LqrError;
use crate::linalg::{check_shape, check_square, LinalgError, Matrix};
use crate::mat_func::exp;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Discretise the continuous system matrix, `A_d = e^(A dt)`.
pub fn discretise_a(a_c: &Matrix, dt: f64) -> Result<Matrix, LqrError> {
    check_timestep(dt)?;
    check_square(a_c)?;

    Ok(exp(&(a_c * dt))?)
}

/// Discretise a continuous system (A, B) assuming the input is held constant
/// over each timestep.
///
/// Both are taken from the exponential of the block matrix
///
/// ```text
/// [ A  B ] dt
/// [ 0  0 ]
/// ```
///
/// whose upper blocks are `A_d` and `B_d`.
pub fn discretise_ab(a_c: &Matrix, b_c: &Matrix, dt: f64) -> Result<(Matrix, Matrix), LqrError> {
    check_timestep(dt)?;
    let n = check_square(a_c)?;
    let m = b_c.ncols();
    if m == 0 {
        return Err(LinalgError::EmptyDimension {
            rows: b_c.nrows(),
            cols: m,
        }
        .into());
    }
    check_shape(b_c, n, m, "B")?;

    let mut block = Matrix::zeros(n + m, n + m);
    block.view_mut((0, 0), (n, n)).copy_from(&(a_c * dt));
    block.view_mut((0, n), (n, m)).copy_from(&(b_c * dt));

    let block_exp = exp(&block)?;

    Ok((
        block_exp.view((0, 0), (n, n)).into_owned(),
        block_exp.view((0, n), (n, m)).into_owned(),
    ))
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn check_timestep(dt: f64) -> Result<(), LqrError> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(LqrError::InvalidTimestep(dt))
    }
}
