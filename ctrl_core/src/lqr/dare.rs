//! Discrete algebraic Riccati equation solver

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace, warn};

// Internal
use super::{is_stabilisable, DareOptions, LqrError};
use crate::linalg::{check_finite, check_shape, check_square, norm_1, LinalgError, Matrix};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Solve the discrete algebraic Riccati equation with the default options.
///
/// See [`solve_dare_with`].
pub fn solve_dare(a: &Matrix, b: &Matrix, q: &Matrix, r: &Matrix) -> Result<Matrix, LqrError> {
    solve_dare_with(a, b, q, r, &DareOptions::default())
}

/// Solve the discrete algebraic Riccati equation
///
/// ```text
/// X = A'XA - A'XB (R + B'XB)^-1 B'XA + Q
/// ```
///
/// for its stabilising solution X.
///
/// # Preconditions
///
/// - (A, B) must be stabilisable, otherwise [`LqrError::Uncontrollable`] is
///   returned before any iteration is done.
/// - Q must be symmetric positive semi-definite. This is not checked.
/// - (A, Q) must be detectable: every mode of A with `|lambda| >= 1` must be
///   penalised by Q. Otherwise the iteration can settle on a solution which
///   leaves that mode unstable, so [`LqrError::Undetectable`] is returned
///   instead. Since `Q = C'C` has the same range as `C'`, this is the
///   stabilisability test applied to `(A', Q)`.
/// - R must be symmetric positive definite. A failed Cholesky factorisation
///   gives [`LqrError::RNotPositiveDefinite`].
///
/// # Algorithm
///
/// The structured doubling algorithm: starting from `A_0 = A`,
/// `G_0 = B R^-1 B'` and `H_0 = Q`, with `W_k = I + G_k H_k`,
///
/// ```text
/// A_k+1 = A_k W_k^-1 A_k
/// G_k+1 = G_k + A_k W_k^-1 G_k A_k'
/// H_k+1 = H_k + A_k' H_k W_k^-1 A_k
/// ```
///
/// `H_k` converges quadratically to X. The iteration stops once the 1-norm of
/// the change in `H` is below `opts.rel_tol` times the norm of `H`, or fails
/// with [`LqrError::NonConvergence`] after `opts.max_iterations`. The result is
/// symmetrised before being returned.
pub fn solve_dare_with(
    a: &Matrix,
    b: &Matrix,
    q: &Matrix,
    r: &Matrix,
    opts: &DareOptions,
) -> Result<Matrix, LqrError> {
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
    check_shape(q, n, n, "Q")?;
    check_shape(r, m, m, "R")?;
    for mat in [a, b, q, r] {
        check_finite(mat)?;
    }

    if !is_stabilisable(a, b)? {
        warn!("DARE: (A, B) is not stabilisable, not solving");
        return Err(LqrError::Uncontrollable);
    }

    if !is_stabilisable(&a.transpose(), q)? {
        warn!("DARE: (A, Q) is not detectable, not solving");
        return Err(LqrError::Undetectable);
    }

    let r_chol = r.clone().cholesky().ok_or(LqrError::RNotPositiveDefinite)?;

    let identity = Matrix::identity(n, n);
    let mut a_k = a.clone();
    let mut g_k = b * r_chol.solve(&b.transpose());
    let mut h_k = q.clone();

    let mut residual = f64::INFINITY;

    for iteration in 1..=opts.max_iterations {
        let w_lu = (&identity + &g_k * &h_k).lu();
        let w_inv_a = w_lu.solve(&a_k).ok_or(LinalgError::Singular)?;
        let w_inv_g = w_lu.solve(&g_k).ok_or(LinalgError::Singular)?;

        let a_k_t = a_k.transpose();
        let h_next = &h_k + &a_k_t * &h_k * &w_inv_a;
        g_k = &g_k + &a_k * &w_inv_g * &a_k_t;
        a_k = &a_k * &w_inv_a;

        residual = norm_1(&(&h_next - &h_k));
        let scale = norm_1(&h_next);
        h_k = h_next;

        check_finite(&h_k)?;

        trace!(
            "DARE iteration {}: residual = {:e}, |H| = {:e}",
            iteration,
            residual,
            scale
        );

        if residual <= opts.rel_tol * scale {
            debug!(
                "DARE converged after {} iterations (n = {}, m = {})",
                iteration, n, m
            );

            return Ok((&h_k + h_k.transpose()) * 0.5);
        }
    }

    warn!(
        "DARE did not converge in {} iterations (residual {:e})",
        opts.max_iterations, residual
    );

    Err(LqrError::NonConvergence {
        iterations: opts.max_iterations,
        residual,
    })
}

/// Compute the optimal discrete LQR gain K for the control law `u = -K x`.
///
/// `K = (R + B'XB)^-1 B'XA` where X is the solution of the DARE for the same
/// system, so this has the same preconditions as [`solve_dare`].
pub fn lqr_gain(a: &Matrix, b: &Matrix, q: &Matrix, r: &Matrix) -> Result<Matrix, LqrError> {
    let x = solve_dare(a, b, q, r)?;

    let bt_x = b.transpose() * &x;
    let lhs = r + &bt_x * b;
    let rhs = &bt_x * a;

    lhs.lu()
        .solve(&rhs)
        .ok_or_else(|| LinalgError::Singular.into())
}
