//! Real-exponent matrix power

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::{debug, trace};

use super::exp;
use crate::linalg::{check_finite, check_square, eigenvalues, norm_1, LinalgError, Matrix};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Maximum number of Denman-Beavers iterations for a single square root.
const MAX_SQRT_ITER: usize = 100;

/// Maximum number of square roots taken before the logarithm series.
const MAX_NUM_SQRTS: usize = 64;

/// Maximum number of terms in the logarithm series.
const MAX_LOG_TERMS: usize = 100;

/// `log(I + E)` is evaluated once `||E||_1` is below this.
const LOG_SERIES_RADIUS: f64 = 0.25;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Raise a square matrix to a real power.
///
/// - Integer exponents of any magnitude use repeated squaring, with negative
///   exponents applied to the inverse. `A^0` is the identity.
/// - Non-integer exponents give the principal power `exp(p log(A))`. This
///   only exists when no eigenvalue of `A` lies on the closed negative real
///   axis (zero included); otherwise [`LinalgError::NoPrincipalPower`] is
///   returned rather than a projection of the complex result.
pub fn pow(a: &Matrix, exponent: f64) -> Result<Matrix, LinalgError> {
    let n = check_square(a)?;
    check_finite(a)?;

    if !exponent.is_finite() {
        return Err(LinalgError::NonFinite);
    }

    let result = if exponent.fract() == 0.0 {
        let base = if exponent < 0.0 {
            a.clone().try_inverse().ok_or(LinalgError::Singular)?
        } else {
            a.clone()
        };

        int_pow(base, exponent.abs())
    } else {
        check_principal_domain(a)?;
        let log_a = log(a)?;

        debug!("pow: n = {}, non-integer exponent {}", n, exponent);

        exp(&(log_a * exponent))?
    };

    check_finite(&result)?;
    Ok(result)
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Raise to a non-negative integer power by repeated squaring.
///
/// `p` must be integer valued. It is kept as a float so exponents beyond any
/// integer type are handled too: halving and flooring an integer valued float
/// is exact.
fn int_pow(mut base: Matrix, mut p: f64) -> Matrix {
    let n = base.nrows();
    let mut result = Matrix::identity(n, n);

    while p > 0.0 {
        if p % 2.0 == 1.0 {
            result = &result * &base;
        }
        p = (p / 2.0).floor();
        if p > 0.0 {
            base = &base * &base;
        }
    }

    result
}

/// Fail if any eigenvalue lies on the closed negative real axis.
fn check_principal_domain(a: &Matrix) -> Result<(), LinalgError> {
    let tol = a.nrows() as f64 * f64::EPSILON * norm_1(a).max(1.0);

    match eigenvalues(a)?
        .into_iter()
        .find(|l| l.im.abs() <= tol && l.re <= tol)
    {
        Some(l) => Err(LinalgError::NoPrincipalPower(l)),
        None => Ok(()),
    }
}

/// Principal matrix logarithm by inverse scaling and squaring.
///
/// Square roots are taken until `A^(1/2^k)` is close to the identity, the
/// series for `log(I + E)` is summed, and the result scaled back by `2^k`.
fn log(a: &Matrix) -> Result<Matrix, LinalgError> {
    let n = a.nrows();
    let identity = Matrix::identity(n, n);

    let mut x = a.clone();
    let mut num_sqrts = 0;
    while norm_1(&(&x - &identity)) > LOG_SERIES_RADIUS {
        if num_sqrts >= MAX_NUM_SQRTS {
            return Err(LinalgError::NonConvergence {
                iterations: num_sqrts,
                residual: norm_1(&(&x - &identity)),
            });
        }
        x = sqrt(&x)?;
        num_sqrts += 1;
    }

    // log(I + E) = E - E^2/2 + E^3/3 - ...
    let e = x - &identity;
    let mut term = e.clone();
    let mut sum = e.clone();
    for k in 2..=MAX_LOG_TERMS {
        term = &term * &e;
        let contrib = &term / k as f64;

        if k % 2 == 0 {
            sum -= &contrib;
        } else {
            sum += &contrib;
        }

        if norm_1(&contrib) <= f64::EPSILON * norm_1(&sum) {
            break;
        }
    }

    trace!("log: {} square roots taken", num_sqrts);

    Ok(sum * 2f64.powi(num_sqrts as i32))
}

/// Principal square root by the Denman-Beavers iteration.
fn sqrt(a: &Matrix) -> Result<Matrix, LinalgError> {
    let n = a.nrows();
    let mut y = a.clone();
    let mut z = Matrix::identity(n, n);
    let mut residual = f64::INFINITY;

    for _ in 0..MAX_SQRT_ITER {
        let y_inv = y.clone().try_inverse().ok_or(LinalgError::Singular)?;
        let z_inv = z.clone().try_inverse().ok_or(LinalgError::Singular)?;

        let y_next = (&y + z_inv) * 0.5;
        z = (&z + y_inv) * 0.5;

        residual = norm_1(&(&y_next - &y));
        let scale = norm_1(&y_next);
        y = y_next;

        check_finite(&y)?;
        if residual <= 10.0 * f64::EPSILON * scale {
            return Ok(y);
        }
    }

    Err(LinalgError::NonConvergence {
        iterations: MAX_SQRT_ITER,
        residual,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    fn test_matrix() -> Matrix {
        Matrix::from_row_slice(3, 3, &[1.0, 2.0, 0.5, -1.0, 0.3, 2.0, 0.0, 1.5, -0.7])
    }

    #[test]
    fn test_pow_integer() {
        let a = test_matrix();

        assert_eq!(pow(&a, 0.0).unwrap(), Matrix::identity(3, 3));
        assert_eq!(pow(&a, 1.0).unwrap(), a);

        let mut repeated = Matrix::identity(3, 3);
        for p in 1..=7 {
            repeated = &repeated * &a;
            assert_relative_eq!(
                pow(&a, p as f64).unwrap(),
                repeated,
                epsilon = 1e-9,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_pow_huge_integer() {
        // Beyond every machine integer, but still an integer power
        let a = Matrix::from_row_slice(2, 2, &[-1.0, 0.0, 0.0, 0.5]);

        let p = pow(&a, 1e20).unwrap();
        assert_relative_eq!(p, Matrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 0.0]));

        // Odd and just above u32::MAX
        let p = pow(&a, 4_294_967_297.0).unwrap();
        assert_relative_eq!(p[(0, 0)], -1.0);
        assert_relative_eq!(p[(1, 1)], 0.0);
    }

    #[test]
    fn test_pow_negative_integer() {
        let a = test_matrix();
        let a_inv_sq = pow(&a, -2.0).unwrap();

        assert_relative_eq!(&a_inv_sq * &a * &a, Matrix::identity(3, 3), epsilon = 1e-10);

        let singular = Matrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        assert_eq!(pow(&singular, -1.0), Err(LinalgError::Singular));
    }

    #[test]
    fn test_pow_fractional() {
        // Symmetric positive definite, eigenvalues 1 and 3
        let a = Matrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 2.0]);

        let root = pow(&a, 0.5).unwrap();
        assert_relative_eq!(&root * &root, a, epsilon = 1e-10);

        let cube_root = pow(&a, 1.0 / 3.0).unwrap();
        assert_relative_eq!(&cube_root * &cube_root * &cube_root, a, epsilon = 1e-10);

        // A^1.5 = A * A^0.5
        assert_relative_eq!(pow(&a, 1.5).unwrap(), &a * &root, epsilon = 1e-10);
    }

    #[test]
    fn test_pow_fractional_complex_eigenvalues() {
        // Rotation by 60 degrees: the square root is rotation by 30 degrees
        let t = std::f64::consts::FRAC_PI_3;
        let a = Matrix::from_row_slice(2, 2, &[t.cos(), -t.sin(), t.sin(), t.cos()]);
        let h = t / 2.0;
        let expected = Matrix::from_row_slice(2, 2, &[h.cos(), -h.sin(), h.sin(), h.cos()]);

        assert_relative_eq!(pow(&a, 0.5).unwrap(), expected, epsilon = 1e-10);
    }

    #[test]
    fn test_pow_no_principal_power() {
        let a = Matrix::from_row_slice(2, 2, &[-2.0, 0.0, 0.0, 3.0]);
        assert!(matches!(
            pow(&a, 0.5),
            Err(LinalgError::NoPrincipalPower(l)) if (l.re + 2.0).abs() < 1e-12
        ));
        assert_eq!(
            pow(&a, 0.5).unwrap_err().kind(),
            crate::ErrorKind::NonConvergence
        );

        // Integer powers are still fine
        assert_relative_eq!(
            pow(&a, 3.0).unwrap(),
            Matrix::from_row_slice(2, 2, &[-8.0, 0.0, 0.0, 27.0]),
            epsilon = 1e-12
        );

        // A zero eigenvalue has no logarithm either
        let singular = Matrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 0.0]);
        assert!(matches!(
            pow(&singular, 0.5),
            Err(LinalgError::NoPrincipalPower(_))
        ));
    }

    #[test]
    fn test_pow_errors() {
        assert!(matches!(
            pow(&Matrix::zeros(3, 2), 2.0),
            Err(LinalgError::NotSquare { .. })
        ));
        assert_eq!(pow(&test_matrix(), f64::NAN), Err(LinalgError::NonFinite));
    }
}
