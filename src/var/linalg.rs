//! var::linalg — bridges between `ndarray` storage and `nalgebra` factorizations.
//!
//! The crate stores every matrix and tensor as `ndarray` arrays; dense
//! factorizations (Cholesky, LU, QR) are delegated to `nalgebra`. Helpers
//! here copy between the two representations and map factorization
//! failures into [`VarError`] values.
use crate::var::errors::{VarError, VarResult};
use nalgebra::DMatrix;
use ndarray::{Array2, ArrayView2};

/// Copy an `ndarray` matrix into a column-major `DMatrix`.
pub fn to_dmatrix(a: ArrayView2<'_, f64>) -> DMatrix<f64> {
    DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| a[[i, j]])
}

/// Copy a `DMatrix` back into an `ndarray` matrix.
pub fn to_array2(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}

/// Lower-triangular Cholesky factor `L` with `L Lᵀ = a`.
///
/// Only the lower triangle of `a` is read. `what` names the matrix in the
/// error message.
///
/// Errors
/// ------
/// - `VarError::NotPositiveDefinite` if the factorization breaks down.
pub fn cholesky_lower(a: ArrayView2<'_, f64>, what: &'static str) -> VarResult<Array2<f64>> {
    let chol = to_dmatrix(a).cholesky().ok_or(VarError::NotPositiveDefinite { what })?;
    Ok(to_array2(&chol.l()))
}

/// Inverse of a square matrix via LU.
pub fn inverse(a: ArrayView2<'_, f64>, what: &'static str) -> VarResult<Array2<f64>> {
    let inv = to_dmatrix(a).try_inverse().ok_or(VarError::SingularMatrix { what })?;
    Ok(to_array2(&inv))
}

/// Solve `a · x = b` for `x` with `a` square.
pub fn solve(
    a: ArrayView2<'_, f64>, b: ArrayView2<'_, f64>, what: &'static str,
) -> VarResult<Array2<f64>> {
    let lu = to_dmatrix(a).lu();
    let x = lu.solve(&to_dmatrix(b)).ok_or(VarError::SingularMatrix { what })?;
    Ok(to_array2(&x))
}

/// Return `(a + aᵀ) / 2`.
pub fn symmetrize(a: &Array2<f64>) -> Array2<f64> {
    (a + &a.t()) * 0.5
}
