//! identification::sign_spec — validated sign-restriction pattern.
//!
//! A [`SignSpec`] is an `nvar × nshocks` matrix with entries in
//! `{−1, 0, +1}`. Column `s` constrains structural shock `s`: a `+1` (`−1`)
//! in row `i` requires the response of variable `i` to be positive
//! (negative), a `0` leaves it free. Shocks `nshocks..nvar` are not
//! restricted at all.
use crate::identification::errors::{SignError, SignResult};
use ndarray::{Array2, ArrayView2};

/// SignSpec — sign pattern on structural impulse responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignSpec {
    signs: Array2<i8>,
}

impl SignSpec {
    /// Build from an integer matrix.
    ///
    /// Errors
    /// ------
    /// - `SignError::InvalidSignShape` if the matrix has no rows, no
    ///   columns, or more columns than rows.
    /// - `SignError::InvalidSignValue` for entries outside `{−1, 0, 1}`.
    pub fn new(signs: Array2<i8>) -> SignResult<SignSpec> {
        let (rows, cols) = signs.dim();
        if rows == 0 || cols == 0 || cols > rows {
            return Err(SignError::InvalidSignShape { rows, cols });
        }
        if let Some(((row, col), &v)) = signs.indexed_iter().find(|(_, v)| !(-1..=1).contains(*v))
        {
            return Err(SignError::InvalidSignValue { row, col, value: v as f64 });
        }
        Ok(SignSpec { signs })
    }

    /// Build from a floating-point matrix (e.g. data coming from NumPy).
    ///
    /// Entries must be exactly `−1.0`, `0.0` or `1.0`.
    pub fn from_f64(signs: ArrayView2<'_, f64>) -> SignResult<SignSpec> {
        let mut out = Array2::<i8>::zeros(signs.dim());
        for ((row, col), &value) in signs.indexed_iter() {
            out[[row, col]] = if value == 1.0 {
                1
            } else if value == -1.0 {
                -1
            } else if value == 0.0 {
                0
            } else {
                return Err(SignError::InvalidSignValue { row, col, value });
            };
        }
        SignSpec::new(out)
    }

    pub fn nvar(&self) -> usize {
        self.signs.nrows()
    }

    pub fn nshocks(&self) -> usize {
        self.signs.ncols()
    }

    pub fn signs(&self) -> ArrayView2<'_, i8> {
        self.signs.view()
    }

    /// Required sign of variable `var` in response to shock `shock`.
    pub fn get(&self, var: usize, shock: usize) -> i8 {
        self.signs[[var, shock]]
    }
}
