//! var::model — reduced-form VAR(p) container and OLS estimation.
//!
//! Purpose
//! -------
//! Hold a fitted reduced-form VAR with optional deterministic terms and
//! exogenous regressors, and provide the builders used to derive per-draw
//! working copies (posterior parameter draws, attached rotation matrices).
//!
//! Key behaviors
//! -------------
//! - Estimate `y_t = c + τ t + τ₂ t² + A₁ y_{t−1} + … + A_p y_{t−p} + Γ₀ x_t
//!   + … + Γ_q x_{t−q} + u_t` equation by equation via OLS
//!   ([`VarModel::estimate`]).
//! - Expose the regressor matrix `x`, the effective-sample targets `y`, the
//!   residuals and the degrees-of-freedom-corrected covariance `sigma`.
//! - Validate internal consistency ([`VarModel::validate`]) before the model
//!   is handed to downstream routines.
//!
//! Invariants & assumptions
//! ------------------------
//! - `ft` has shape `ntotcoeff × nvar`; row `k` is the coefficient on
//!   regressor column `k` of `x` in every equation.
//! - Regressor columns are ordered as
//!   `[deterministic | y_{t−1} … y_{t−p} | x_t … x_{t−q}]` with each lag
//!   block holding all variables in their original order.
//! - `sigma = residᵀ resid / (nobs − ntotcoeff)`.
//! - `b`, when present, is an `nvar × nvar` impact matrix with `b bᵀ = sigma`
//!   for the identification schemes in this crate.
//!
//! Conventions
//! -----------
//! - Effective observations are indexed `t = 0, …, nobs − 1` and correspond
//!   to rows `nlag, …, T − 1` of the input data. Deterministic regressors
//!   take the values `1`, `t + 1` and `(t + 1)²`.
use crate::var::{
    errors::{VarError, VarResult},
    linalg::{cholesky_lower, to_array2, to_dmatrix},
};
use ndarray::{Array2, ArrayView2, Axis, s};

/// Deterministic terms included in every VAR equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deterministic {
    /// No deterministic regressors.
    None,
    /// Intercept only.
    #[default]
    Constant,
    /// Intercept and linear trend.
    Trend,
    /// Intercept, linear and quadratic trend.
    QuadraticTrend,
}

impl Deterministic {
    /// Number of deterministic regressor columns.
    pub fn n_terms(&self) -> usize {
        match self {
            Deterministic::None => 0,
            Deterministic::Constant => 1,
            Deterministic::Trend => 2,
            Deterministic::QuadraticTrend => 3,
        }
    }

    fn values(&self, t: usize) -> [f64; 3] {
        let tt = (t + 1) as f64;
        [1.0, tt, tt * tt]
    }
}

/// VarModel — fitted reduced-form VAR(p).
///
/// Fields
/// ------
/// - `nvar`, `nvar_ex`: number of endogenous / exogenous variables.
/// - `nobs`: effective sample size (input length minus `nlag`).
/// - `nlag`, `nlag_ex`: endogenous and exogenous lag orders.
/// - `deterministic`: deterministic terms, see [`Deterministic`].
/// - `ntotcoeff`: regressors per equation.
/// - `ft`: coefficient matrix, `ntotcoeff × nvar`.
/// - `sigma`: residual covariance, `nvar × nvar`.
/// - `resid`: residuals, `nobs × nvar`.
/// - `x`: regressor matrix, `nobs × ntotcoeff`.
/// - `y`: effective-sample endogenous data, `nobs × nvar`.
/// - `b`: impact (rotation) matrix once identified.
#[derive(Debug, Clone, PartialEq)]
pub struct VarModel {
    pub nvar: usize,
    pub nvar_ex: usize,
    pub nobs: usize,
    pub nlag: usize,
    pub nlag_ex: usize,
    pub deterministic: Deterministic,
    pub ntotcoeff: usize,
    pub ft: Array2<f64>,
    pub sigma: Array2<f64>,
    pub resid: Array2<f64>,
    pub x: Array2<f64>,
    pub y: Array2<f64>,
    pub b: Option<Array2<f64>>,
}

impl VarModel {
    /// Estimate a VAR(p) by equation-wise OLS.
    ///
    /// Parameters
    /// ----------
    /// - `endo`: `ArrayView2<f64>`
    ///   `T × nvar` endogenous data, oldest observation first.
    /// - `nlag`: `usize`
    ///   Lag order `p ≥ 1`.
    /// - `deterministic`: [`Deterministic`]
    ///   Deterministic terms to include.
    /// - `exo`: `Option<ArrayView2<f64>>`
    ///   Optional `T × nvar_ex` exogenous data aligned with `endo`.
    /// - `nlag_ex`: `usize`
    ///   Exogenous lag order `q ≤ p`; ignored when `exo` is `None`.
    ///
    /// Returns
    /// -------
    /// `VarResult<VarModel>`
    ///   Fitted model with `b = None`.
    ///
    /// Errors
    /// ------
    /// - `VarError::EmptyData`, `VarError::NonFiniteData`,
    ///   `VarError::ExogenousLengthMismatch` for malformed inputs.
    /// - `VarError::InvalidLagOrder`, `VarError::InvalidExogenousLagOrder`
    ///   for inadmissible lag orders.
    /// - `VarError::InsufficientObservations` when `nobs ≤ ntotcoeff`.
    /// - `VarError::NotPositiveDefinite` when `XᵀX` is rank deficient.
    ///
    /// Notes
    /// -----
    /// - The normal equations are solved through a Cholesky factorization of
    ///   `XᵀX`; collinear regressors therefore fail loudly instead of
    ///   producing arbitrary coefficients.
    pub fn estimate(
        endo: ArrayView2<'_, f64>, nlag: usize, deterministic: Deterministic,
        exo: Option<ArrayView2<'_, f64>>, nlag_ex: usize,
    ) -> VarResult<VarModel> {
        let (nrows, nvar) = endo.dim();
        if nrows == 0 || nvar == 0 {
            return Err(VarError::EmptyData);
        }
        if nlag == 0 {
            return Err(VarError::InvalidLagOrder { nlag });
        }
        check_finite(endo)?;
        let (nvar_ex, nlag_ex) = match exo {
            Some(ex) => {
                if ex.nrows() != nrows {
                    return Err(VarError::ExogenousLengthMismatch { endo: nrows, exo: ex.nrows() });
                }
                if nlag_ex > nlag {
                    return Err(VarError::InvalidExogenousLagOrder { nlag_ex, nlag });
                }
                check_finite(ex)?;
                (ex.ncols(), nlag_ex)
            }
            None => (0, 0),
        };

        let ndet = deterministic.n_terms();
        let ntotcoeff = ndet + nvar * nlag + nvar_ex * (nlag_ex + 1);
        let nobs = nrows.saturating_sub(nlag);
        if nobs <= ntotcoeff {
            return Err(VarError::InsufficientObservations { nobs, ntotcoeff });
        }

        let mut x = Array2::<f64>::zeros((nobs, ntotcoeff));
        for t in 0..nobs {
            let row = t + nlag;
            let det = deterministic.values(t);
            for k in 0..ndet {
                x[[t, k]] = det[k];
            }
            for j in 1..=nlag {
                let start = ndet + (j - 1) * nvar;
                x.slice_mut(s![t, start..start + nvar]).assign(&endo.row(row - j));
            }
            if let Some(ex) = exo {
                let base = ndet + nvar * nlag;
                for l in 0..=nlag_ex {
                    let start = base + l * nvar_ex;
                    x.slice_mut(s![t, start..start + nvar_ex]).assign(&ex.row(row - l));
                }
            }
        }
        let y = endo.slice(s![nlag.., ..]).to_owned();

        let xtx = x.t().dot(&x);
        let xty = x.t().dot(&y);
        let chol = to_dmatrix(xtx.view())
            .cholesky()
            .ok_or(VarError::NotPositiveDefinite { what: "X'X" })?;
        let ft = to_array2(&chol.solve(&to_dmatrix(xty.view())));

        let resid = &y - &x.dot(&ft);
        let sigma = resid.t().dot(&resid) / (nobs - ntotcoeff) as f64;

        Ok(VarModel {
            nvar,
            nvar_ex,
            nobs,
            nlag,
            nlag_ex,
            deterministic,
            ntotcoeff,
            ft,
            sigma,
            resid,
            x,
            y,
            b: None,
        })
    }

    /// Check that dimensions and stored arrays agree.
    ///
    /// Errors
    /// ------
    /// - `VarError::InvalidDimension` for zero `nvar`, `nlag` or `nobs`.
    /// - `VarError::ShapeMismatch` naming the first inconsistent array.
    pub fn validate(&self) -> VarResult<()> {
        for (what, value) in [("nvar", self.nvar), ("nlag", self.nlag), ("nobs", self.nobs)] {
            if value == 0 {
                return Err(VarError::InvalidDimension { what, value });
            }
        }
        let expected_coeff = self.deterministic.n_terms()
            + self.nvar * self.nlag
            + self.nvar_ex * (self.nlag_ex + 1);
        let checks = [
            ("ntotcoeff", (expected_coeff, 1), (self.ntotcoeff, 1)),
            ("ft", (self.ntotcoeff, self.nvar), self.ft.dim()),
            ("sigma", (self.nvar, self.nvar), self.sigma.dim()),
            ("resid", (self.nobs, self.nvar), self.resid.dim()),
            ("x", (self.nobs, self.ntotcoeff), self.x.dim()),
            ("y", (self.nobs, self.nvar), self.y.dim()),
        ];
        for (what, expected, actual) in checks {
            if expected != actual {
                return Err(VarError::ShapeMismatch { what, expected, actual });
            }
        }
        if let Some(b) = &self.b {
            if b.dim() != (self.nvar, self.nvar) {
                return Err(VarError::ShapeMismatch {
                    what: "B",
                    expected: (self.nvar, self.nvar),
                    actual: b.dim(),
                });
            }
        }
        Ok(())
    }

    /// Number of deterministic regressors.
    pub fn ndet(&self) -> usize {
        self.deterministic.n_terms()
    }

    /// Copy of the model with posterior draws of `sigma` and `ft` attached.
    pub fn with_draw(&self, sigma: Array2<f64>, ft: Array2<f64>) -> VarModel {
        VarModel { sigma, ft, ..self.clone() }
    }

    /// Copy of the model with the impact matrix `b` attached.
    pub fn with_rotation(&self, b: Array2<f64>) -> VarModel {
        VarModel { b: Some(b), ..self.clone() }
    }

    /// Lower Cholesky factor of `sigma` (recursive identification).
    pub fn chol_sigma(&self) -> VarResult<Array2<f64>> {
        cholesky_lower(self.sigma.view(), "sigma")
    }

    /// Column of exogenous variable `k` at lag `lag` (0 = contemporaneous) in `x`.
    pub(crate) fn exo_column(&self, k: usize, lag: usize) -> usize {
        self.ndet() + self.nvar * self.nlag + lag * self.nvar_ex + k
    }

    /// Coefficients on regressor `col`, one per equation.
    pub(crate) fn coefficient(&self, col: usize) -> ndarray::ArrayView1<'_, f64> {
        self.ft.index_axis(Axis(0), col)
    }
}

fn check_finite(data: ArrayView2<'_, f64>) -> VarResult<()> {
    match data.indexed_iter().find(|(_, v)| !v.is_finite()) {
        Some(((row, col), &value)) => Err(VarError::NonFiniteData { row, col, value }),
        None => Ok(()),
    }
}
