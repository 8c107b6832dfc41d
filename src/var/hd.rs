//! var::hd — historical decomposition of the estimation sample.
//!
//! Purpose
//! -------
//! Attribute the observed path of every endogenous variable to structural
//! shocks, initial conditions, deterministic terms and exogenous inputs.
//!
//! Key behaviors
//! -------------
//! - Recover structural shocks `ε_t = B⁻¹ u_t` from the reduced-form
//!   residuals.
//! - Run the companion recursion `s_t = e(input_t) + Fcomp s_{t−1}` once
//!   per component, where `e(·)` stacks an `nvar` input into the first block
//!   of the state; the first `nvar` entries of `s_t` form the contribution.
//! - Sum all components into `endo`, which reproduces the effective-sample
//!   data `y` up to floating-point error.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every component covers the effective sample only: row `t` corresponds
//!   to `y.row(t)`.
//! - Initial conditions start from the lag block of the first regressor
//!   row, so `init[t] = J Fcomp^{t+1} s₀` with `J` selecting the first
//!   `nvar` state entries.
//! - Deterministic components not present in the model stay at zero; the
//!   exogenous component is `None` when the model has no exogenous
//!   variables.
use crate::var::{
    errors::VarResult, ir::impact_matrix, linalg::solve, model::VarModel, options::VarOptions,
};
use ndarray::{Array1, Array2, Array3, ArrayView1, Axis, s};

/// HistoricalDecomposition — per-component contributions to the sample path.
///
/// Fields
/// ------
/// - `shock`: `nobs × nvar × nshock`, contribution of each structural shock.
/// - `init`: `nobs × nvar`, propagation of the pre-sample lags.
/// - `constant`, `trend`, `trend2`: `nobs × nvar`, deterministic terms.
/// - `exo`: `nobs × nvar × nvar_ex`, contribution of each exogenous variable
///   (`None` without exogenous regressors).
/// - `endo`: `nobs × nvar`, sum of all components.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalDecomposition {
    pub shock: Array3<f64>,
    pub init: Array2<f64>,
    pub constant: Array2<f64>,
    pub trend: Array2<f64>,
    pub trend2: Array2<f64>,
    pub exo: Option<Array3<f64>>,
    pub endo: Array2<f64>,
}

/// Companion-form propagation of a sequence of `nvar`-dimensional inputs.
struct Propagator<'a> {
    fcomp: &'a Array2<f64>,
    nvar: usize,
    state: Array1<f64>,
}

impl<'a> Propagator<'a> {
    fn new(fcomp: &'a Array2<f64>, nvar: usize) -> Self {
        Propagator { fcomp, nvar, state: Array1::zeros(fcomp.nrows()) }
    }

    fn from_state(fcomp: &'a Array2<f64>, nvar: usize, state: Array1<f64>) -> Self {
        Propagator { fcomp, nvar, state }
    }

    /// Advance one period with `input` entering the first block; return the
    /// first `nvar` entries of the new state.
    fn step(&mut self, input: Option<ArrayView1<'_, f64>>) -> ArrayView1<'_, f64> {
        let mut next = self.fcomp.dot(&self.state);
        if let Some(u) = input {
            let mut head = next.slice_mut(s![..self.nvar]);
            head += &u;
        }
        self.state = next;
        self.state.slice(s![..self.nvar])
    }
}

/// Historical decomposition of the estimation sample.
///
/// Parameters
/// ----------
/// - `model`: `&VarModel`
///   Fitted model; `x`, `resid` and `ft` must describe the same sample.
/// - `opts`: `&VarOptions`
///   Only `ident` is used, to resolve the impact matrix.
///
/// Returns
/// -------
/// `VarResult<HistoricalDecomposition>`
///
/// Errors
/// ------
/// - Propagates [`impact_matrix`] errors.
/// - `VarError::SingularMatrix` if `B` is not invertible.
pub fn historical_decomposition(
    model: &VarModel, opts: &VarOptions,
) -> VarResult<HistoricalDecomposition> {
    let b = impact_matrix(model, opts)?;
    let (nvar, nobs, nlag) = (model.nvar, model.nobs, model.nlag);
    let ndet = model.ndet();
    let fcomp = model.companion();

    // nvar × nobs structural shocks.
    let eps = solve(b.view(), model.resid.t(), "B")?;

    let mut shock = Array3::<f64>::zeros((nobs, nvar, nvar));
    for j in 0..nvar {
        let mut prop = Propagator::new(&fcomp, nvar);
        let b_j = b.column(j);
        for t in 0..nobs {
            let input = &b_j * eps[[j, t]];
            let contrib = prop.step(Some(input.view()));
            shock.slice_mut(s![t, .., j]).assign(&contrib);
        }
    }

    let mut init = Array2::<f64>::zeros((nobs, nvar));
    let s0 = model.x.slice(s![0, ndet..ndet + nvar * nlag]).to_owned();
    let mut prop = Propagator::from_state(&fcomp, nvar, s0);
    for t in 0..nobs {
        init.row_mut(t).assign(&prop.step(None));
    }

    let deterministic = |k: usize| -> Array2<f64> {
        let mut out = Array2::<f64>::zeros((nobs, nvar));
        if k >= ndet {
            return out;
        }
        let coeff = model.coefficient(k);
        let mut prop = Propagator::new(&fcomp, nvar);
        for t in 0..nobs {
            let input = &coeff * model.x[[t, k]];
            out.row_mut(t).assign(&prop.step(Some(input.view())));
        }
        out
    };
    let constant = deterministic(0);
    let trend = deterministic(1);
    let trend2 = deterministic(2);

    let exo = (model.nvar_ex > 0).then(|| {
        let mut out = Array3::<f64>::zeros((nobs, nvar, model.nvar_ex));
        for k in 0..model.nvar_ex {
            let mut prop = Propagator::new(&fcomp, nvar);
            for t in 0..nobs {
                let mut input = Array1::<f64>::zeros(nvar);
                for lag in 0..=model.nlag_ex {
                    let col = model.exo_column(k, lag);
                    input.scaled_add(model.x[[t, col]], &model.coefficient(col));
                }
                out.slice_mut(s![t, .., k]).assign(&prop.step(Some(input.view())));
            }
        }
        out
    });

    let mut endo = &init + &constant + &trend + &trend2 + &shock.sum_axis(Axis(2));
    if let Some(ex) = &exo {
        endo += &ex.sum_axis(Axis(2));
    }

    Ok(HistoricalDecomposition { shock, init, constant, trend, trend2, exo, endo })
}
