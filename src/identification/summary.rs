//! identification::summary — Monte Carlo ensemble and its summaries.
//!
//! Purpose
//! -------
//! Define the containers produced by the sign-restriction sampler: the
//! per-draw historical-decomposition ensemble ([`HdEnsemble`]) and the
//! complete outcome ([`SignOutcome`]) with raw draws, pointwise medians,
//! percentile bands and the representative draw closest to the median
//! impact matrix.
//!
//! Invariants & assumptions
//! ------------------------
//! - The trailing axis of every `*_all` array indexes accepted draws, in
//!   acceptance order, and has length `ndraws`.
//! - `draws[k]` is the working model (with `b` attached) that produced slice
//!   `k` of every ensemble array; `sel` indexes into it.
//! - `hd_all.exo` is `None` exactly when the model has no exogenous
//!   variables.
//!
//! Downstream usage
//! ----------------
//! - [`SignOutcome::sign_restrictions`] is the one-call entry point with
//!   seeded routines and terminal progress logging; use
//!   [`run`](crate::identification::sampler::run) directly to inject custom
//!   routines or observers.
use crate::{
    identification::{
        errors::{SignError, SignResult},
        options::SignOptions,
        progress::SlogProgress,
        routines::SeededRoutines,
        sampler::run,
        sign_spec::SignSpec,
    },
    var::{hd::HistoricalDecomposition, model::VarModel},
};
use ndarray::{Array2, Array3, Array4, s};

/// Shape guard for arrays returned by user-supplied routines.
pub(crate) fn ensure_shape(
    what: &'static str, expected: &[usize], actual: &[usize],
) -> SignResult<()> {
    if actual != expected {
        return Err(SignError::RoutineShape {
            what,
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        });
    }
    Ok(())
}

/// HdEnsemble — historical decompositions of all accepted draws.
///
/// Fields
/// ------
/// - `shock`: `nobs × nvar × nvar × ndraws`.
/// - `init`, `constant`, `trend`, `trend2`, `endo`: `nobs × nvar × ndraws`.
/// - `exo`: `nobs × nvar × nvar_ex × ndraws`, `None` without exogenous
///   variables.
#[derive(Debug, Clone, PartialEq)]
pub struct HdEnsemble {
    pub shock: Array4<f64>,
    pub init: Array3<f64>,
    pub constant: Array3<f64>,
    pub trend: Array3<f64>,
    pub trend2: Array3<f64>,
    pub exo: Option<Array4<f64>>,
    pub endo: Array3<f64>,
}

impl HdEnsemble {
    /// Zero-filled ensemble sized for `ndraws` draws.
    pub fn zeros(nobs: usize, nvar: usize, nvar_ex: usize, ndraws: usize) -> HdEnsemble {
        HdEnsemble {
            shock: Array4::zeros((nobs, nvar, nvar, ndraws)),
            init: Array3::zeros((nobs, nvar, ndraws)),
            constant: Array3::zeros((nobs, nvar, ndraws)),
            trend: Array3::zeros((nobs, nvar, ndraws)),
            trend2: Array3::zeros((nobs, nvar, ndraws)),
            exo: (nvar_ex > 0).then(|| Array4::zeros((nobs, nvar, nvar_ex, ndraws))),
            endo: Array3::zeros((nobs, nvar, ndraws)),
        }
    }

    /// Store `hd` as draw `jj`.
    ///
    /// The exogenous component is copied only when the ensemble carries one.
    ///
    /// Errors
    /// ------
    /// - `SignError::RoutineShape` if a component does not match the
    ///   ensemble's per-draw shape, or if the ensemble carries an exogenous
    ///   component and `hd.exo` is `None` (reported with an empty `actual`).
    pub fn store(&mut self, jj: usize, hd: &HistoricalDecomposition) -> SignResult<()> {
        let (nobs, nvar, nshock, _) = self.shock.dim();
        ensure_shape("historical_decomposition.shock", &[nobs, nvar, nshock], hd.shock.shape())?;
        self.shock.slice_mut(s![.., .., .., jj]).assign(&hd.shock);

        let components = [
            (&mut self.init, &hd.init, "historical_decomposition.init"),
            (&mut self.constant, &hd.constant, "historical_decomposition.constant"),
            (&mut self.trend, &hd.trend, "historical_decomposition.trend"),
            (&mut self.trend2, &hd.trend2, "historical_decomposition.trend2"),
            (&mut self.endo, &hd.endo, "historical_decomposition.endo"),
        ];
        for (dst, src, what) in components {
            ensure_shape(what, &[nobs, nvar], src.shape())?;
            dst.slice_mut(s![.., .., jj]).assign(src);
        }

        if let Some(dst) = self.exo.as_mut() {
            let (_, _, nex, _) = dst.dim();
            let src = hd.exo.as_ref().ok_or_else(|| SignError::RoutineShape {
                what: "historical_decomposition.exo",
                expected: vec![nobs, nvar, nex],
                actual: Vec::new(),
            })?;
            ensure_shape("historical_decomposition.exo", &[nobs, nvar, nex], src.shape())?;
            dst.slice_mut(s![.., .., .., jj]).assign(src);
        }
        Ok(())
    }
}

/// SignOutcome — result of a sign-restriction run.
///
/// Fields
/// ------
/// - `ir_all`, `vd_all`: `nsteps × nvar × nvar × ndraws` impulse responses
///   and variance decompositions (percent) of every accepted draw.
/// - `b_all`: `nvar × nvar × ndraws` impact matrices.
/// - `hd_all`: historical decompositions, see [`HdEnsemble`].
/// - `ir_med`, `ir_inf`, `ir_sup`: pointwise median and lower / upper band
///   of `ir_all` (`nsteps × nvar × nvar`); likewise `vd_*`.
/// - `b_med`: elementwise median of `b_all`.
/// - `sel`: index of the draw whose `B` is closest to `b_med` in squared
///   Frobenius distance (first index on ties).
/// - `b`, `ir`, `vd`, `hd`: impact matrix and summaries recomputed from
///   `draws[sel]`.
/// - `draws`: per-draw working models, in acceptance order.
#[derive(Debug, Clone, PartialEq)]
pub struct SignOutcome {
    pub ir_all: Array4<f64>,
    pub vd_all: Array4<f64>,
    pub b_all: Array3<f64>,
    pub hd_all: HdEnsemble,
    pub ir_med: Array3<f64>,
    pub ir_inf: Array3<f64>,
    pub ir_sup: Array3<f64>,
    pub vd_med: Array3<f64>,
    pub vd_inf: Array3<f64>,
    pub vd_sup: Array3<f64>,
    pub b_med: Array2<f64>,
    pub sel: usize,
    pub b: Array2<f64>,
    pub ir: Array3<f64>,
    pub vd: Array3<f64>,
    pub hd: HistoricalDecomposition,
    pub draws: Vec<VarModel>,
}

impl SignOutcome {
    /// Run the sampler with seeded routines and terminal progress logging.
    ///
    /// The RNG is seeded from `opts.seed` (system entropy when `None`).
    ///
    /// Errors
    /// ------
    /// - Any error of [`run`].
    pub fn sign_restrictions(
        model: &VarModel, sign: &SignSpec, opts: &SignOptions,
    ) -> SignResult<SignOutcome> {
        let mut routines = SeededRoutines::from_options(opts);
        let mut progress = SlogProgress::term();
        run(model, sign, opts, &mut routines, &mut progress)
    }

    /// Number of accepted draws.
    pub fn ndraws(&self) -> usize {
        self.draws.len()
    }

    /// The representative draw's working model.
    pub fn selected_model(&self) -> &VarModel {
        &self.draws[self.sel]
    }
}
