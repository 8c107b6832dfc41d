//! rust_svar — sign-restricted structural VARs with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the sign-restriction sampler to Python via the `_rust_svar` extension
//! module. When the `python-bindings` feature is enabled, this module defines
//! the Python-facing class and submodule used by the `rust_svar` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules as the public crate surface:
//!   [`var`] (reduced-form estimation, IR / VD / HD, posterior draws),
//!   [`identification`] (sign patterns, rotation search, Monte Carlo sampler)
//!   and [`stats`] (percentiles along array axes).
//! - Define the `SignRestriction` `#[pyclass]` and the `#[pymodule]`
//!   initializer for the `_rust_svar` Python extension.
//! - Register the `identification` submodule under `rust_svar` so that
//!   dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust modules; this file
//!   performs only FFI glue, input validation, and error mapping.
//! - Python inputs are converted to validated Rust types ([`var::VarModel`],
//!   [`identification::SignSpec`], [`identification::SignOptions`]) before
//!   any computation starts.
//!
//! Conventions
//! -----------
//! - Arrays are returned to Python as NumPy copies with the axis order of the
//!   Rust containers (horizon/time, variable, shock, draw).
//! - Errors from core Rust code are converted to `ValueError` at the PyO3
//!   boundary through the `From<…> for PyErr` impls in each `errors` module.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on the inner modules and can
//!   ignore the PyO3 items guarded by the `python-bindings` feature.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules and
//!   by the end-to-end pipeline test under `tests/`.

pub mod identification;
pub mod stats;
pub mod utils;
pub mod var;

#[cfg(feature = "python-bindings")]
use numpy::{PyArray2, PyArray3, PyArray4, ToPyArray};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    identification::{
        progress::{SilentProgress, SlogProgress},
        routines::SeededRoutines,
        sampler::run,
        summary::SignOutcome,
    },
    utils::{build_sign_options, extract_deterministic, extract_f64_matrix, extract_sign_spec},
    var::model::VarModel,
};

/// SignRestriction — Python-facing wrapper for the sign-restriction sampler.
///
/// Purpose
/// -------
/// Estimate a reduced-form VAR from Python data, run the Monte Carlo sign
/// restriction sampler, and expose the resulting ensemble and summaries as
/// NumPy arrays.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `SignRestriction(endo, sign, nlag=1, deterministic="constant", exo=None,
/// nlag_ex=0, nsteps=None, impact=None, ndraws=None, pctg=None, sr_mod=None,
/// mult=None, sr_hor=None, sr_rot=None, seed=None, verbose=True)`:
/// - `endo`: 2-D array-like, `T × nvar`, oldest observation first.
/// - `sign`: 2-D array-like, `nvar × nshocks`, entries in {−1, 0, 1}.
/// - `deterministic`: one of `"none"`, `"constant"`, `"trend"`,
///   `"quadratic"`.
/// - `exo`: optional 2-D array-like, `T × nvar_ex`.
/// - `impact`: `"std"` (one standard deviation) or `"unit"`.
/// - Remaining keywords override the [`identification::SignOptions`]
///   defaults; `seed=None` keeps the default seed.
/// - `verbose`: log progress lines to the terminal.
///
/// Fields
/// ------
/// - `model`: the estimated reduced-form VAR.
/// - `inner`: the [`SignOutcome`] of the run.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_svar.identification")]
pub struct SignRestriction {
    model: VarModel,
    inner: SignOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl SignRestriction {
    #[new]
    #[pyo3(
        signature = (
            endo,
            sign,
            nlag = 1,
            deterministic = None,
            exo = None,
            nlag_ex = 0,
            nsteps = None,
            impact = None,
            ndraws = None,
            pctg = None,
            sr_mod = None,
            mult = None,
            sr_hor = None,
            sr_rot = None,
            seed = None,
            verbose = true,
        ),
        text_signature = "(endo, sign, /, nlag=1, deterministic=None, exo=None, nlag_ex=0, \
                          nsteps=None, impact=None, ndraws=None, pctg=None, sr_mod=None, \
                          mult=None, sr_hor=None, sr_rot=None, seed=None, verbose=True)"
    )]
    #[allow(clippy::too_many_arguments)]
    pub fn new<'py>(
        py: Python<'py>, endo: &Bound<'py, PyAny>, sign: &Bound<'py, PyAny>, nlag: usize,
        deterministic: Option<&str>, exo: Option<&Bound<'py, PyAny>>, nlag_ex: usize,
        nsteps: Option<usize>, impact: Option<&str>, ndraws: Option<usize>, pctg: Option<f64>,
        sr_mod: Option<bool>, mult: Option<usize>, sr_hor: Option<usize>, sr_rot: Option<usize>,
        seed: Option<u64>, verbose: bool,
    ) -> PyResult<Self> {
        let endo_arr = extract_f64_matrix(py, endo)?;
        let exo_arr = exo.map(|e| extract_f64_matrix(py, e)).transpose()?;
        let det = extract_deterministic(deterministic)?;
        let model = VarModel::estimate(
            endo_arr.as_array(),
            nlag,
            det,
            exo_arr.as_ref().map(|a| a.as_array()),
            nlag_ex,
        )?;

        let sign = extract_sign_spec(py, sign)?;
        let opts =
            build_sign_options(nsteps, impact, ndraws, pctg, sr_mod, mult, sr_hor, sr_rot, seed)?;

        let mut routines = SeededRoutines::from_options(&opts);
        let inner = if verbose {
            run(&model, &sign, &opts, &mut routines, &mut SlogProgress::term())?
        } else {
            run(&model, &sign, &opts, &mut routines, &mut SilentProgress)?
        };
        Ok(SignRestriction { model, inner })
    }

    /// Number of accepted draws.
    #[getter]
    pub fn ndraws(&self) -> usize {
        self.inner.ndraws()
    }

    /// Index of the draw closest to the median impact matrix.
    #[getter]
    pub fn sel(&self) -> usize {
        self.inner.sel
    }

    #[getter]
    pub fn sigma<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.model.sigma.to_pyarray(py)
    }

    #[getter]
    pub fn b<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.b.to_pyarray(py)
    }

    #[getter]
    pub fn b_med<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.b_med.to_pyarray(py)
    }

    #[getter]
    pub fn b_all<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<f64>> {
        self.inner.b_all.to_pyarray(py)
    }

    #[getter]
    pub fn ir<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<f64>> {
        self.inner.ir.to_pyarray(py)
    }

    #[getter]
    pub fn ir_med<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<f64>> {
        self.inner.ir_med.to_pyarray(py)
    }

    #[getter]
    pub fn ir_inf<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<f64>> {
        self.inner.ir_inf.to_pyarray(py)
    }

    #[getter]
    pub fn ir_sup<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<f64>> {
        self.inner.ir_sup.to_pyarray(py)
    }

    #[getter]
    pub fn ir_all<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray4<f64>> {
        self.inner.ir_all.to_pyarray(py)
    }

    #[getter]
    pub fn vd<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<f64>> {
        self.inner.vd.to_pyarray(py)
    }

    #[getter]
    pub fn vd_med<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<f64>> {
        self.inner.vd_med.to_pyarray(py)
    }

    #[getter]
    pub fn vd_inf<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<f64>> {
        self.inner.vd_inf.to_pyarray(py)
    }

    #[getter]
    pub fn vd_sup<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<f64>> {
        self.inner.vd_sup.to_pyarray(py)
    }

    #[getter]
    pub fn vd_all<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray4<f64>> {
        self.inner.vd_all.to_pyarray(py)
    }

    /// Shock contributions of the representative draw, `nobs × nvar × nvar`.
    #[getter]
    pub fn hd_shock<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<f64>> {
        self.inner.hd.shock.to_pyarray(py)
    }

    #[getter]
    pub fn hd_init<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.hd.init.to_pyarray(py)
    }

    #[getter]
    pub fn hd_const<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.hd.constant.to_pyarray(py)
    }

    #[getter]
    pub fn hd_trend<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.hd.trend.to_pyarray(py)
    }

    #[getter]
    pub fn hd_trend2<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.hd.trend2.to_pyarray(py)
    }

    #[getter]
    pub fn hd_exo<'py>(&self, py: Python<'py>) -> Option<Bound<'py, PyArray3<f64>>> {
        self.inner.hd.exo.as_ref().map(|e| e.to_pyarray(py))
    }

    #[getter]
    pub fn hd_endo<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.hd.endo.to_pyarray(py)
    }

    /// Shock contributions of every draw, `nobs × nvar × nvar × ndraws`.
    #[getter]
    pub fn hd_shock_all<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray4<f64>> {
        self.inner.hd_all.shock.to_pyarray(py)
    }
}

/// _rust_svar — PyO3 module initializer for the Python extension.
///
/// Creates the `identification` submodule, attaches it to `_rust_svar` and
/// registers it in `sys.modules` so it is importable via its dotted path.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_svar<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let identification_mod = PyModule::new(_py, "identification")?;
    identification(_py, m, &identification_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_svar.identification", identification_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn identification<'py>(
    _py: Python, rust_svar: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<SignRestriction>()?;
    rust_svar.add_submodule(m)?;
    Ok(())
}
