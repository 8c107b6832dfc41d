//! utils — conversion helpers for the Python bindings.
//!
//! Accept NumPy arrays, pandas objects (via `to_numpy`) or nested Python
//! sequences and turn them into the validated Rust types used by
//! the `SignRestriction` Python class.
#[cfg(feature = "python-bindings")]
use ndarray::Array2;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    identification::{options::SignOptions, sign_spec::SignSpec},
    var::{
        model::Deterministic,
        options::{Identification, ShockSize, VarOptions},
    },
};

#[cfg(feature = "python-bindings")]
use numpy::{
    PyArrayMethods, // .readonly()
    PyReadonlyArray2,
    ToPyArray, // Array2 → PyArray
};

/// Extract a 2-D `float64` array (rows = observations).
#[cfg(feature = "python-bindings")]
pub fn extract_f64_matrix<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray2<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr_ro);
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(frame_ro) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(frame_ro);
        }
    }

    let rows: Vec<Vec<f64>> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 2-D numpy.ndarray, pandas.DataFrame, or nested sequence of float64",
        )
    })?;
    let ncols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|r| r.len() != ncols) {
        return Err(PyValueError::new_err("all rows must have the same length"));
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    let nrows = if ncols == 0 { 0 } else { flat.len() / ncols };
    let arr = Array2::from_shape_vec((nrows, ncols), flat)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(arr.to_pyarray(py).readonly())
}

/// Extract a sign pattern from any 2-D numeric input.
#[cfg(feature = "python-bindings")]
pub fn extract_sign_spec<'py>(py: Python<'py>, raw: &Bound<'py, PyAny>) -> PyResult<SignSpec> {
    let arr = extract_f64_matrix(py, raw)?;
    Ok(SignSpec::from_f64(arr.as_array())?)
}

#[cfg(feature = "python-bindings")]
pub fn extract_deterministic(det: Option<&str>) -> PyResult<Deterministic> {
    match det.unwrap_or("constant") {
        "none" => Ok(Deterministic::None),
        "constant" => Ok(Deterministic::Constant),
        "trend" => Ok(Deterministic::Trend),
        "quadratic" => Ok(Deterministic::QuadraticTrend),
        other => Err(PyValueError::new_err(format!(
            "deterministic must be one of 'none', 'constant', 'trend', 'quadratic'; got '{other}'"
        ))),
    }
}

/// Build validated sampler options from keyword arguments.
#[cfg(feature = "python-bindings")]
#[allow(clippy::too_many_arguments)]
pub fn build_sign_options(
    nsteps: Option<usize>, impact: Option<&str>, ndraws: Option<usize>, pctg: Option<f64>,
    sr_mod: Option<bool>, mult: Option<usize>, sr_hor: Option<usize>, sr_rot: Option<usize>,
    seed: Option<u64>,
) -> PyResult<SignOptions> {
    let defaults = SignOptions::default();
    let impact = match impact.unwrap_or("std") {
        "std" => ShockSize::OneStdDev,
        "unit" => ShockSize::Unit,
        other => {
            return Err(PyValueError::new_err(format!(
                "impact must be 'std' or 'unit'; got '{other}'"
            )));
        }
    };
    let var =
        VarOptions::new(nsteps.unwrap_or(defaults.var.nsteps), Identification::Sign, impact)?;
    Ok(SignOptions::new(
        var,
        ndraws.unwrap_or(defaults.ndraws),
        pctg.unwrap_or(defaults.pctg),
        sr_mod.unwrap_or(defaults.sr_mod),
        mult.unwrap_or(defaults.mult),
        sr_hor.unwrap_or(defaults.sr_hor),
        sr_rot.unwrap_or(defaults.sr_rot),
        seed.or(defaults.seed),
    )?)
}
