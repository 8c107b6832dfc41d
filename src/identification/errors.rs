//! identification::errors — error type for the sign-restriction layer.
//!
//! Purpose
//! -------
//! Provide [`SignError`] and the alias [`SignResult`] for sign-spec
//! construction, sampler options, the rotation search and the Monte Carlo
//! sampler itself.
//!
//! Key behaviors
//! -------------
//! - Argument errors (`InvalidSign*`, `Invalid*` option variants,
//!   `DimensionMismatch`) are raised before any draw is attempted.
//! - Numerical failures from the reduced-form layer are wrapped unchanged in
//!   [`SignError::Var`] via `From<VarError>`, so `?` propagates them.
//! - An unsuccessful rotation search is reported as
//!   [`SignError::RotationSearchExhausted`]; the sampler never retries it.
//!
//! Conventions
//! -----------
//! - Every failure aborts the whole run; there is no partial-result variant.
use crate::var::errors::VarError;
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for the sign-restriction layer.
pub type SignResult<T> = Result<T, SignError>;

/// Unified error type for sign-restriction identification.
#[derive(Debug, Clone, PartialEq)]
pub enum SignError {
    // ---- Sign specification ----
    /// Sign matrix must have `nvar` rows and between 1 and `nvar` columns.
    InvalidSignShape { rows: usize, cols: usize },

    /// Sign entries must be −1, 0 or +1.
    InvalidSignValue { row: usize, col: usize, value: f64 },

    // ---- Options ----
    /// Number of accepted draws must be ≥ 1.
    InvalidNdraws { ndraws: usize },

    /// Band coverage must lie strictly between 0 and 100.
    InvalidPctg { pctg: f64 },

    /// Progress interval must be ≥ 1.
    InvalidMult { mult: usize },

    /// Restricted horizons must satisfy 1 ≤ sr_hor ≤ nsteps.
    InvalidRestrictionHorizon { sr_hor: usize, nsteps: usize },

    /// Rotation search budget must be ≥ 1.
    InvalidRotationBudget { sr_rot: usize },

    // ---- Cross-argument checks ----
    /// Sign matrix rows disagree with the number of model variables.
    DimensionMismatch { nvar: usize, sign_rows: usize },

    // ---- Rotation search ----
    /// No candidate rotation satisfied the sign pattern within the budget.
    RotationSearchExhausted { attempts: usize },

    // ---- Sampler ----
    /// A routine returned an array whose shape disagrees with the ensemble.
    RoutineShape { what: &'static str, expected: Vec<usize>, actual: Vec<usize> },

    // ---- Propagated ----
    /// Failure inside a reduced-form VAR routine.
    Var(VarError),
}

impl std::error::Error for SignError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SignError::Var(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for SignError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Sign specification ----
            SignError::InvalidSignShape { rows, cols } => write!(
                f,
                "Sign matrix must be nvar x nshocks with 1 <= nshocks <= nvar; got {rows} x {cols}."
            ),
            SignError::InvalidSignValue { row, col, value } => write!(
                f,
                "Sign matrix entry at ({row}, {col}) must be -1, 0 or 1; got: {value}."
            ),
            // ---- Options ----
            SignError::InvalidNdraws { ndraws } => {
                write!(f, "Number of draws must be >= 1; got: {ndraws}.")
            }
            SignError::InvalidPctg { pctg } => {
                write!(f, "Band coverage pctg must be in (0, 100); got: {pctg}.")
            }
            SignError::InvalidMult { mult } => {
                write!(f, "Progress interval mult must be >= 1; got: {mult}.")
            }
            SignError::InvalidRestrictionHorizon { sr_hor, nsteps } => write!(
                f,
                "Restriction horizon sr_hor must be in [1, nsteps = {nsteps}]; got: {sr_hor}."
            ),
            SignError::InvalidRotationBudget { sr_rot } => {
                write!(f, "Rotation budget sr_rot must be >= 1; got: {sr_rot}.")
            }
            // ---- Cross-argument checks ----
            SignError::DimensionMismatch { nvar, sign_rows } => write!(
                f,
                "Sign matrix has {sign_rows} rows but the model has {nvar} variables."
            ),
            // ---- Rotation search ----
            SignError::RotationSearchExhausted { attempts } => write!(
                f,
                "No rotation satisfying the sign restrictions found after {attempts} attempts."
            ),
            // ---- Sampler ----
            SignError::RoutineShape { what, expected, actual } => write!(
                f,
                "{what} returned shape {actual:?}; expected {expected:?}."
            ),
            // ---- Propagated ----
            SignError::Var(err) => write!(f, "VAR routine failed: {err}"),
        }
    }
}

impl From<VarError> for SignError {
    fn from(err: VarError) -> SignError {
        SignError::Var(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<SignError> for PyErr {
    fn from(err: SignError) -> PyErr {
        PyValueError::new_err(format!("SignError: {err}"))
    }
}
