//! var::errors — error type for reduced-form VAR routines.
//!
//! Purpose
//! -------
//! Provide a single error enum, [`VarError`], and the result alias
//! [`VarResult`] for everything under `var`: OLS estimation, companion-form
//! algebra, posterior draws, and the IR / VD / HD routines.
//!
//! Conventions
//! -----------
//! - Variants carry the offending dimension or value so messages are
//!   self-contained.
//! - Linear-algebra breakdowns (non-positive-definite covariance, singular
//!   regressor cross-products) are reported as errors, never as panics.
//! - Distribution construction failures from `statrs` are normalized to
//!   [`VarError::Distribution`] with the backend message.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for reduced-form VAR routines.
pub type VarResult<T> = Result<T, VarError>;

/// Unified error type for the reduced-form VAR layer.
#[derive(Debug, Clone, PartialEq)]
pub enum VarError {
    // ---- Input/data validation ----
    /// Endogenous data has no columns or no rows.
    EmptyData,

    /// A data point is NaN/±inf.
    NonFiniteData { row: usize, col: usize, value: f64 },

    /// Exogenous data must have the same number of rows as the endogenous data.
    ExogenousLengthMismatch { endo: usize, exo: usize },

    /// Lag order must be ≥ 1.
    InvalidLagOrder { nlag: usize },

    /// Exogenous lag order may not exceed the endogenous lag order.
    InvalidExogenousLagOrder { nlag_ex: usize, nlag: usize },

    /// Effective sample too short for the number of regressors.
    InsufficientObservations { nobs: usize, ntotcoeff: usize },

    // ---- Model structure ----
    /// A stored array does not have the shape implied by the model dimensions.
    ShapeMismatch { what: &'static str, expected: (usize, usize), actual: (usize, usize) },

    /// Model dimension must be strictly positive.
    InvalidDimension { what: &'static str, value: usize },

    // ---- Options ----
    /// Impulse-response horizon must be ≥ 1.
    InvalidHorizon { nsteps: usize },

    /// Sign identification requested but the model carries no rotation matrix.
    MissingRotation,

    /// Unit-size shocks require a non-zero diagonal in the impact matrix.
    ZeroImpactDiagonal { shock: usize },

    // ---- Linear algebra ----
    /// Cholesky factorization failed; matrix is not positive definite.
    NotPositiveDefinite { what: &'static str },

    /// Matrix inversion failed.
    SingularMatrix { what: &'static str },

    // ---- Posterior sampling ----
    /// Posterior degrees of freedom must be at least the number of variables.
    InsufficientDegreesOfFreedom { df: usize, nvar: usize },

    /// Wrapper for `statrs` distribution construction errors.
    Distribution(String),
}

impl std::error::Error for VarError {}

impl std::fmt::Display for VarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            VarError::EmptyData => write!(f, "Endogenous data is empty."),
            VarError::NonFiniteData { row, col, value } => {
                write!(f, "Data point at ({row}, {col}) is non-finite: {value}")
            }
            VarError::ExogenousLengthMismatch { endo, exo } => write!(
                f,
                "Exogenous data has {exo} rows but endogenous data has {endo} rows."
            ),
            VarError::InvalidLagOrder { nlag } => {
                write!(f, "Lag order must be >= 1; got: {nlag}.")
            }
            VarError::InvalidExogenousLagOrder { nlag_ex, nlag } => write!(
                f,
                "Exogenous lag order ({nlag_ex}) may not exceed endogenous lag order ({nlag})."
            ),
            VarError::InsufficientObservations { nobs, ntotcoeff } => write!(
                f,
                "Effective sample ({nobs}) must exceed the number of coefficients per equation ({ntotcoeff})."
            ),
            // ---- Model structure ----
            VarError::ShapeMismatch { what, expected, actual } => write!(
                f,
                "{what} has shape {actual:?}; expected {expected:?}."
            ),
            VarError::InvalidDimension { what, value } => {
                write!(f, "{what} must be > 0; got: {value}.")
            }
            // ---- Options ----
            VarError::InvalidHorizon { nsteps } => {
                write!(f, "Horizon nsteps must be >= 1; got: {nsteps}.")
            }
            VarError::MissingRotation => {
                write!(f, "Sign identification requires a rotation matrix B on the model.")
            }
            VarError::ZeroImpactDiagonal { shock } => {
                write!(f, "Impact matrix has a zero diagonal entry for shock {shock}.")
            }
            // ---- Linear algebra ----
            VarError::NotPositiveDefinite { what } => {
                write!(f, "{what} is not positive definite.")
            }
            VarError::SingularMatrix { what } => write!(f, "{what} is singular."),
            // ---- Posterior sampling ----
            VarError::InsufficientDegreesOfFreedom { df, nvar } => write!(
                f,
                "Posterior degrees of freedom ({df}) must be at least the number of variables ({nvar})."
            ),
            VarError::Distribution(msg) => write!(f, "Distribution error: {msg}"),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<VarError> for PyErr {
    fn from(err: VarError) -> PyErr {
        PyValueError::new_err(format!("VarError: {err}"))
    }
}
