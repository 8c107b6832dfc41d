//! var — reduced-form VAR estimation and structural analysis.
//!
//! Purpose
//! -------
//! Provide the numerical building blocks consumed by the sign-restriction
//! sampler: an OLS-estimated reduced-form VAR, its companion and Wold
//! representations, posterior parameter draws, and the three structural
//! summaries (impulse responses, variance decompositions, historical
//! decompositions).
//!
//! Key behaviors
//! -------------
//! - [`VarModel::estimate`] fits `y_t` on deterministic terms, `p` own lags
//!   and optional exogenous regressors.
//! - [`draw_posterior`] samples `(Σ, F)` from the diffuse
//!   Normal-inverse-Wishart posterior.
//! - [`impulse_response`], [`variance_decomposition`] and
//!   [`historical_decomposition`] compute structural summaries for the
//!   identification scheme in [`VarOptions`].
//!
//! Invariants & assumptions
//! ------------------------
//! - All routines take the model by shared reference; per-draw variants are
//!   produced with [`VarModel::with_draw`] / [`VarModel::with_rotation`].
//! - Failures are reported through [`VarResult`]; nothing in this subtree
//!   panics on user-facing input.
//!
//! Conventions
//! -----------
//! - Tensors are indexed horizon/time first, then variable, then shock.
//! - This module performs no I/O and no logging.
pub mod companion;
pub mod errors;
pub mod hd;
pub mod ir;
pub mod linalg;
pub mod model;
pub mod options;
pub mod posterior;
pub mod vd;

#[cfg(test)]
pub(crate) mod test_support;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{VarError, VarResult};
pub use self::hd::{HistoricalDecomposition, historical_decomposition};
pub use self::ir::{impact_matrix, impulse_response};
pub use self::model::{Deterministic, VarModel};
pub use self::options::{Identification, ShockSize, VarOptions};
pub use self::posterior::{PosteriorDraw, draw_posterior};
pub use self::vd::variance_decomposition;
