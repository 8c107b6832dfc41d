//! var::options — configuration for structural VAR routines.
//!
//! Purpose
//! -------
//! Bundle the settings shared by the impulse-response, variance- and
//! historical-decomposition routines: forecast horizon, identification
//! scheme and shock normalization.
//!
//! Key behaviors
//! -------------
//! - [`Identification`] selects how the impact matrix `B` is obtained.
//! - [`ShockSize`] selects whether impulses are one standard deviation or
//!   unit-normalized on impact.
//! - [`VarOptions::new`] validates the horizon; [`VarOptions::default`]
//!   provides the conventional 40-step, recursively identified setup.
//!
//! Conventions
//! -----------
//! - `nsteps` counts horizons including impact: horizon `0` is the impact
//!   period and the last stored horizon is `nsteps − 1`.
use crate::var::errors::{VarError, VarResult};

/// Identification scheme for the impact matrix `B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Identification {
    /// Recursive (short-run) identification: `B = chol(Σ)`, lower triangular.
    #[default]
    Short,
    /// Blanchard–Quah long-run identification: cumulative responses are
    /// lower triangular.
    Long,
    /// Use the impact matrix attached to the model (e.g. found by a
    /// sign-restriction search).
    Sign,
}

/// Normalization of the structural impulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShockSize {
    /// One-standard-deviation structural shock.
    #[default]
    OneStdDev,
    /// Shock scaled so that the shocked variable moves by one unit on impact.
    Unit,
}

/// VarOptions — settings for structural VAR routines.
///
/// Fields
/// ------
/// - `nsteps`: `usize`
///   Number of horizons (≥ 1) computed by IR and VD routines.
/// - `ident`: [`Identification`]
///   Scheme used to obtain `B`.
/// - `impact`: [`ShockSize`]
///   Impulse normalization for impulse responses.
///
/// Notes
/// -----
/// - Defaults: `nsteps = 40`, `ident = Short`, `impact = OneStdDev`.
#[derive(Debug, Clone, PartialEq)]
pub struct VarOptions {
    pub nsteps: usize,
    pub ident: Identification,
    pub impact: ShockSize,
}

impl VarOptions {
    /// Construct validated options.
    ///
    /// Errors
    /// ------
    /// - `VarError::InvalidHorizon` when `nsteps == 0`.
    pub fn new(nsteps: usize, ident: Identification, impact: ShockSize) -> VarResult<VarOptions> {
        if nsteps == 0 {
            return Err(VarError::InvalidHorizon { nsteps });
        }
        Ok(VarOptions { nsteps, ident, impact })
    }

    /// Copy of these options with a different identification scheme.
    pub fn with_ident(&self, ident: Identification) -> VarOptions {
        VarOptions { ident, ..self.clone() }
    }
}

impl Default for VarOptions {
    fn default() -> Self {
        VarOptions { nsteps: 40, ident: Identification::Short, impact: ShockSize::OneStdDev }
    }
}
