//! identification::options — configuration for the sign-restriction sampler.
//!
//! Purpose
//! -------
//! Collect every knob of the Monte Carlo sampler in one validated struct:
//! the structural-VAR options shared with the IR/VD/HD routines, the number
//! of accepted draws, band coverage, parameter-uncertainty switch, progress
//! cadence, and the rotation-search settings.
//!
//! Key behaviors
//! -------------
//! - [`SignOptions::new`] validates every scalar field independently of the
//!   model; dimension checks against the model happen in the sampler.
//! - [`SignOptions::routine_options`] yields the [`VarOptions`] actually
//!   passed to the collaborators, with identification forced to `Sign`.
//!
//! Conventions
//! -----------
//! - `pctg` is a coverage in percent: `68` yields 16th/84th percentile bands.
use crate::{
    identification::errors::{SignError, SignResult},
    var::{
        errors::VarError,
        options::{Identification, VarOptions},
    },
};

/// SignOptions — settings for the sign-restriction sampler.
///
/// Fields
/// ------
/// - `var`: [`VarOptions`]
///   Horizon and shock size for IR/VD; the identification flag is
///   overridden to `Sign`.
/// - `ndraws`: `usize`
///   Number of accepted draws (≥ 1).
/// - `pctg`: `f64`
///   Band coverage in percent, in `(0, 100)`.
/// - `sr_mod`: `bool`
///   Draw `(Σ, F)` from the posterior before each rotation search.
/// - `mult`: `usize`
///   Report progress every `mult` accepted draws (≥ 1).
/// - `sr_hor`: `usize`
///   Number of horizons on which the signs are imposed, `1 ≤ sr_hor ≤ nsteps`.
/// - `sr_rot`: `usize`
///   Maximum candidate rotations per search (≥ 1).
/// - `seed`: `Option<u64>`
///   RNG seed; `None` seeds from system entropy.
#[derive(Debug, Clone, PartialEq)]
pub struct SignOptions {
    pub var: VarOptions,
    pub ndraws: usize,
    pub pctg: f64,
    pub sr_mod: bool,
    pub mult: usize,
    pub sr_hor: usize,
    pub sr_rot: usize,
    pub seed: Option<u64>,
}

impl SignOptions {
    /// Construct validated sampler options.
    ///
    /// Errors
    /// ------
    /// - `SignError::InvalidNdraws`, `InvalidPctg`, `InvalidMult`,
    ///   `InvalidRestrictionHorizon`, `InvalidRotationBudget` for the
    ///   corresponding out-of-range field.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        var: VarOptions, ndraws: usize, pctg: f64, sr_mod: bool, mult: usize, sr_hor: usize,
        sr_rot: usize, seed: Option<u64>,
    ) -> SignResult<SignOptions> {
        let opts = SignOptions { var, ndraws, pctg, sr_mod, mult, sr_hor, sr_rot, seed };
        opts.validate()?;
        Ok(opts)
    }

    /// Re-check every field; used by the sampler because fields are public.
    pub fn validate(&self) -> SignResult<()> {
        if self.ndraws == 0 {
            return Err(SignError::InvalidNdraws { ndraws: self.ndraws });
        }
        if !(self.pctg.is_finite() && self.pctg > 0.0 && self.pctg < 100.0) {
            return Err(SignError::InvalidPctg { pctg: self.pctg });
        }
        if self.mult == 0 {
            return Err(SignError::InvalidMult { mult: self.mult });
        }
        if self.var.nsteps == 0 {
            return Err(VarError::InvalidHorizon { nsteps: 0 }.into());
        }
        if self.sr_hor == 0 || self.sr_hor > self.var.nsteps {
            return Err(SignError::InvalidRestrictionHorizon {
                sr_hor: self.sr_hor,
                nsteps: self.var.nsteps,
            });
        }
        if self.sr_rot == 0 {
            return Err(SignError::InvalidRotationBudget { sr_rot: self.sr_rot });
        }
        Ok(())
    }

    /// Options handed to IR/VD/HD for each draw.
    pub fn routine_options(&self) -> VarOptions {
        self.var.with_ident(Identification::Sign)
    }

    /// Lower and upper percentile levels of the bands.
    pub fn band_levels(&self) -> (f64, f64) {
        let tail = (100.0 - self.pctg) / 2.0;
        (tail, 100.0 - tail)
    }
}

impl Default for SignOptions {
    fn default() -> Self {
        SignOptions {
            var: VarOptions::default(),
            ndraws: 500,
            pctg: 68.0,
            sr_mod: false,
            mult: 100,
            sr_hor: 1,
            sr_rot: 500,
            seed: Some(42),
        }
    }
}
