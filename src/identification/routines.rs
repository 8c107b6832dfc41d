//! identification::routines — numerical collaborators of the sampler.
//!
//! Purpose
//! -------
//! Abstract the five per-draw operations the sign-restriction sampler
//! relies on behind one trait, so the sampler loop can be driven either by
//! the real numerical routines or by deterministic stand-ins in tests.
//!
//! Key behaviors
//! -------------
//! - [`VarRoutines`] takes `&mut self` everywhere so implementations may own
//!   mutable state (an RNG, call counters).
//! - [`SeededRoutines`] wires the trait to [`draw_posterior`],
//!   [`find_rotation`], [`impulse_response`], [`variance_decomposition`]
//!   and [`historical_decomposition`] with a single `StdRng`.
//!
//! Conventions
//! -----------
//! - A seeded [`SeededRoutines`] reproduces the full draw sequence; the
//!   sampler itself consumes no randomness.
use crate::{
    identification::{
        errors::SignResult, options::SignOptions, rotation::find_rotation, sign_spec::SignSpec,
    },
    var::{
        hd::{HistoricalDecomposition, historical_decomposition},
        ir::impulse_response,
        model::VarModel,
        options::VarOptions,
        posterior::{PosteriorDraw, draw_posterior},
        vd::variance_decomposition,
    },
};
use ndarray::{Array2, Array3};
use rand::{SeedableRng, rngs::StdRng};

/// VarRoutines — per-draw operations used by the sampler.
///
/// Required methods
/// ----------------
/// - `draw_posterior(model)`: sample `(Σ, F)` for the working copy.
/// - `find_rotation(sign, model, opts)`: impact matrix `B` satisfying `sign`.
/// - `impulse_response(model, opts)`: IR tensor plus the refined model.
/// - `variance_decomposition(model, opts)`: VD tensor in percent.
/// - `historical_decomposition(model, opts)`: HD record.
///
/// Any error aborts the sampler run.
pub trait VarRoutines {
    fn draw_posterior(&mut self, model: &VarModel) -> SignResult<PosteriorDraw>;

    fn find_rotation(
        &mut self, sign: &SignSpec, model: &VarModel, opts: &SignOptions,
    ) -> SignResult<Array2<f64>>;

    fn impulse_response(
        &mut self, model: &VarModel, opts: &VarOptions,
    ) -> SignResult<(Array3<f64>, VarModel)>;

    fn variance_decomposition(
        &mut self, model: &VarModel, opts: &VarOptions,
    ) -> SignResult<Array3<f64>>;

    fn historical_decomposition(
        &mut self, model: &VarModel, opts: &VarOptions,
    ) -> SignResult<HistoricalDecomposition>;
}

/// SeededRoutines — production [`VarRoutines`] backed by a `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededRoutines {
    rng: StdRng,
}

impl SeededRoutines {
    pub fn from_seed(seed: u64) -> Self {
        SeededRoutines { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        SeededRoutines { rng: StdRng::from_entropy() }
    }

    /// Seeded from `opts.seed`, or from entropy when it is `None`.
    pub fn from_options(opts: &SignOptions) -> Self {
        match opts.seed {
            Some(seed) => SeededRoutines::from_seed(seed),
            None => SeededRoutines::from_entropy(),
        }
    }
}

impl VarRoutines for SeededRoutines {
    fn draw_posterior(&mut self, model: &VarModel) -> SignResult<PosteriorDraw> {
        Ok(draw_posterior(model, &mut self.rng)?)
    }

    fn find_rotation(
        &mut self, sign: &SignSpec, model: &VarModel, opts: &SignOptions,
    ) -> SignResult<Array2<f64>> {
        find_rotation(sign, model, opts, &mut self.rng)
    }

    fn impulse_response(
        &mut self, model: &VarModel, opts: &VarOptions,
    ) -> SignResult<(Array3<f64>, VarModel)> {
        Ok(impulse_response(model, opts)?)
    }

    fn variance_decomposition(
        &mut self, model: &VarModel, opts: &VarOptions,
    ) -> SignResult<Array3<f64>> {
        Ok(variance_decomposition(model, opts)?)
    }

    fn historical_decomposition(
        &mut self, model: &VarModel, opts: &VarOptions,
    ) -> SignResult<HistoricalDecomposition> {
        Ok(historical_decomposition(model, opts)?)
    }
}
