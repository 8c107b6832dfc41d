//! identification — sign-restricted structural identification of VARs.
//!
//! Purpose
//! -------
//! Identify structural shocks of an estimated reduced-form VAR by sign
//! restrictions on impulse responses, and summarize the resulting set of
//! admissible models by Monte Carlo simulation.
//!
//! Key behaviors
//! -------------
//! - [`SignSpec`] holds the validated `nvar × nshocks` sign pattern.
//! - [`SignOptions`] configures horizons, number of draws, band coverage,
//!   parameter uncertainty, progress cadence and the rotation search.
//! - [`find_rotation`] searches Haar-distributed rotations of `chol(Σ)` for
//!   an impact matrix that satisfies the pattern.
//! - [`run`] drives the Monte Carlo loop through a [`VarRoutines`]
//!   implementation and reports progress to a [`ProgressObserver`],
//!   returning a [`SignOutcome`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Arguments are validated before the first draw; any later failure aborts
//!   the run with a [`SignError`].
//! - Randomness is owned by the routines ([`SeededRoutines`]); the sampler is
//!   deterministic given its routines.
//!
//! Conventions
//! -----------
//! - Ensemble arrays carry the draw index on their trailing axis.
//! - Progress lines are `Rotation: k / ndraws` and `-- Done!`, logged at info
//!   level by [`SlogProgress`].
//!
//! Downstream usage
//! ----------------
//! - Typical flow:
//!   1. Estimate a [`VarModel`](crate::var::VarModel).
//!   2. Build a [`SignSpec`] and [`SignOptions`].
//!   3. Call [`SignOutcome::sign_restrictions`], or [`run`] with custom
//!      routines / observers.
//!
//! Testing notes
//! -------------
//! - [`rotation`] tests cover Haar orthogonality, the strict sign check and
//!   budget exhaustion.
//! - [`sampler`] tests drive the loop with scripted routines to pin down
//!   storage order, medians, tie-breaking of `sel`, bands, progress cadence
//!   and fail-fast validation, plus a seeded end-to-end scenario.
pub mod errors;
pub mod options;
pub mod progress;
pub mod rotation;
pub mod routines;
pub mod sampler;
pub mod sign_spec;
pub mod summary;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{SignError, SignResult};
pub use self::options::SignOptions;
pub use self::progress::{ProgressObserver, SilentProgress, SlogProgress};
pub use self::rotation::{find_rotation, haar_orthogonal, satisfies_signs};
pub use self::routines::{SeededRoutines, VarRoutines};
pub use self::sampler::run;
pub use self::sign_spec::SignSpec;
pub use self::summary::{HdEnsemble, SignOutcome};

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use rust_svar::identification::prelude::*;

pub mod prelude {
    pub use super::{
        HdEnsemble, ProgressObserver, SeededRoutines, SignError, SignOptions, SignOutcome,
        SignResult, SignSpec, SilentProgress, SlogProgress, VarRoutines, run,
    };
    pub use crate::var::{
        Deterministic, Identification, ShockSize, VarError, VarModel, VarOptions, VarResult,
    };
}
