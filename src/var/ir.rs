//! var::ir — structural impulse responses.
//!
//! Purpose
//! -------
//! Compute the response of every variable to every structural shock over a
//! finite horizon, given a reduced-form [`VarModel`] and an identification
//! scheme.
//!
//! Key behaviors
//! -------------
//! - Resolve the impact matrix `B` from [`VarOptions::ident`]: Cholesky of
//!   `Σ` (short run), Blanchard–Quah (long run), or the matrix already
//!   attached to the model (sign restrictions).
//! - Propagate impulses through the Wold multipliers:
//!   `IR[h, i, s] = (Ψ_h B)[i, s] · scale_s`.
//! - Return the model with `b` populated so downstream routines (VD, HD) use
//!   the same impact matrix.
//!
//! Invariants & assumptions
//! ------------------------
//! - The output tensor has shape `nsteps × nvar × nvar` (horizon, variable,
//!   shock).
//! - For `ShockSize::Unit`, `scale_s = 1 / B[s, s]`; a zero diagonal entry
//!   is reported as [`VarError::ZeroImpactDiagonal`].
use crate::var::{
    errors::{VarError, VarResult},
    linalg::{cholesky_lower, inverse},
    model::VarModel,
    options::{Identification, ShockSize, VarOptions},
};
use ndarray::{Array2, Array3, Axis};

/// Impact matrix implied by `opts.ident`.
///
/// Errors
/// ------
/// - `VarError::NotPositiveDefinite` if `Σ` (or the long-run covariance) has
///   no Cholesky factor.
/// - `VarError::SingularMatrix` if `I − A(1)` is singular (long run).
/// - `VarError::MissingRotation` for `Identification::Sign` without `b`.
pub fn impact_matrix(model: &VarModel, opts: &VarOptions) -> VarResult<Array2<f64>> {
    match opts.ident {
        Identification::Short => model.chol_sigma(),
        Identification::Long => {
            let nvar = model.nvar;
            let finf = inverse(
                (Array2::<f64>::eye(nvar) - model.lag_polynomial_at_one()).view(),
                "I - A(1)",
            )?;
            let lr_cov = finf.dot(&model.sigma).dot(&finf.t());
            let d = cholesky_lower(lr_cov.view(), "long-run covariance")?;
            let finf_inv = inverse(finf.view(), "long-run multiplier")?;
            Ok(finf_inv.dot(&d))
        }
        Identification::Sign => model.b.clone().ok_or(VarError::MissingRotation),
    }
}

/// Structural impulse responses over `opts.nsteps` horizons.
///
/// Parameters
/// ----------
/// - `model`: `&VarModel`
///   Fitted reduced-form model. For `Identification::Sign` it must carry `b`.
/// - `opts`: `&VarOptions`
///   Horizon, identification and shock size.
///
/// Returns
/// -------
/// `VarResult<(Array3<f64>, VarModel)>`
///   The `nsteps × nvar × nvar` response tensor and a copy of `model` with
///   `b` set to the impact matrix that generated it.
///
/// Errors
/// ------
/// - Propagates [`impact_matrix`] errors.
/// - `VarError::ZeroImpactDiagonal` for unit shocks on a zero diagonal.
pub fn impulse_response(model: &VarModel, opts: &VarOptions) -> VarResult<(Array3<f64>, VarModel)> {
    let b = impact_matrix(model, opts)?;
    let nvar = model.nvar;

    let scale: Vec<f64> = match opts.impact {
        ShockSize::OneStdDev => vec![1.0; nvar],
        ShockSize::Unit => (0..nvar)
            .map(|s| {
                let d = b[[s, s]];
                if d == 0.0 { Err(VarError::ZeroImpactDiagonal { shock: s }) } else { Ok(1.0 / d) }
            })
            .collect::<VarResult<Vec<f64>>>()?,
    };

    let psi = model.wold(opts.nsteps);
    let mut ir = Array3::<f64>::zeros((opts.nsteps, nvar, nvar));
    for (h, psi_h) in psi.outer_iter().enumerate() {
        let mut resp = psi_h.dot(&b);
        for (s, mut col) in resp.axis_iter_mut(Axis(1)).enumerate() {
            col *= scale[s];
        }
        ir.index_axis_mut(Axis(0), h).assign(&resp);
    }

    Ok((ir, model.with_rotation(b)))
}
