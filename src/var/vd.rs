//! var::vd — forecast-error variance decomposition.
//!
//! For horizon `h`, the share of variable `i`'s forecast-error variance
//! attributable to structural shock `s` is
//!
//! ```text
//! VD[h, i, s] = 100 · Σ_{k≤h} (Ψ_k b_s)_i² / Σ_{k≤h} (Ψ_k Σ Ψ_kᵀ)_{ii}
//! ```
//!
//! where `b_s` is column `s` of the impact matrix. Shares are in percent and
//! sum to 100 across shocks whenever `B Bᵀ = Σ`.
use crate::var::{errors::VarResult, ir::impact_matrix, model::VarModel, options::VarOptions};
use ndarray::{Array1, Array2, Array3, Axis};

/// Variance decomposition over `opts.nsteps` horizons, in percent.
///
/// The impact matrix is resolved exactly as in
/// [`impulse_response`](crate::var::ir::impulse_response); the shock-size
/// normalization does not apply because shares are scale free.
///
/// Errors
/// ------
/// - Propagates [`impact_matrix`] errors.
pub fn variance_decomposition(model: &VarModel, opts: &VarOptions) -> VarResult<Array3<f64>> {
    let b = impact_matrix(model, opts)?;
    let nvar = model.nvar;
    let psi = model.wold(opts.nsteps);

    let mut vd = Array3::<f64>::zeros((opts.nsteps, nvar, nvar));
    let mut mse_total = Array1::<f64>::zeros(nvar);
    let mut mse_shock = Array2::<f64>::zeros((nvar, nvar));
    for (h, psi_h) in psi.outer_iter().enumerate() {
        let total = psi_h.dot(&model.sigma).dot(&psi_h.t());
        mse_total += &total.diag();
        let resp = psi_h.dot(&b);
        mse_shock += &resp.mapv(|v| v * v);

        let mut share = vd.index_axis_mut(Axis(0), h);
        for i in 0..nvar {
            for s in 0..nvar {
                share[[i, s]] = 100.0 * mse_shock[[i, s]] / mse_total[i];
            }
        }
    }
    Ok(vd)
}
