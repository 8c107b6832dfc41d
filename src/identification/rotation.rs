//! identification::rotation — search for sign-satisfying impact matrices.
//!
//! Purpose
//! -------
//! Turn a reduced-form covariance `Σ` into a structural impact matrix
//! `B = chol(Σ) Q` whose impulse responses satisfy a [`SignSpec`], by
//! rejection sampling over Haar-distributed orthogonal matrices `Q`.
//!
//! Key behaviors
//! -------------
//! - [`haar_orthogonal`] draws `Q` from the QR factorization of a standard
//!   normal matrix, normalizing `diag(R) > 0` so the draw is uniform on the
//!   orthogonal group.
//! - [`satisfies_signs`] checks one shock's responses against its column of
//!   the sign pattern.
//! - [`find_rotation`] tries up to `sr_rot` candidates. Each restricted
//!   column is accepted as drawn or with its sign flipped; a candidate
//!   passes only if every restricted column does.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every returned `B` satisfies `B Bᵀ = Σ` (column flips preserve it).
//! - Sign checks are strict: a restricted response equal to zero fails.
//! - Restrictions apply to horizons `0 .. sr_hor` of the responses as
//!   `impulse_response` reports them: `Ψ_h b_s` for one-standard-deviation
//!   shocks, `Ψ_h b_s / B[s, s]` for unit shocks. Unit responses do not
//!   change under a column flip, so only one-standard-deviation candidates
//!   are retried with `−b_s`; a zero `B[s, s]` rejects the candidate.
use crate::{
    identification::{
        errors::{SignError, SignResult},
        options::SignOptions,
        sign_spec::SignSpec,
    },
    var::{
        linalg::{to_array2, to_dmatrix},
        model::VarModel,
        options::ShockSize,
        posterior::standard_normal_matrix,
    },
};
use ndarray::{Array2, Array3, ArrayView1, ArrayView2, Axis};
use rand::Rng;

/// Haar-distributed `n × n` orthogonal matrix.
pub fn haar_orthogonal<R: Rng + ?Sized>(n: usize, rng: &mut R) -> SignResult<Array2<f64>> {
    let z = standard_normal_matrix(n, n, rng)?;
    let qr = to_dmatrix(z.view()).qr();
    let mut q = qr.q();
    let r = qr.r();
    for j in 0..n {
        if r[(j, j)] < 0.0 {
            q.column_mut(j).iter_mut().for_each(|v| *v = -*v);
        }
    }
    Ok(to_array2(&q))
}

/// Whether `responses` (`horizons × nvar`) obey column `shock` of `sign`.
///
/// Unrestricted entries (`0`) are ignored; restricted ones must have the
/// required sign strictly.
pub fn satisfies_signs(sign: &SignSpec, shock: usize, responses: ArrayView2<'_, f64>) -> bool {
    responses.outer_iter().all(|row| {
        row.iter().enumerate().all(|(i, &r)| match sign.get(i, shock) {
            0 => true,
            s => f64::from(s) * r > 0.0,
        })
    })
}

/// Responses `Ψ_h b` for every restricted horizon, as `horizons × nvar`.
fn column_responses(psi: &Array3<f64>, b: ArrayView1<'_, f64>) -> Array2<f64> {
    let mut out = Array2::<f64>::zeros((psi.len_of(Axis(0)), b.len()));
    for (h, psi_h) in psi.outer_iter().enumerate() {
        out.row_mut(h).assign(&psi_h.dot(&b));
    }
    out
}

/// Find an impact matrix whose responses satisfy `sign`.
///
/// Parameters
/// ----------
/// - `sign`: `&SignSpec`
///   `nvar × nshocks` pattern; shocks beyond `nshocks` are unrestricted.
/// - `model`: `&VarModel`
///   Working copy supplying `sigma` and the lag coefficients.
/// - `opts`: `&SignOptions`
///   Uses `sr_hor`, `sr_rot` and the shock size of `opts.var`.
/// - `rng`: `&mut R`
///   Source of the candidate rotations.
///
/// Returns
/// -------
/// `SignResult<Array2<f64>>`
///   `nvar × nvar` impact matrix `B` with `B Bᵀ = Σ`.
///
/// Errors
/// ------
/// - `SignError::DimensionMismatch` if `sign` does not have `nvar` rows.
/// - `SignError::Var(NotPositiveDefinite)` if `Σ` has no Cholesky factor.
/// - `SignError::RotationSearchExhausted` after `sr_rot` failed candidates.
pub fn find_rotation<R: Rng + ?Sized>(
    sign: &SignSpec, model: &VarModel, opts: &SignOptions, rng: &mut R,
) -> SignResult<Array2<f64>> {
    let nvar = model.nvar;
    if sign.nvar() != nvar {
        return Err(SignError::DimensionMismatch { nvar, sign_rows: sign.nvar() });
    }
    let p = model.chol_sigma()?;
    let psi = model.wold(opts.sr_hor);

    'candidates: for _ in 0..opts.sr_rot {
        let q = haar_orthogonal(nvar, rng)?;
        let mut b = p.dot(&q);
        for s in 0..sign.nshocks() {
            let resp = column_responses(&psi, b.column(s));
            let (resp, flippable) = match opts.var.impact {
                ShockSize::OneStdDev => (resp, true),
                ShockSize::Unit if b[[s, s]] != 0.0 => (resp / b[[s, s]], false),
                ShockSize::Unit => continue 'candidates,
            };
            if satisfies_signs(sign, s, resp.view()) {
                continue;
            }
            if flippable && satisfies_signs(sign, s, (-&resp).view()) {
                b.column_mut(s).mapv_inplace(|v| -v);
                continue;
            }
            continue 'candidates;
        }
        return Ok(b);
    }
    Err(SignError::RotationSearchExhausted { attempts: opts.sr_rot })
}
