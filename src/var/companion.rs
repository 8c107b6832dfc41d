//! var::companion — lag blocks, companion matrix and Wold multipliers.
//!
//! Purpose
//! -------
//! Translate the stacked coefficient matrix `ft` of a [`VarModel`] into the
//! objects the structural routines need: the lag blocks `A₁ … A_p`, the
//! `(nvar·p) × (nvar·p)` companion matrix, and the reduced-form moving-average
//! (Wold) multipliers `Ψ₀ … Ψ_{H−1}`.
//!
//! Conventions
//! -----------
//! - `A_j[i, k]` is the coefficient of variable `k` at lag `j` in the
//!   equation of variable `i`.
//! - Wold multipliers obey `Ψ₀ = I` and `Ψ_h = Σ_{j=1}^{min(h,p)} Ψ_{h−j} A_j`;
//!   they are returned as a `H × nvar × nvar` tensor indexed by horizon
//!   first.
use crate::var::model::VarModel;
use ndarray::{Array2, Array3, Axis, s};

impl VarModel {
    /// Lag blocks `A₁ … A_p`, each `nvar × nvar`.
    pub fn lag_matrices(&self) -> Vec<Array2<f64>> {
        let f = self.ft.t();
        let (nvar, ndet) = (self.nvar, self.ndet());
        (0..self.nlag)
            .map(|j| {
                let start = ndet + j * nvar;
                f.slice(s![.., start..start + nvar]).to_owned()
            })
            .collect()
    }

    /// Companion matrix of the endogenous dynamics.
    ///
    /// The first block row holds `[A₁ … A_p]`; the sub-diagonal blocks are
    /// identities that shift the stacked state `[y_t, …, y_{t−p+1}]`.
    pub fn companion(&self) -> Array2<f64> {
        let (nvar, nlag) = (self.nvar, self.nlag);
        let dim = nvar * nlag;
        let mut fcomp = Array2::<f64>::zeros((dim, dim));
        for (j, a) in self.lag_matrices().iter().enumerate() {
            fcomp.slice_mut(s![..nvar, j * nvar..(j + 1) * nvar]).assign(a);
        }
        for k in nvar..dim {
            fcomp[[k, k - nvar]] = 1.0;
        }
        fcomp
    }

    /// Sum of lag blocks `A(1) = A₁ + … + A_p`.
    pub fn lag_polynomial_at_one(&self) -> Array2<f64> {
        self.lag_matrices().iter().fold(Array2::zeros((self.nvar, self.nvar)), |acc, a| acc + a)
    }

    /// Wold multipliers `Ψ₀ … Ψ_{nsteps−1}` as an `nsteps × nvar × nvar` tensor.
    pub fn wold(&self, nsteps: usize) -> Array3<f64> {
        let nvar = self.nvar;
        let lags = self.lag_matrices();
        let mut psi = Array3::<f64>::zeros((nsteps, nvar, nvar));
        if nsteps == 0 {
            return psi;
        }
        psi.index_axis_mut(Axis(0), 0).assign(&Array2::eye(nvar));
        for h in 1..nsteps {
            let mut acc = Array2::<f64>::zeros((nvar, nvar));
            for j in 1..=h.min(self.nlag) {
                acc = acc + psi.index_axis(Axis(0), h - j).dot(&lags[j - 1]);
            }
            psi.index_axis_mut(Axis(0), h).assign(&acc);
        }
        psi
    }
}
