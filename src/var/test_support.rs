//! Shared fixtures for unit tests under `var` and `identification`.
use crate::var::model::{Deterministic, VarModel};
use ndarray::{Array1, Array2, array};

/// Deterministic pseudo-noise in [-0.5, 0.5) from a linear congruential map.
pub(crate) fn lcg_noise(n: usize, seed: u64) -> Array1<f64> {
    let mut state = seed;
    Array1::from_iter((0..n).map(|_| {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((state >> 11) as f64 / (1u64 << 53) as f64) - 0.5
    }))
}

/// Bivariate VAR(1) with intercept driven by correlated pseudo-noise.
pub(crate) fn simulate_var1(n: usize) -> Array2<f64> {
    let a = array![[0.5, 0.1], [0.2, 0.3]];
    let c = array![1.0, -0.5];
    let e1 = lcg_noise(n, 7);
    let e2 = lcg_noise(n, 11);
    let mut y = Array2::<f64>::zeros((n, 2));
    for t in 1..n {
        let prev = y.row(t - 1).to_owned();
        let shock = array![e1[t], 0.5 * e1[t] + e2[t]];
        let next = &c + &a.dot(&prev) + &shock;
        y.row_mut(t).assign(&next);
    }
    y
}

/// OLS fit of [`simulate_var1`] data.
pub(crate) fn estimated_var(n: usize, nlag: usize, deterministic: Deterministic) -> VarModel {
    let endo = simulate_var1(n);
    VarModel::estimate(endo.view(), nlag, deterministic, None, 0)
        .expect("simulated VAR should estimate")
}

/// Hand-built VAR(2) with a constant; only `ft` and `sigma` are meaningful.
pub(crate) fn var2_fixture() -> VarModel {
    let nvar = 2;
    let nobs = 10;
    let ft = array![
        [0.1, 0.2],  // const
        [0.5, 0.1],  // y1_{t-1}
        [0.0, 0.4],  // y2_{t-1}
        [0.2, 0.0],  // y1_{t-2}
        [0.1, -0.1]  // y2_{t-2}
    ];
    VarModel {
        nvar,
        nvar_ex: 0,
        nobs,
        nlag: 2,
        nlag_ex: 0,
        deterministic: Deterministic::Constant,
        ntotcoeff: 5,
        ft,
        sigma: array![[1.0, 0.3], [0.3, 0.5]],
        resid: Array2::zeros((nobs, nvar)),
        x: Array2::zeros((nobs, 5)),
        y: Array2::zeros((nobs, nvar)),
        b: None,
    }
}
