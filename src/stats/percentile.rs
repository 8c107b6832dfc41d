//! stats::percentile — empirical percentiles of Monte Carlo ensembles.
//!
//! Purpose
//! -------
//! Summarize accepted draws cell by cell: medians and percentile bands of
//! impulse responses and variance decompositions, and the elementwise
//! median impact matrix.
//!
//! Key behaviors
//! -------------
//! - [`percentile`] sorts a copy of the sample and places the `i`-th order
//!   statistic (1-based) at percentile `100 (i − 0.5) / n`. Requested levels
//!   between two order statistics are interpolated linearly; levels below
//!   the first or above the last are clamped to the minimum / maximum.
//! - [`percentile_axis`] and [`median_axis`] apply this along one axis of an
//!   n-dimensional array, removing that axis.
//!
//! Invariants & assumptions
//! ------------------------
//! - An empty sample yields `NaN`.
//! - NaNs are not filtered; they are ordered by `f64::total_cmp`, so a
//!   positive NaN sorts after `+∞` and a negative NaN before `−∞`.
use ndarray::{Array, ArrayView1, Axis, Dimension, RemoveAxis};

/// `pct`-th percentile (`pct` in `[0, 100]`) of `values`.
pub fn percentile(values: ArrayView1<'_, f64>, pct: f64) -> f64 {
    let n = values.len();
    if n == 0 {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    if n == 1 {
        return sorted[0];
    }

    // Fractional 0-based rank: sample i sits at 100 (i + 0.5) / n.
    let rank = pct / 100.0 * n as f64 - 0.5;
    if rank <= 0.0 {
        return sorted[0];
    }
    if rank >= (n - 1) as f64 {
        return sorted[n - 1];
    }
    let lo = rank.floor() as usize;
    let w = rank - lo as f64;
    sorted[lo] * (1.0 - w) + sorted[lo + 1] * w
}

/// Median of `values`; equal to `percentile(values, 50)`.
pub fn median(values: ArrayView1<'_, f64>) -> f64 {
    percentile(values, 50.0)
}

/// Percentile along `axis`, removing it from the result.
pub fn percentile_axis<D>(
    a: &Array<f64, D>, axis: Axis, pct: f64,
) -> Array<f64, <D as Dimension>::Smaller>
where
    D: RemoveAxis,
{
    a.map_axis(axis, |lane| percentile(lane, pct))
}

/// Median along `axis`, removing it from the result.
pub fn median_axis<D>(a: &Array<f64, D>, axis: Axis) -> Array<f64, <D as Dimension>::Smaller>
where
    D: RemoveAxis,
{
    percentile_axis(a, axis, 50.0)
}
