//! stats — order statistics used to summarize Monte Carlo draws.
//!
//! Percentiles follow the midpoint convention: with `n` sorted values the
//! `i`-th sits at percentile `100 (i − 0.5) / n`, intermediate levels are
//! linearly interpolated, and levels outside the covered range clamp to the
//! extreme values.
pub mod percentile;

pub use self::percentile::{median, median_axis, percentile, percentile_axis};
