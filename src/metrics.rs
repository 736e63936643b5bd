//! Per-run coverage metrics and their aggregation across repeated attempts.

use std::fmt;

/// Attempt (1-based iteration count) at which a cover run first reached
/// each coverage threshold.
///
/// Every field is monotone in attempt progress: `covered_50 <= covered_90
/// <= covered_95 <= covered_99 <= covered_100`, since later thresholds can
/// only be crossed at or after earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Metrics {
    pub covered_50: usize,
    pub covered_90: usize,
    pub covered_95: usize,
    pub covered_99: usize,
    pub covered_100: usize,
}

/// Minimum, maximum, and arithmetic mean of one [`Metrics`] field across a
/// batch of attempts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxAvg {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl MinMaxAvg {
    fn of(values: impl Iterator<Item = usize> + Clone) -> Self {
        let min = values.clone().min().unwrap_or(0) as f64;
        let max = values.clone().max().unwrap_or(0) as f64;
        let count = values.clone().count().max(1) as f64;
        let sum: usize = values.sum();
        Self { min, max, avg: sum as f64 / count }
    }
}

/// [`MinMaxAvg`] summaries of each threshold field across a batch of
/// [`Metrics`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanMetrics {
    pub covered_50: MinMaxAvg,
    pub covered_90: MinMaxAvg,
    pub covered_95: MinMaxAvg,
    pub covered_99: MinMaxAvg,
    pub covered_100: MinMaxAvg,
}

/// Reduces a batch of per-attempt [`Metrics`] into min/max/avg per
/// threshold.
///
/// # Panics
/// Panics if `metrics` is empty.
pub fn compute_mean_metrics(metrics: &[Metrics]) -> MeanMetrics {
    assert!(!metrics.is_empty(), "compute_mean_metrics requires at least one sample");

    MeanMetrics {
        covered_50: MinMaxAvg::of(metrics.iter().map(|m| m.covered_50)),
        covered_90: MinMaxAvg::of(metrics.iter().map(|m| m.covered_90)),
        covered_95: MinMaxAvg::of(metrics.iter().map(|m| m.covered_95)),
        covered_99: MinMaxAvg::of(metrics.iter().map(|m| m.covered_99)),
        covered_100: MinMaxAvg::of(metrics.iter().map(|m| m.covered_100)),
    }
}

impl fmt::Display for MeanMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "50%:  {}/{}/{}", self.covered_50.min, self.covered_50.max, self.covered_50.avg)?;
        writeln!(f, "90%:  {}/{}/{}", self.covered_90.min, self.covered_90.max, self.covered_90.avg)?;
        writeln!(f, "95%:  {}/{}/{}", self.covered_95.min, self.covered_95.max, self.covered_95.avg)?;
        writeln!(f, "99%:  {}/{}/{}", self.covered_99.min, self.covered_99.max, self.covered_99.avg)?;
        write!(f, "100%: {}/{}/{}", self.covered_100.min, self.covered_100.max, self.covered_100.avg)
    }
}

/// Tracks vertex coverage thresholds across repeated cover attempts,
/// recording the 1-based iteration at which each threshold is first
/// crossed (matching the original `Cover.cc`'s `res.covered_50 =
/// iterations;`, not the vertex count itself).
///
/// Crossing rules compare the distinct-vertex count `v` reached so far
/// (out of `n` total vertices) against the integer thresholds used by the
/// original cover loop: `50%` at `2*v >= n`, `90%` at `10*v >= 9*n`, `95%`
/// at `20*v >= 19*n`, `99%` at `100*v >= 99*n`, `100%` at `v == n`.
#[derive(Debug)]
pub(crate) struct ThresholdTracker {
    n: usize,
    metrics: Metrics,
    crossed_50: bool,
    crossed_90: bool,
    crossed_95: bool,
    crossed_99: bool,
    crossed_100: bool,
}

/// A threshold newly crossed by [`ThresholdTracker::record`], used to drive
/// the stdout progress-tick side channel.
pub(crate) enum Crossing {
    Fifty,
    Ninety,
    NinetyFive,
    NinetyNine,
    Hundred,
}

impl ThresholdTracker {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            n,
            metrics: Metrics::default(),
            crossed_50: false,
            crossed_90: false,
            crossed_95: false,
            crossed_99: false,
            crossed_100: false,
        }
    }

    /// Call once per completed attempt, with `iteration` the 1-based
    /// attempt count so far and `covered` the total distinct-vertex count
    /// reached so far (after folding in this attempt's path). Returns any
    /// thresholds newly crossed, in ascending order; each crossing stores
    /// `iteration`, not `covered`, into the corresponding `Metrics` field.
    pub(crate) fn record(&mut self, iteration: usize, covered: usize) -> Vec<Crossing> {
        let n = self.n;
        let v = covered;
        let mut crossed = Vec::new();

        if !self.crossed_50 && 2 * v >= n {
            self.crossed_50 = true;
            self.metrics.covered_50 = iteration;
            crossed.push(Crossing::Fifty);
        }
        if !self.crossed_90 && 10 * v >= 9 * n {
            self.crossed_90 = true;
            self.metrics.covered_90 = iteration;
            crossed.push(Crossing::Ninety);
        }
        if !self.crossed_95 && 20 * v >= 19 * n {
            self.crossed_95 = true;
            self.metrics.covered_95 = iteration;
            crossed.push(Crossing::NinetyFive);
        }
        if !self.crossed_99 && 100 * v >= 99 * n {
            self.crossed_99 = true;
            self.metrics.covered_99 = iteration;
            crossed.push(Crossing::NinetyNine);
        }
        if !self.crossed_100 && v == n {
            self.crossed_100 = true;
            self.metrics.covered_100 = iteration;
            crossed.push(Crossing::Hundred);
        }

        crossed
    }

    pub(crate) fn into_metrics(self) -> Metrics {
        self.metrics
    }
}
