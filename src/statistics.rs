//! Descriptive statistics of a value sample.

use std::fmt;
use log::debug;

/// Summary of a sample, recomputed from scratch by
/// [`Statistics::calculate`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Statistics {
    pub count: usize,
    pub minimum: f64,
    pub maximum: f64,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub standard_deviation: f64,
    pub sum: f64,
}

impl Statistics {
    /// Compute the statistics of `values`, sorting them in place.
    ///
    /// ```
    /// use color_classes::Statistics;
    /// let s = Statistics::of(&mut [4., 1., 3., 2.]);
    /// assert_eq!((s.count, s.median, s.mean), (4, 2.5, 2.5));
    /// ```
    pub fn of(values: &mut [f64]) -> Self {
        let mut s = Statistics::default();
        s.calculate(values);
        s
    }

    /// Reset every field to zero.
    pub fn clear(&mut self) { *self = Statistics::default() }

    /// Recompute from `values`, which are sorted in place.  An empty
    /// sample clears the statistics.
    pub fn calculate(&mut self, values: &mut [f64]) {
        if values.is_empty() {
            self.clear();
            return
        }
        values.sort_by(f64::total_cmp);
        let n = values.len();
        let (sum, sum_sq) = values.iter()
            .fold((0., 0.), |(s, s2), &v| (s + v, s2 + v * v));
        let mean = sum / n as f64;
        // The subtraction may go slightly negative through rounding.
        let variance = (sum_sq / n as f64 - mean * mean).max(0.);
        self.count = n;
        self.minimum = values[0];
        self.maximum = values[n - 1];
        self.sum = sum;
        self.mean = mean;
        self.median = if n % 2 == 0 { (values[n / 2 - 1] + values[n / 2]) / 2. }
                      else { values[n / 2] };
        self.standard_deviation = variance.sqrt();
    }

    /// Like [`Statistics::calculate`] but only the values in
    /// \[`min`, `max`\] are taken into account.  `values` is sorted in
    /// place as a whole.
    pub fn calculate_within(&mut self, values: &mut [f64], min: f64, max: f64) {
        values.sort_by(f64::total_cmp);
        let lo = values.partition_point(|&v| v < min);
        let hi = values.partition_point(|&v| v <= max);
        if lo >= hi {
            debug!("statistics: no value within [{}, {}]", min, max);
            self.clear();
            return
        }
        self.calculate(&mut values[lo .. hi]);
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "count: {}, min: {}, max: {}, mean: {:.3}, median: {}, \
                   std dev: {:.3}, sum: {}",
               self.count, self.minimum, self.maximum, self.mean,
               self.median, self.standard_deviation, self.sum)
    }
}
