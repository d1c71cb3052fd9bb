//! A value range with a legend text, the building block of schemes.

use std::fmt;
use log::debug;
use crate::{EditorSettings, IntervalSnapMethod, Range};

/// Round `value` to `digits` significant figures.  Zero and
/// non-finite values are returned unchanged, and so is every value
/// when `digits` exceeds the precision of `f64`.
///
/// ```
/// use color_classes::category::sig_fig;
/// assert_eq!(sig_fig(123456., 2), 120000.);
/// assert_eq!(sig_fig(-4567., 1), -5000.);
/// assert_eq!(sig_fig(0., 3), 0.);
/// ```
pub fn sig_fig(value: f64, digits: u32) -> f64 {
    if value == 0. || !value.is_finite() || digits >= MAX_DIGITS {
        return value
    }
    let order = value.abs().log10().ceil() as i32;
    let norm = 10f64.powi(order - digits as i32);
    if norm == 0. || !norm.is_finite() { return value }
    let snapped = norm * (value / norm).round();
    if snapped.is_finite() { snapped } else { value }
}

/// Significant digits beyond which an `f64` cannot be rounded.
pub(crate) const MAX_DIGITS: u32 = 17;

/// Round `value` to `digits` decimal places, halves away from zero.
/// Values that cannot be scaled by `10^digits` are returned unchanged.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let p = 10f64.powi(digits.min(i32::MAX as u32) as i32);
    let scaled = value * p;
    if !scaled.is_finite() { return value }
    scaled.round() / p
}

/// The element of `values` closest to `value`, the first one in case
/// of ties.  `None` when `values` is empty.
pub fn nearest_value(value: f64, values: &[f64]) -> Option<f64> {
    values.iter().copied()
        .min_by(|a, b| (a - value).abs().total_cmp(&(b - value).abs()))
}

/// A named range of values.
///
/// The bounds accessors are shortcuts to the owned [`Range`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Category {
    range: Range,
    /// Free text describing the state of the category.
    pub status: String,
    /// User data, never interpreted.
    pub tag: Option<String>,
    /// Text shown in legends.  Empty means “use the range”.
    pub legend_text: String,
    /// Attribute filter selecting the values of this category.
    pub filter_expression: Option<String>,
}

impl Category {
    pub fn new(range: Range) -> Self {
        Category { range, ..Default::default() }
    }

    /// Category for the values in ]`min`, `max`].
    pub fn from_bounds(min: impl Into<Option<f64>>,
                       max: impl Into<Option<f64>>) -> Self {
        Category::new(Range::new(min, max))
    }

    pub fn range(&self) -> &Range { &self.range }

    pub fn range_mut(&mut self) -> &mut Range { &mut self.range }

    pub fn set_range(&mut self, range: Range) { self.range = range }

    pub fn minimum(&self) -> Option<f64> { self.range.minimum() }

    pub fn maximum(&self) -> Option<f64> { self.range.maximum() }

    pub fn set_minimum(&mut self, v: impl Into<Option<f64>>) {
        self.range.set_minimum(v)
    }

    pub fn set_maximum(&mut self, v: impl Into<Option<f64>>) {
        self.range.set_maximum(v)
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool { self.range.contains(value) }

    /// Move the bounds to “nicer” values.  With
    /// [`IntervalSnapMethod::DataValue`] each bound becomes the closest
    /// value of `sample` (nothing happens for an empty sample).
    ///
    /// ```
    /// use color_classes::{Category, IntervalSnapMethod};
    /// let mut c = Category::from_bounds(1.04, 7.9);
    /// c.apply_snapping(IntervalSnapMethod::DataValue, 0, &[1., 5., 8.]);
    /// assert_eq!((c.minimum(), c.maximum()), (Some(1.), Some(8.)));
    /// ```
    pub fn apply_snapping(&mut self, method: IntervalSnapMethod, digits: u32,
                          sample: &[f64]) {
        use IntervalSnapMethod::*;
        let snap = |v: f64| match method {
            None => v,
            SignificantFigures => sig_fig(v, digits),
            Rounding => round_to(v, digits),
            DataValue => nearest_value(v, sample).unwrap_or(v),
        };
        let (min, max) = (self.minimum().map(snap), self.maximum().map(snap));
        if (min, max) != (self.minimum(), self.maximum()) {
            debug!("snapping {} ({:?}, {} digits) to {:?} - {:?}",
                   self.range, method, digits, min, max);
        }
        self.range.set_bounds(min, max);
    }

    /// Set the legend text from the range, written with the snap
    /// method and number of digits of `settings`.
    pub fn apply_min_max(&mut self, settings: &EditorSettings) {
        self.legend_text = self.range.to_string_with(
            settings.interval_snap_method, settings.interval_rounding_digits);
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.legend_text.is_empty() { write!(f, "{}", self.range) }
        else { f.write_str(&self.legend_text) }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use IntervalSnapMethod::*;

    #[test]
    fn significant_figures() {
        assert_eq!(sig_fig(1234.5, 3), 1230.);
        assert_eq!(sig_fig(-1234.5, 2), -1200.);
        assert_eq!(sig_fig(1000., 1), 1000.);
        assert!(sig_fig(f64::NAN, 2).is_nan());
        assert_eq!(sig_fig(f64::INFINITY, 2), f64::INFINITY);
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(2.5, 0), 3.);
        assert_eq!(round_to(-2.5, 0), -3.);
        assert_eq!(round_to(1.23456, 2), 1.23);
    }

    #[test]
    fn nearest() {
        assert_eq!(nearest_value(4.6, &[1., 4., 5., 9.]), Some(5.));
        assert_eq!(nearest_value(4.5, &[4., 5.]), Some(4.));
        assert_eq!(nearest_value(4.5, &[]), Option::None);
    }

    #[test]
    fn snapping_methods() {
        let mut c = Category::from_bounds(12.345, 67.891);
        c.apply_snapping(None, 2, &[]);
        assert_eq!((c.minimum(), c.maximum()), (Some(12.345), Some(67.891)));
        c.apply_snapping(Rounding, 1, &[]);
        assert_eq!((c.minimum(), c.maximum()), (Some(12.3), Some(67.9)));
        c.apply_snapping(SignificantFigures, 1, &[]);
        assert_eq!((c.minimum(), c.maximum()), (Some(10.), Some(70.)));
        c.apply_snapping(DataValue, 0, &[]);
        assert_eq!((c.minimum(), c.maximum()), (Some(10.), Some(70.)));
    }

    #[test]
    fn excessive_digits_keep_bounds() {
        assert_eq!(sig_fig(5., 400), 5.);
        assert_eq!(sig_fig(1e-300, 40), 1e-300);
        assert_eq!(round_to(1.5, 400), 1.5);
        assert_eq!(round_to(1e300, 20), 1e300);
        let mut c = Category::from_bounds(5., 8.);
        c.apply_snapping(SignificantFigures, 400, &[]);
        assert_eq!((c.minimum(), c.maximum()), (Some(5.), Some(8.)));
        c.apply_snapping(Rounding, 400, &[]);
        assert_eq!((c.minimum(), c.maximum()), (Some(5.), Some(8.)));
        assert!(c.contains(6.));
    }

    #[test]
    fn snapping_zero_bound() {
        let mut c = Category::from_bounds(0., 8.76);
        c.apply_snapping(SignificantFigures, 2, &[]);
        assert_eq!((c.minimum(), c.maximum()), (Some(0.), Some(8.8)));
    }

    #[test]
    fn open_bounds_stay_open() {
        let mut c = Category::from_bounds(Option::None, 3.3);
        c.apply_snapping(DataValue, 0, &[3., 4.]);
        assert_eq!((c.minimum(), c.maximum()), (Option::None, Some(3.)));
    }

    #[test]
    fn bounds_proxy_the_range() {
        let mut c = Category::default();
        assert!(c.range().is_unbounded());
        c.set_maximum(5.);
        c.set_minimum(9.);
        assert_eq!((c.minimum(), c.maximum()), (Some(5.), Some(9.)));
        assert!(c.contains(9.));
    }

    #[test]
    fn legend_text() {
        let mut c = Category::from_bounds(1.234, 5.678);
        assert_eq!(c.to_string(), "1.234 - 5.678");
        let settings = EditorSettings {
            interval_snap_method: Rounding,
            interval_rounding_digits: 1,
            ..Default::default()
        };
        c.apply_min_max(&settings);
        assert_eq!(c.legend_text, "1.2 - 5.7");
        assert_eq!(c.to_string(), "1.2 - 5.7");
    }
}
