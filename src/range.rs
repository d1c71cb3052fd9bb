//! Numeric intervals with optional, inclusive or exclusive bounds.

use std::fmt;
use std::str::FromStr;
use log::debug;
use serde::Deserialize;
use crate::Error;

/// How a computed bound is snapped to a “nicer” value, and how bounds
/// are rendered as text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum IntervalSnapMethod {
    /// Leave the value as is.
    None,
    /// Round to a number of significant figures.
    SignificantFigures,
    /// Round to a number of decimal places.
    Rounding,
    /// Use the closest value of the data sample.
    #[default]
    DataValue,
}

/// Render `value` according to `method`.
///
/// `None` and `DataValue` write the value as is, `Rounding` writes
/// `digits` decimals and `SignificantFigures` writes `digits`
/// significant figures.
///
/// ```
/// use color_classes::{format_value, IntervalSnapMethod::*};
/// assert_eq!(format_value(3.14159, Rounding, 2), "3.14");
/// assert_eq!(format_value(1234.5, SignificantFigures, 2), "1200");
/// assert_eq!(format_value(0.012345, SignificantFigures, 3), "0.0123");
/// assert_eq!(format_value(2.5, None, 7), "2.5");
/// ```
pub fn format_value(value: f64, method: IntervalSnapMethod,
                    digits: u32) -> String {
    use IntervalSnapMethod::*;
    match method {
        None | DataValue => value.to_string(),
        Rounding => format!("{:.*}", digits as usize, value),
        SignificantFigures => {
            if value == 0. || !value.is_finite() { return value.to_string() }
            let order = value.abs().log10().ceil() as i32;
            let shown = digits.min(crate::category::MAX_DIGITS) as i32;
            let decimals = (shown - order).max(0) as usize;
            let snapped = crate::category::sig_fig(value, digits);
            format!("{:.*}", decimals, snapped)
        }
    }
}

/// A numeric interval.  A `None` bound leaves that side unbounded.
///
/// When both bounds are set, `minimum <= maximum` always holds: the
/// bounds are swapped if given in the wrong order.
///
/// By default the minimum is excluded and the maximum included, so
/// that consecutive ranges `a - b`, `b - c` do not overlap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    minimum: Option<f64>,
    maximum: Option<f64>,
    /// Whether `minimum` itself belongs to the range.
    pub min_inclusive: bool,
    /// Whether `maximum` itself belongs to the range.
    pub max_inclusive: bool,
}

impl Default for Range {
    /// The range of all values.
    fn default() -> Self { Range::new(None, None) }
}

impl Range {
    /// Range with the default inclusivity: minimum excluded, maximum
    /// included.
    ///
    /// ```
    /// use color_classes::Range;
    /// let r = Range::new(20., 10.);
    /// assert_eq!((r.minimum(), r.maximum()), (Some(10.), Some(20.)));
    /// assert!(r.contains(20.) && !r.contains(10.));
    /// ```
    pub fn new(minimum: impl Into<Option<f64>>,
               maximum: impl Into<Option<f64>>) -> Self {
        Range::with_inclusivity(minimum, maximum, false, true)
    }

    /// Range with explicit inclusivity of both ends.
    pub fn with_inclusivity(minimum: impl Into<Option<f64>>,
                            maximum: impl Into<Option<f64>>,
                            min_inclusive: bool, max_inclusive: bool) -> Self {
        let mut r = Range { minimum: minimum.into(), maximum: maximum.into(),
                            min_inclusive, max_inclusive };
        r.fix_order();
        r
    }

    /// The degenerate range matching exactly `value`.
    pub fn single(value: f64) -> Self {
        Range::with_inclusivity(value, value, true, true)
    }

    /// Parse a range, leaving a bound unset when its number cannot be
    /// read.  See [`Range::from_str`] for the grammar and for a
    /// version reporting malformed numbers.
    pub fn from_expression(text: &str) -> Self {
        let (range, bad) = parse(text);
        if let Some(token) = bad {
            debug!("range “{}”: ignoring unreadable bound “{}”", text, token);
        }
        range
    }

    #[inline]
    pub fn minimum(&self) -> Option<f64> { self.minimum }

    #[inline]
    pub fn maximum(&self) -> Option<f64> { self.maximum }

    pub fn set_minimum(&mut self, v: impl Into<Option<f64>>) {
        self.minimum = v.into();
        self.fix_order();
    }

    pub fn set_maximum(&mut self, v: impl Into<Option<f64>>) {
        self.maximum = v.into();
        self.fix_order();
    }

    /// Set both bounds at once, then fix their order.
    pub fn set_bounds(&mut self, minimum: impl Into<Option<f64>>,
                      maximum: impl Into<Option<f64>>) {
        self.minimum = minimum.into();
        self.maximum = maximum.into();
        self.fix_order();
    }

    fn fix_order(&mut self) {
        if let (Some(min), Some(max)) = (self.minimum, self.maximum) {
            if min > max {
                self.minimum = Some(max);
                self.maximum = Some(min);
            }
        }
    }

    /// Both bounds are set and differ.
    pub fn is_bi_value(&self) -> bool {
        matches!((self.minimum, self.maximum),
                 (Some(min), Some(max)) if min != max)
    }

    /// Neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.minimum.is_none() && self.maximum.is_none()
    }

    /// Whether `value` belongs to the range.
    pub fn contains(&self, value: f64) -> bool {
        let above = match self.minimum {
            None => true,
            Some(min) => if self.min_inclusive { value >= min }
                         else { value > min } };
        let below = match self.maximum {
            None => true,
            Some(max) => if self.max_inclusive { value <= max }
                         else { value < max } };
        above && below
    }

    /// Whether the two ranges share at least one value.
    pub fn intersects(&self, other: &Range) -> bool {
        // `self` ends before `other` starts, or the reverse.
        fn before(a: &Range, b: &Range) -> bool {
            match (a.maximum, b.minimum) {
                (Some(max), Some(min)) => max < min
                    || (max == min && !(a.max_inclusive && b.min_inclusive)),
                _ => false,
            }
        }
        !before(self, other) && !before(other, self)
    }

    /// Render the range, writing the bounds with [`format_value`].
    /// One-sided ranges always read `<= max` or `> min`, whatever
    /// their inclusivity.
    pub fn to_string_with(&self, method: IntervalSnapMethod,
                          digits: u32) -> String {
        let f = |v| format_value(v, method, digits);
        match (self.minimum, self.maximum) {
            (None, None) => "[All Values]".to_string(),
            (None, Some(max)) => format!("<= {}", f(max)),
            (Some(min), None) => format!("> {}", f(min)),
            (Some(min), Some(max)) => format!("{} - {}", f(min), f(max)),
        }
    }

    /// An attribute filter equivalent to the range, e.g.
    /// `[POP] > 10 AND [POP] <= 20`.  An unbounded range gives the
    /// empty string.
    ///
    /// ```
    /// use color_classes::Range;
    /// assert_eq!(Range::new(None, 5.).to_expression("POP"), "[POP] <= 5");
    /// assert_eq!(Range::single(3.).to_expression("CODE"), "[CODE] = 3");
    /// ```
    pub fn to_expression(&self, field: &str) -> String {
        if let (Some(min), Some(max)) = (self.minimum, self.maximum) {
            if min == max && self.min_inclusive && self.max_inclusive {
                return format!("[{}] = {}", field, min);
            }
        }
        let lower = self.minimum.map(|min| {
            format!("[{}] {} {}", field,
                    if self.min_inclusive {">="} else {">"}, min) });
        let upper = self.maximum.map(|max| {
            format!("[{}] {} {}", field,
                    if self.max_inclusive {"<="} else {"<"}, max) });
        match (lower, upper) {
            (Some(l), Some(u)) => format!("{} AND {}", l, u),
            (Some(e), None) | (None, Some(e)) => e,
            (None, None) => String::new(),
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(IntervalSnapMethod::None, 0))
    }
}

impl FromStr for Range {
    type Err = Error;

    /// Parse `>= N`, `> N`, `<= N`, `< N`, `N1 - N2`, a single number
    /// `N` or the empty string (all values).  Spaces are ignored.
    ///
    /// In the dash form a minus sign and the separator are told apart
    /// by counting dashes: `-1 - 5`, `10 - -1` and `-10 - -1` are read
    /// as expected but `10--20` is read as `-20 - 10`.  Both bounds of
    /// the dash form are inclusive.
    ///
    /// ```
    /// use color_classes::Range;
    /// let r: Range = "-10 - -1".parse().unwrap();
    /// assert_eq!((r.minimum(), r.maximum()), (Some(-10.), Some(-1.)));
    /// assert!("5 - x".parse::<Range>().is_err());
    /// ```
    fn from_str(text: &str) -> Result<Self, Error> {
        match parse(text) {
            (range, None) => Ok(range),
            (_, Some(token)) => Err(Error::InvalidRange {
                expression: text.to_string(), token }),
        }
    }
}

/// Parse `text`, also returning the first token that is not a number.
fn parse(text: &str) -> (Range, Option<String>) {
    let exp: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let mut bad = None;
    let mut number = |s: &str| match s.parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => { if bad.is_none() { bad = Some(s.to_string()) }; None }
    };
    let range = if let Some(rest) = exp.strip_prefix(">=") {
        Range::with_inclusivity(number(rest), None, true, true)
    } else if let Some(rest) = exp.strip_prefix('>') {
        Range::with_inclusivity(number(rest), None, false, true)
    } else if let Some(rest) = exp.strip_prefix("<=") {
        Range::with_inclusivity(None, number(rest), false, true)
    } else if let Some(rest) = exp.strip_prefix('<') {
        Range::with_inclusivity(None, number(rest), false, false)
    } else if exp.is_empty() {
        Range::default()
    } else if let Ok(v) = exp.parse::<f64>() {
        Range::single(v)
    } else if exp.contains('-') {
        let args: Vec<&str> = exp.split('-').collect();
        let min_negative = args[0].is_empty();
        let (min_index, mut max_index) =
            if min_negative { (1, 2) } else { (0, 1) };
        let mut max_negative = false;
        if args.len() == 4 {
            max_negative = true;
            max_index = 3;
        } else if args.len() == 3 && !min_negative {
            max_negative = true;
            max_index = 2;
        }
        let token = |i: usize| args.get(i).copied().unwrap_or("");
        let sign = |neg: bool, v: f64| if neg { -v } else { v };
        let min = number(token(min_index)).map(|v| sign(min_negative, v));
        let max = number(token(max_index)).map(|v| sign(max_negative, v));
        Range::with_inclusivity(min, max, true, true)
    } else {
        number(exp.as_str());
        Range::default()
    };
    (range, bad)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(r: &Range) -> (Option<f64>, Option<f64>) {
        (r.minimum(), r.maximum())
    }

    #[test]
    fn containment_truth_table() {
        let r = Range::new(0., 10.);
        assert!(r.contains(10.));
        assert!(!r.contains(0.));
        assert!(r.contains(5.));
        assert!(!r.contains(10.5));
        for (min_inc, max_inc, at_min, at_max) in
            [(false, false, false, false), (true, false, true, false),
             (false, true, false, true), (true, true, true, true)] {
            let r = Range::with_inclusivity(0., 10., min_inc, max_inc);
            assert_eq!(r.contains(0.), at_min);
            assert_eq!(r.contains(10.), at_max);
        }
        assert!(Range::default().contains(f64::MAX));
        assert!(Range::new(None, 3.).contains(-1e300));
        assert!(!Range::new(3., None).contains(3.));
        assert!(Range::single(4.).contains(4.));
        assert!(!Range::single(4.).contains(4.000001));
    }

    #[test]
    fn order_is_fixed() {
        assert_eq!(bounds(&Range::new(20., 10.)), (Some(10.), Some(20.)));
        let mut r = Range::new(0., 10.);
        r.set_minimum(15.);
        assert_eq!(bounds(&r), (Some(10.), Some(15.)));
        r.set_maximum(None);
        assert_eq!(bounds(&r), (Some(10.), None));
    }

    #[test]
    fn display() {
        assert_eq!(Range::new(5., 15.).to_string(), "5 - 15");
        assert_eq!(Range::new(None, 15.).to_string(), "<= 15");
        assert_eq!(Range::new(15., None).to_string(), "> 15");
        assert_eq!(Range::with_inclusivity(15., None, true, true).to_string(),
                   "> 15");
        assert_eq!(Range::new(None, None).to_string(), "[All Values]");
        let r = Range::new(1.23456, 98.7654);
        assert_eq!(r.to_string_with(IntervalSnapMethod::Rounding, 1),
                   "1.2 - 98.8");
        assert_eq!(r.to_string_with(IntervalSnapMethod::SignificantFigures, 2),
                   "1.2 - 99");
    }

    #[test]
    fn excessive_significant_figures() {
        assert_eq!(format_value(5., IntervalSnapMethod::SignificantFigures, 400),
                   format!("{:.16}", 5.));
    }

    #[test]
    fn one_sided_legends_ignore_inclusivity() {
        assert_eq!(Range::from_expression("< 7.5").to_string(), "<= 7.5");
        assert_eq!(Range::from_expression(">= 5").to_string(), "> 5");
        // The filter expression keeps the exact comparison.
        assert_eq!(Range::from_expression("< 7.5").to_expression("F"), "[F] < 7.5");
        assert_eq!(Range::from_expression(">= 5").to_expression("F"), "[F] >= 5");
    }

    #[test]
    fn expressions() {
        assert_eq!(Range::new(10., 20.).to_expression("F"),
                   "[F] > 10 AND [F] <= 20");
        assert_eq!(Range::with_inclusivity(10., 20., true, false)
                   .to_expression("F"), "[F] >= 10 AND [F] < 20");
        assert_eq!(Range::new(10., None).to_expression("F"), "[F] > 10");
        assert_eq!(Range::default().to_expression("F"), "");
    }

    #[test]
    fn parse_grammar() {
        let r = Range::from_expression(">= 5");
        assert_eq!(bounds(&r), (Some(5.), None));
        assert!(r.min_inclusive);
        let r = Range::from_expression(">5");
        assert!(!r.min_inclusive && !r.contains(5.));
        let r = Range::from_expression("< 7.5");
        assert_eq!(bounds(&r), (None, Some(7.5)));
        assert!(!r.contains(7.5));
        assert!(Range::from_expression("<=7.5").contains(7.5));
        assert_eq!(bounds(&Range::from_expression("1 - 5")), (Some(1.), Some(5.)));
        assert_eq!(bounds(&Range::from_expression("-1 - 5")), (Some(-1.), Some(5.)));
        assert_eq!(bounds(&Range::from_expression("10 - -1")), (Some(-1.), Some(10.)));
        assert_eq!(bounds(&Range::from_expression("-10 - -1")), (Some(-10.), Some(-1.)));
        assert!(Range::from_expression("1 - 5").contains(1.));
        assert!(Range::from_expression("").is_unbounded());
        assert_eq!(Range::from_expression("42"), Range::single(42.));
        assert_eq!(Range::from_expression("-4.5"), Range::single(-4.5));
    }

    #[test]
    fn double_dash_is_read_as_negative_maximum() {
        assert_eq!(bounds(&Range::from_expression("10--20")), (Some(-20.), Some(10.)));
    }

    #[test]
    fn malformed_input() {
        let r = Range::from_expression("abc - 5");
        assert_eq!(bounds(&r), (None, Some(5.)));
        assert!(Range::from_expression(">= x").is_unbounded());
        match "abc - 5".parse::<Range>() {
            Err(Error::InvalidRange { token, .. }) => assert_eq!(token, "abc"),
            r => panic!("unexpected {:?}", r),
        }
        assert!("> 3".parse::<Range>().is_ok());
        assert!("".parse::<Range>().is_ok());
    }

    #[test]
    fn overlapping() {
        let a = Range::new(0., 10.);
        let b = Range::new(10., 20.);
        assert!(!a.intersects(&b));
        assert!(Range::with_inclusivity(10., 20., true, true).intersects(&a));
        assert!(Range::new(5., None).intersects(&a));
        assert!(Range::default().intersects(&b));
        assert!(!Range::new(None, 0.).intersects(&Range::new(1., 2.)));
    }
}
