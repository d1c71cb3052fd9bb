//! Categories painted with a two-color gradient.

use rgb::RGBA8;
use serde::Deserialize;
use crate::{color::{clamp_byte, TRANSPARENT}, Category, Range};

/// How the position of a value in a range is turned into a blend
/// factor between the low and high colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum GradientModel {
    /// Proportional to the distance to the minimum.
    #[default]
    Linear,
    /// Proportional to the squared distance to the minimum.
    Exponential,
    /// Proportional to the logarithm of the distance to the minimum.
    Logarithmic,
}

/// A [`Category`] whose values are colored by blending `low_color`
/// (at the minimum) into `high_color` (at the maximum).
#[derive(Clone, Debug, PartialEq)]
pub struct ColorCategory {
    pub category: Category,
    pub low_color: RGBA8,
    pub high_color: RGBA8,
    pub gradient_model: GradientModel,
}

impl ColorCategory {
    /// A linear gradient category on the range ]`min`, `max`].
    pub fn new(min: impl Into<Option<f64>>, max: impl Into<Option<f64>>,
               low_color: RGBA8, high_color: RGBA8) -> Self {
        ColorCategory::with_range(Range::new(min, max), low_color, high_color)
    }

    pub fn with_range(range: Range, low_color: RGBA8, high_color: RGBA8) -> Self {
        ColorCategory { category: Category::new(range), low_color, high_color,
                        gradient_model: GradientModel::Linear }
    }

    /// A category painted with a single `color`.
    pub fn solid(range: Range, color: RGBA8) -> Self {
        ColorCategory::with_range(range, color, color)
    }

    pub fn gradient_model(mut self, model: GradientModel) -> Self {
        self.gradient_model = model;
        self
    }

    #[inline]
    pub fn range(&self) -> &Range { self.category.range() }

    #[inline]
    pub fn contains(&self, value: f64) -> bool { self.category.contains(value) }

    /// Both bounds are set and differ.
    pub fn is_bi_value(&self) -> bool { self.range().is_bi_value() }

    /// The color of `value`.
    ///
    /// Values outside the range are [`TRANSPARENT`].  When one bound
    /// is missing (or both are equal) there is nothing to interpolate:
    /// the high color is used if the minimum is missing, the low color
    /// otherwise.
    ///
    /// ```
    /// use rgb::RGBA8;
    /// use color_classes::ColorCategory;
    /// let black = RGBA8::new(0, 0, 0, 255);
    /// let white = RGBA8::new(255, 255, 255, 255);
    /// let c = ColorCategory::new(0., 10., black, white);
    /// assert_eq!(c.calculate_color(10.), white);
    /// assert_eq!(c.calculate_color(5.), RGBA8::new(128, 128, 128, 255));
    /// ```
    pub fn calculate_color(&self, value: f64) -> RGBA8 {
        if !self.contains(value) { return TRANSPARENT }
        let (min, max) = match (self.range().minimum(), self.range().maximum()) {
            (Some(min), Some(max)) if min != max => (min, max),
            (None, _) => return self.high_color,
            _ => return self.low_color,
        };
        let range = max - min;
        let p = match self.gradient_model {
            GradientModel::Linear => (value - min) / range,
            GradientModel::Exponential => {
                let value = value.max(1.);
                if range <= 1. { return self.low_color }
                (value - min).powi(2) / range.powi(2)
            }
            GradientModel::Logarithmic => {
                let value = value.max(1.);
                if range <= 1. || value - min <= 1. { return self.low_color }
                (value - min).ln() / range.ln()
            }
        };
        blend(self.low_color, self.high_color, p)
    }
}

/// Move each channel of `low` towards `high` by the fraction `p`,
/// rounding halves away from zero.
fn blend(low: RGBA8, high: RGBA8, p: f64) -> RGBA8 {
    let channel = |lo: u8, hi: u8| {
        clamp_byte(lo as f64 + ((hi as f64 - lo as f64) * p).round())
    };
    RGBA8 { r: channel(low.r, high.r), g: channel(low.g, high.g),
            b: channel(low.b, high.b), a: channel(low.a, high.a) }
}


#[cfg(test)]
mod tests {
    use super::*;

    const LOW: RGBA8 = RGBA8 { r: 10, g: 200, b: 0, a: 255 };
    const HIGH: RGBA8 = RGBA8 { r: 250, g: 0, b: 100, a: 55 };

    fn inclusive(min: f64, max: f64, model: GradientModel) -> ColorCategory {
        ColorCategory::with_range(Range::with_inclusivity(min, max, true, true),
                                  LOW, HIGH)
            .gradient_model(model)
    }

    #[test]
    fn linear_endpoints() {
        let c = inclusive(0., 10., GradientModel::Linear);
        assert_eq!(c.calculate_color(0.), LOW);
        assert_eq!(c.calculate_color(10.), HIGH);
    }

    #[test]
    fn outside_is_transparent() {
        let c = ColorCategory::new(0., 10., LOW, HIGH);
        assert_eq!(c.calculate_color(0.), TRANSPARENT);
        assert_eq!(c.calculate_color(-1.), TRANSPARENT);
        assert_eq!(c.calculate_color(f64::NAN), TRANSPARENT);
        assert_eq!(c.calculate_color(10.), HIGH);
    }

    #[test]
    fn half_channels_round_away_from_zero() {
        let c = inclusive(0., 2., GradientModel::Linear);
        // 10 + 120, 200 - 100, 0 + 50, 255 - 100
        assert_eq!(c.calculate_color(1.), RGBA8::new(130, 100, 50, 155));
        let black = RGBA8::new(0, 0, 0, 0);
        let white = RGBA8::new(255, 255, 255, 255);
        let up = ColorCategory::with_range(Range::single(0.), black, white);
        assert_eq!(up.calculate_color(0.), black);
        let c = ColorCategory::new(0., 2., black, white);
        assert_eq!(c.calculate_color(1.), RGBA8::new(128, 128, 128, 128));
        let c = ColorCategory::new(0., 2., white, black);
        assert_eq!(c.calculate_color(1.), RGBA8::new(127, 127, 127, 127));
    }

    #[test]
    fn open_ranges_use_a_bound_color() {
        let no_min = ColorCategory::new(None, 5., LOW, HIGH);
        assert_eq!(no_min.calculate_color(-100.), HIGH);
        let no_max = ColorCategory::new(5., None, LOW, HIGH);
        assert_eq!(no_max.calculate_color(100.), LOW);
        let all = ColorCategory::new(None, None, LOW, HIGH);
        assert_eq!(all.calculate_color(0.), HIGH);
        assert!(!all.is_bi_value());
    }

    #[test]
    fn degenerate_exponential_and_logarithmic() {
        for model in [GradientModel::Exponential, GradientModel::Logarithmic] {
            let c = inclusive(3., 4., model);
            assert_eq!(c.calculate_color(3.), LOW);
            assert_eq!(c.calculate_color(3.5), LOW);
            assert_eq!(c.calculate_color(4.), LOW);
            let c = inclusive(0., 0.5, model);
            assert_eq!(c.calculate_color(0.25), LOW);
        }
    }

    #[test]
    fn exponential() {
        let c = inclusive(0., 10., GradientModel::Exponential);
        assert_eq!(c.calculate_color(10.), HIGH);
        // p = 25 / 100
        assert_eq!(c.calculate_color(5.), RGBA8::new(70, 150, 25, 205));
        // Values below 1 are treated as 1: p = 1 / 100
        assert_eq!(c.calculate_color(0.), c.calculate_color(1.));
    }

    #[test]
    fn logarithmic() {
        let c = inclusive(0., 100., GradientModel::Logarithmic);
        assert_eq!(c.calculate_color(100.), HIGH);
        // p = ln 10 / ln 100 = 1/2
        assert_eq!(c.calculate_color(10.), RGBA8::new(130, 100, 50, 155));
        // Within 1 of the minimum.
        assert_eq!(c.calculate_color(0.5), LOW);
        assert_eq!(c.calculate_color(1.), LOW);
    }
}
