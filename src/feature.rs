//! Categories drawn with a point, line or polygon symbolizer.

use rgb::RGBA8;
use crate::{Category, Range};

/// Which kind of geometry a symbolizer draws.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SymbolizerKind {
    Point,
    Line,
    #[default]
    Polygon,
}

/// Visual treatment of the features of a category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Symbolizer {
    Point { color: RGBA8, size: f64 },
    Line { color: RGBA8, width: f64 },
    Polygon { fill: RGBA8, outline: RGBA8, outline_width: f64 },
}

impl Symbolizer {
    /// Default symbolizer of `kind` painted with `color`.  Polygons get
    /// a thin outline in a darker shade of the fill.
    pub fn of_kind(kind: SymbolizerKind, color: RGBA8) -> Self {
        match kind {
            SymbolizerKind::Point => Symbolizer::Point { color, size: 4. },
            SymbolizerKind::Line => Symbolizer::Line { color, width: 1. },
            SymbolizerKind::Polygon => {
                let darker = |c: u8| (c as u16 * 3 / 4) as u8;
                let outline = RGBA8 { r: darker(color.r), g: darker(color.g),
                                      b: darker(color.b), a: color.a };
                Symbolizer::Polygon { fill: color, outline, outline_width: 1. }
            }
        }
    }

    pub fn kind(&self) -> SymbolizerKind {
        match self {
            Symbolizer::Point { .. } => SymbolizerKind::Point,
            Symbolizer::Line { .. } => SymbolizerKind::Line,
            Symbolizer::Polygon { .. } => SymbolizerKind::Polygon,
        }
    }

    /// The main color: point and line color, polygon fill.
    pub fn color(&self) -> RGBA8 {
        match *self {
            Symbolizer::Point { color, .. } | Symbolizer::Line { color, .. } => color,
            Symbolizer::Polygon { fill, .. } => fill,
        }
    }

    /// Scale point sizes, line widths and outline widths by `factor`.
    /// Used for graduated symbols.
    pub fn scale(&mut self, factor: f64) {
        match self {
            Symbolizer::Point { size, .. } => *size *= factor,
            Symbolizer::Line { width, .. } => *width *= factor,
            Symbolizer::Polygon { outline_width, .. } => *outline_width *= factor,
        }
    }
}

/// A [`Category`] of vector features.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureCategory {
    pub category: Category,
    pub symbolizer: Symbolizer,
}

impl FeatureCategory {
    pub fn new(range: Range, symbolizer: Symbolizer) -> Self {
        FeatureCategory { category: Category::new(range), symbolizer }
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool { self.category.contains(value) }
}
