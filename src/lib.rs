//! Value classes and gradient colors for thematic maps.
//!
//! - [`Range`]: numeric intervals, their text form and filter expressions.
//! - [`Statistics`] of a value sample.
//! - [`Category`], [`ColorCategory`] (two-color gradients) and
//!   [`FeatureCategory`] (point, line and polygon symbolizers).
//! - [`Scheme`]: an ordered list of categories classifying values.
//!
//! [`ColorRange`]s, such as [`Gradient`]s, and [schemes by Cynthia
//! Brewer](https://colorbrewer2.org/) ([`Palette`]) provide the colors.
//!
//! # Example
//!
//! ```
//! use rgb::RGBA8;
//! use color_classes::{ColorCategory, Range, Scheme};
//! let white = RGBA8::new(255, 255, 255, 255);
//! let black = RGBA8::new(0, 0, 0, 255);
//! let cat = |min: f64, max: f64| ColorCategory::with_range(
//!     Range::with_inclusivity(min, max, true, false), white, black);
//! let scheme = Scheme::from_categories(vec![cat(10., 20.), cat(20., 30.)]);
//! assert_eq!(scheme.classify(25.), Some(1));
//! assert_eq!(scheme.calculate_color(25.), RGBA8::new(127, 127, 127, 255));
//! ```

pub mod category;
pub mod color;
mod color_category;
mod feature;
mod palettes;
mod range;
mod scheme;
mod settings;
mod statistics;

pub use category::Category;
pub use color::{ColorRange, Gradient, Hue, RGBColor, Samples};
pub use color_category::{ColorCategory, GradientModel};
pub use feature::{FeatureCategory, Symbolizer, SymbolizerKind};
pub use palettes::{Palette, PaletteGradient};
pub use palettes::ty::PaletteType;
pub use range::{format_value, IntervalSnapMethod, Range};
pub use scheme::{Batch, ChangeSink, DrawingFilter, PaletteStrategy, Scheme,
                 SchemeCategory, SchemeEvent};
pub use settings::{EditorSettings, IntervalMethod};
pub use statistics::Statistics;

/// Errors of this crate.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid range “{expression}”: cannot read “{token}” as a number")]
    InvalidRange { expression: String, token: String },

    #[error("invalid color “{0}”, expected #rrggbb or #rrggbbaa")]
    InvalidColor(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
