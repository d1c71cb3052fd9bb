//! Settings shared by the classification editors.
//!
//! The settings are usually read from a JSON document whose keys are
//! the field names below; missing keys take their default value.
//!
//! ```json
//! { "field_name": "POP2020",
//!   "interval_snap_method": "SignificantFigures",
//!   "interval_rounding_digits": 2,
//!   "start_color": "#ffffcc", "end_color": "#800026" }
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use rgb::RGBA8;
use serde::{Deserialize, Deserializer};
use crate::{color, GradientModel, IntervalSnapMethod, Palette, PaletteStrategy,
            Result};

/// How breaks are generated.  Generating them is up to the caller;
/// the value is only carried along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum IntervalMethod {
    EqualInterval,
    #[default]
    Quantile,
    NaturalBreaks,
    StandardDeviation,
    UniqueValues,
    Manual,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub interval_method: IntervalMethod,
    pub interval_snap_method: IntervalSnapMethod,
    /// Digits used by rounding and significant figures snapping.
    pub interval_rounding_digits: u32,
    pub num_breaks: usize,
    /// Attribute the filter expressions are written against.
    pub field_name: String,
    /// Filter of the values left out of the classification, e.g.
    /// `[POP] = -9999`.  Empty for none.
    pub exclude_expression: String,
    #[serde(deserialize_with = "hex_color")]
    pub start_color: RGBA8,
    #[serde(deserialize_with = "hex_color")]
    pub end_color: RGBA8,
    pub gradient_model: GradientModel,
    /// Brewer palette used for placeholder categories.  Hues are used
    /// when unset or unknown.
    pub palette: Option<String>,
    pub max_sample_count: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        EditorSettings {
            interval_method: IntervalMethod::default(),
            interval_snap_method: IntervalSnapMethod::default(),
            interval_rounding_digits: 0,
            num_breaks: 5,
            field_name: String::new(),
            exclude_expression: String::new(),
            start_color: RGBA8::new(0xff, 0xff, 0xcc, 255),
            end_color: RGBA8::new(0x80, 0x00, 0x26, 255),
            gradient_model: GradientModel::default(),
            palette: None,
            max_sample_count: 10_000,
        }
    }
}

fn hex_color<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<RGBA8, D::Error> {
    let text = String::deserialize(d)?;
    color::parse_hex(&text).map_err(serde::de::Error::custom)
}

impl EditorSettings {
    /// Read settings from a JSON document.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// The exclude expression, if any.
    pub fn exclude(&self) -> Option<&str> {
        let e = self.exclude_expression.trim();
        if e.is_empty() { None } else { Some(e) }
    }

    /// The color strategy for placeholder categories.
    pub fn palette_strategy(&self) -> PaletteStrategy {
        match self.palette.as_deref().and_then(Palette::by_name) {
            Some(p) => PaletteStrategy::Palette(p),
            None => PaletteStrategy::Hue,
        }
    }
}
