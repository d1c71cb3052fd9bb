//! Color palettes by Cynthia Brewer, see <https://colorbrewer2.org/>.

use std::marker::PhantomData;
use lazy_static::lazy_static;
use crate::color::{ColorRange, Gradient, RGBColor};

pub(crate) mod ty;
use ty::*;

lazy_static! {
  pub(crate) static ref SET1: PaletteData = PaletteData::from_hex(
    "set1", PaletteType::Qual,
    &[0xe41a1c, 0x377eb8, 0x4daf4a, 0x984ea3, 0xff7f00, 0xffff33,
      0xa65628, 0xf781bf, 0x999999]);
  pub(crate) static ref SET2: PaletteData = PaletteData::from_hex(
    "set2", PaletteType::Qual,
    &[0x66c2a5, 0xfc8d62, 0x8da0cb, 0xe78ac3, 0xa6d854, 0xffd92f,
      0xe5c494, 0xb3b3b3]);
  pub(crate) static ref DARK2: PaletteData = PaletteData::from_hex(
    "dark2", PaletteType::Qual,
    &[0x1b9e77, 0xd95f02, 0x7570b3, 0xe7298a, 0x66a61e, 0xe6ab02,
      0xa6761d, 0x666666]);
  pub(crate) static ref PAIRED: PaletteData = PaletteData::from_hex(
    "paired", PaletteType::Qual,
    &[0xa6cee3, 0x1f78b4, 0xb2df8a, 0x33a02c, 0xfb9a99, 0xe31a1c,
      0xfdbf6f, 0xff7f00, 0xcab2d6, 0x6a3d9a, 0xffff99, 0xb15928]);
  pub(crate) static ref BLUES: PaletteData = PaletteData::from_hex(
    "blues", PaletteType::Seq,
    &[0xf7fbff, 0xdeebf7, 0xc6dbef, 0x9ecae1, 0x6baed6, 0x4292c6,
      0x2171b5, 0x08519c, 0x08306b]);
  pub(crate) static ref GREYS: PaletteData = PaletteData::from_hex(
    "greys", PaletteType::Seq,
    &[0xffffff, 0xf0f0f0, 0xd9d9d9, 0xbdbdbd, 0x969696, 0x737373,
      0x525252, 0x252525, 0x000000]);
  pub(crate) static ref YLORRD: PaletteData = PaletteData::from_hex(
    "ylorrd", PaletteType::Seq,
    &[0xffffcc, 0xffeda0, 0xfed976, 0xfeb24c, 0xfd8d3c, 0xfc4e2a,
      0xe31a1c, 0xbd0026, 0x800026]);
  pub(crate) static ref RDYLBU: PaletteData = PaletteData::from_hex(
    "rdylbu", PaletteType::Div,
    &[0xd73027, 0xf46d43, 0xfdae61, 0xfee090, 0xffffbf, 0xe0f3f8,
      0xabd9e9, 0x74add1, 0x4575b4]);

  static ref ALL: [&'static PaletteData; 8] = [
    &*SET1, &*SET2, &*DARK2, &*PAIRED, &*BLUES, &*GREYS, &*YLORRD,
    &*RDYLBU];
}

/// A palette of colors of type `Color`.
#[derive(Clone, Copy)]
pub struct Palette<Color> {
    palette: &'static PaletteData,
    color: PhantomData<Color>,
}

impl<Color> std::fmt::Debug for Palette<Color> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Palette({})", self.palette.name)
    }
}

impl<Color> PartialEq for Palette<Color> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.palette, other.palette)
    }
}

impl<Color: RGBColor> Palette<Color> {
    pub(crate) fn new(palette: &'static PaletteData) -> Self {
        Self { palette, color: PhantomData }
    }

    /// Look a palette up by its (case insensitive) Brewer name,
    /// e.g. `"Set1"` or `"YlOrRd"`.
    pub fn by_name(name: &str) -> Option<Self> {
        ALL.iter().find(|p| p.name.eq_ignore_ascii_case(name))
            .map(|&p| Self::new(p))
    }

    /// The lowercase Brewer name of the palette.
    pub fn name(&self) -> &'static str { self.palette.name }

    /// Returns the number of colors in the palette (at least 2).
    pub fn len(&self) -> usize { self.palette.rgb.len() }

    /// Palettes are never empty.
    pub fn is_empty(&self) -> bool { false }

    /// Says whether the palette is `Seq`uential, `Div`ergent or
    /// `Qual`itative.
    pub fn typ(&self) -> PaletteType { self.palette.typ }

    /// Returns the colors of the palette.
    pub fn colors(&self) -> Vec<Color> {
        self.palette.rgb.iter().map(|&c| Color::from_rgba(c)).collect()
    }

    /// Returns the `i`-th color, cycling when `i ≥ len()`.
    pub fn cycle(&self, i: usize) -> Color {
        Color::from_rgba(self.palette.rgb[i % self.len()])
    }

    /// A color range through the successive colors of the palette,
    /// each pair joined by a CIE LCh [`Gradient`].  Meant for
    /// sequential and diverging palettes.
    pub fn gradient(&self) -> PaletteGradient<Color> {
        let segments = self.palette.rgb.windows(2)
            .map(|pair| Color::from_rgba(pair[0])
                 .gradient(&Color::from_rgba(pair[1])))
            .collect();
        PaletteGradient { segments }
    }
}

/// The color range of [`Palette::gradient`].  Each of the `n - 1`
/// segments covers an equal share of \[0, 1\].
pub struct PaletteGradient<Color> {
    segments: Vec<Gradient<Color>>,
}

impl<Color: RGBColor> ColorRange<Color> for PaletteGradient<Color> {
    fn rgb(&self, t: f64) -> Color {
        let pos = t.clamp(0., 1.) * self.segments.len() as f64;
        // t = 1 is the end of the last segment.
        let i = (pos as usize).min(self.segments.len() - 1);
        self.segments[i].rgb_unchecked(pos - i as f64)
    }
}
