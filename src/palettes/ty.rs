pub(crate) use rgb::RGBA;

/// A named list of colors.
pub(crate) struct PaletteData {
    pub(crate) name: &'static str,
    pub(crate) rgb: Vec<RGBA<f64>>, // Invariant: length ≥ 2
    pub(crate) typ: PaletteType,
}

impl PaletteData {
    /// Build a palette from `0xRRGGBB` codes (opaque colors).
    pub(crate) fn from_hex(name: &'static str, typ: PaletteType,
                           codes: &[u32]) -> Self {
        let rgb = codes.iter().map(|&c| {
            let byte = |shift: u32| ((c >> shift) & 0xff) as f64;
            RGBA { r: byte(16), g: byte(8), b: byte(0), a: 255. }
        }).collect();
        PaletteData { name, rgb, typ }
    }
}

/// Type of Palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteType {
    /// Sequential: light colors for low values to dark colors for
    /// high values.  Suited to graduated categories.
    Seq,
    /// Divergent: emphasis on a critical mid value and on both
    /// extremes.
    Div,
    /// Qualitative: hues without implied magnitude.  Suited to
    /// unique values and placeholder categories.
    Qual,
}
