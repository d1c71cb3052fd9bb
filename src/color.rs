//! Colors, continuous color ranges and 8-bit channel arithmetic.
//!
//! Category colors are [`RGBA8`].  The [`RGBColor`] trait lets the
//! palettes and gradients of this module produce any of the `rgb`
//! crate color types.

use std::f64::consts::PI;
use std::marker::PhantomData;
use rgb::{RGBA, RGB8, RGBA8};
use crate::{palettes, Error, Palette, Result};

/// The color returned for values that fall outside a category: white
/// with a zero alpha channel (the usual “transparent” named color).
pub const TRANSPARENT: RGBA8 = RGBA8 { r: 255, g: 255, b: 255, a: 0 };

/// Clamp `x` to \[0, 255\] and truncate it to a byte.  NaN maps to 0.
#[inline]
pub fn clamp_byte(x: f64) -> u8 {
    if x.is_nan() { 0 } else { x.clamp(0., 255.) as u8 }
}

/// Parse `#rrggbb` or `#rrggbbaa` (the `#` is optional).
///
/// ```
/// use color_classes::color::parse_hex;
/// let c = parse_hex("#ff8000").unwrap();
/// assert_eq!((c.r, c.g, c.b, c.a), (255, 128, 0, 255));
/// ```
pub fn parse_hex(text: &str) -> Result<RGBA8> {
    let hex = text.trim().trim_start_matches('#');
    let invalid = || Error::InvalidColor(text.to_string());
    if !hex.chars().all(|c| c.is_ascii_hexdigit())
        || (hex.len() != 6 && hex.len() != 8) {
        return Err(invalid());
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i .. i + 2], 16)
        .map_err(|_| invalid());
    let a = if hex.len() == 8 { byte(6)? } else { 255 };
    Ok(RGBA8 { r: byte(0)?, g: byte(2)?, b: byte(4)?, a })
}

/// Render a color as `#rrggbbaa`.
pub fn to_hex(c: RGBA8) -> String {
    format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
}

/// A “continuous” range of colors parametrized by reals in \[0, 1\].
pub trait ColorRange<Color> {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\].
    fn rgb(&self, t: f64) -> Color;

    /// Return an iterator yielding `n` colors sampled uniformly in
    /// \[0, 1\], both ends included, each paired with its parameter.
    fn samples(self, n: usize) -> Samples<Self, Color>
    where Self: Sized {
        Samples { range: self, color: PhantomData, n, i: 0 }
    }
}

/// Iterator over uniformly spaced colors of a [`ColorRange`].
///
/// Created by [`ColorRange::samples`].
pub struct Samples<R, Color> {
    range: R,
    color: PhantomData<Color>,
    n: usize,
    i: usize, // next position to be consumed
}

impl<R, Color> Iterator for Samples<R, Color>
where R: ColorRange<Color> {
    type Item = (f64, Color);

    fn next(&mut self) -> Option<Self::Item> {
        if self.i >= self.n { return None }
        // A single sample sits at the start of the range.
        let t = if self.n == 1 { 0. }
                else { self.i as f64 / (self.n - 1) as f64 };
        self.i += 1;
        Some((t, self.range.rgb(t)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.n - self.i;
        (len, Some(len))
    }
}

impl<R, Color> ExactSizeIterator for Samples<R, Color>
where R: ColorRange<Color> {}

/// Specifies the methods a RGB color encoding must provide.
pub trait RGBColor: Sized {
    /// Return the red, green, blue and alpha components of the color
    /// (in \[0, 255\]).
    fn to_rgba(&self) -> RGBA<f64>;

    /// Create a color from its RGBA components (in \[0, 255\]).
    fn from_rgba(rgba: RGBA<f64>) -> Self;

    /// The hue circle, `t` ∈ \[0., 1.\] going red → yellow → green →
    /// cyan → blue → magenta.
    const HUE: Hue<Self> = Hue { color: PhantomData };

    /// Return a gradient from color `c0` to color `c1`, interpolated
    /// in the CIE L*C*h* color space.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGBA8;
    /// use color_classes::{RGBColor, ColorRange};
    /// let white = RGBA8::new(255, 255, 255, 255);
    /// let navy = RGBA8::new(0, 0, 128, 255);
    /// let ramp = white.gradient(&navy);
    /// assert_eq!(ramp.rgb(0.), white);
    /// ```
    fn gradient(&self, c1: &Self) -> Gradient<Self> {
        let lch0 = Lch::from_rgb(Self::to_rgba(self));
        let lch1 = Lch::from_rgb(Self::to_rgba(c1));
        let h0 = lch0.h;
        let h1 = lch1.h;
        // Go around the hue circle the short way.
        let dh = {
            if h1 > h0 && h1 - h0 > PI { h1 - (h0 + TWO_PI) }
            else if h1 < h0 && h0 - h1 > PI { h1 + TWO_PI - h0 }
            else { h1 - h0 } };
        Gradient { c0: lch0,
                   dc: Lch { l: lch1.l - lch0.l, c: lch1.c - lch0.c,
                             h: dh, a: lch1.a - lch0.a },
                   color: PhantomData }
    }

    /// Brewer qualitative scheme with bold, readily named colors.
    #[inline]
    fn set1() -> Palette<Self> { Palette::new(&palettes::SET1) }

    /// Brewer qualitative scheme of mixed, softer colors.
    #[inline]
    fn set2() -> Palette<Self> { Palette::new(&palettes::SET2) }

    /// Brewer qualitative scheme: darker version of [`RGBColor::set2`].
    #[inline]
    fn dark2() -> Palette<Self> { Palette::new(&palettes::DARK2) }

    /// Brewer qualitative scheme: light/dark pairs for namable hues.
    #[inline]
    fn paired() -> Palette<Self> { Palette::new(&palettes::PAIRED) }

    /// Brewer "Light to dark blue" sequential scheme.
    #[inline]
    fn blues() -> Palette<Self> { Palette::new(&palettes::BLUES) }

    /// Brewer "Light to dark gray" sequential scheme.
    #[inline]
    fn greys() -> Palette<Self> { Palette::new(&palettes::GREYS) }

    /// Brewer "Light yellow to orange to dark red" sequential scheme.
    #[inline]
    fn ylorrd() -> Palette<Self> { Palette::new(&palettes::YLORRD) }

    /// Brewer "Dark red to light yellow to dark blue" diverging scheme.
    #[inline]
    fn rdylbu() -> Palette<Self> { Palette::new(&palettes::RDYLBU) }
}

impl RGBColor for RGBA<f64> {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> { *self }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self { c }
}

impl RGBColor for RGB8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64, a: 255. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGB8 { r: clamp_byte(c.r.round()), g: clamp_byte(c.g.round()),
               b: clamp_byte(c.b.round()) }
    }
}

impl RGBColor for RGBA8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64,
              a: self.a as f64 }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGBA8 { r: clamp_byte(c.r.round()), g: clamp_byte(c.g.round()),
                b: clamp_byte(c.b.round()), a: clamp_byte(c.a.round()) }
    }
}

/// The type for colors in the CIE L*C*h*_ab color space with a D50
/// reference white point and an alpha component.  This color space is
/// CIE L*a*b* with polar coordinates.
#[derive(Clone, Copy)]
struct Lch {
    /// The lightness.
    l: f64,
    /// The chroma.
    c: f64,
    /// The hue in radians in the range 0. to 2π.
    h: f64,
    /// Alpha component
    a: f64,
}

const EPS0: f64 = 6. / 29.;
const EPS: f64 = EPS0 * EPS0 * EPS0 ;
const TWO_PI: f64 = 2. * PI;

impl Lch {
    fn from_rgb(c: RGBA<f64>) -> Lch {
        const C0: f64 = 1. / 3.;
        const C1: f64 = 841. / 108.;
        const C2: f64 = 4. / 29.;
        let xr = 0.4522795 * c.r + 0.3993744 * c.g + 0.1483460 * c.b;
        let yr = 0.2225105 * c.r + 0.7168863 * c.g + 0.0606032 * c.b;
        let zr = 0.0168820 * c.r + 0.1176865 * c.g + 0.8654315 * c.b;
        let f = |v: f64| if v > EPS { v.powf(C0) } else { C1 * v + C2 };
        let (fx, fy, fz) = (f(xr), f(yr), f(zr));
        let a = 500. * (fx - fy);
        let b = 200. * (fy - fz);
        let h = { let h = b.atan2(a);
                  if h < 0. { h + TWO_PI } else { h } };
        Lch { l: 116. * fy - 16., c: a.hypot(b), h, a: c.a }
    }

    fn to_rgb(self) -> RGBA<f64> {
        const C0: f64 = 108. / 841.;
        const C1: f64 = 4. / 29.;
        let a = self.c * self.h.cos();
        let b = self.c * self.h.sin();
        let fy = (self.l + 16.) / 116.;
        let fx = a / 500. + fy;
        let fz = fy - b / 200.;
        let f = |v: f64| if v > EPS0 { v * v * v } else { C0 * (v - C1) };
        let (fx1, fy1, fz1) = (f(fx), f(fy), f(fz));
        let r = 3.0215932  * fx1 - 1.6168777 * fy1 - 0.4047152 * fz1;
        let g = -0.9437222 * fx1 + 1.9161365 * fy1 + 0.0275856 * fz1;
        let b = 0.0693906  * fx1 - 0.2290271 * fy1 + 1.1596365 * fz1;
        RGBA { r, g, b, a: self.a }
    }
}

/// The hue circle at full saturation.
pub struct Hue<Color> { color: PhantomData<Color> }

impl<Color: RGBColor> ColorRange<Color> for Hue<Color> {
    fn rgb(&self, t: f64) -> Color {
        let t = 6. * t;
        let f = 255. * t.fract();
        let ti = t.trunc().rem_euclid(6.);
        let rgba = {
            if ti == 0.      { RGBA{ r: 255., g: f,     b: 0.,      a: 255.} }
            else if ti == 1. { RGBA{ r: 255. - f, g: 255., b: 0.,   a: 255.} }
            else if ti == 2. { RGBA{ r: 0.,   g: 255.,  b: f,       a: 255.} }
            else if ti == 3. { RGBA{ r: 0.,   g: 255. - f, b: 255., a: 255.} }
            else if ti == 4. { RGBA{ r: f,    g: 0.,    b: 255.,    a: 255.} }
            else             { RGBA{ r: 255., g: 0.,    b: 255. - f, a: 255.} }
        };
        Color::from_rgba(rgba)
    }
}

/// Gradient between two colors.
///
/// Created by [`RGBColor::gradient`].  See the [`ColorRange`] trait
/// for methods.
pub struct Gradient<Color> {
    c0: Lch, // first color
    dc: Lch, // last - first color
    color: PhantomData<Color>,
}

impl<Color> Gradient<Color>
where Color: RGBColor {
    /// Returns the color corresponding to `t` without checking that
    /// `t` ∈ \[0., 1.\].
    #[inline]
    pub(crate) fn rgb_unchecked(&self, t: f64) -> Color {
        let lch = Lch { l: self.c0.l + t * self.dc.l,
                        c: self.c0.c + t * self.dc.c,
                        h: self.c0.h + t * self.dc.h,
                        a: self.c0.a + t * self.dc.a };
        Color::from_rgba(lch.to_rgb())
    }
}

impl<Color> ColorRange<Color> for Gradient<Color>
where Color: RGBColor {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\], where
    /// `t == 0.` returns the first color provided in the gradient and
    /// `t == 1.` the second.
    fn rgb(&self, t: f64) -> Color { self.rgb_unchecked(t.clamp(0., 1.)) }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn close(c0: RGBA8, c1: RGBA8) -> bool {
        let d = |a: u8, b: u8| (a as i16 - b as i16).abs() <= 1;
        d(c0.r, c1.r) && d(c0.g, c1.g) && d(c0.b, c1.b) && d(c0.a, c1.a)
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex("00ff0080").unwrap(), RGBA8::new(0, 255, 0, 128));
        assert_eq!(to_hex(RGBA8::new(1, 2, 3, 255)), "#010203ff");
        assert!(matches!(parse_hex("#12345"), Err(Error::InvalidColor(_))));
        assert!(parse_hex("#gg0000").is_err());
    }

    #[test]
    fn byte_clamping() {
        assert_eq!(clamp_byte(-3.), 0);
        assert_eq!(clamp_byte(300.), 255);
        assert_eq!(clamp_byte(127.9), 127);
        assert_eq!(clamp_byte(f64::NAN), 0);
    }

    #[test]
    fn gradient_endpoints() {
        let c0 = RGBA8::new(94, 0, 99, 255);
        let c1 = RGBA8::new(255, 235, 170, 200);
        let g = c0.gradient(&c1);
        assert!(close(g.rgb(0.), c0), "{:?}", g.rgb(0.));
        assert!(close(g.rgb(1.), c1), "{:?}", g.rgb(1.));
        assert!(close(g.rgb(7.), c1));
    }

    #[test]
    fn hue_samples() {
        let v: Vec<_> = RGBA8::HUE.samples(11).collect();
        assert_eq!(v.len(), 11);
        for (i, (t, c)) in v.into_iter().enumerate() {
            assert!((t - 0.1 * i as f64).abs() <= 1e-15, "{} ≉ {}", t, 0.1 * i as f64);
            assert_eq!(RGBA8::HUE.rgb(t), c);
        }
        assert_eq!(RGBA8::HUE.samples(0).count(), 0);
    }
}
