//! CIELAB color type and sRGB conversions.
//!
//! Conversion chain: 8-bit sRGB -> normalized -> gamma decode -> XYZ (sRGB
//! primaries, D65) -> normalize by the D65 reference white -> CIE `f` -> Lab.
//! The inverse runs the same chain backwards.

use serde::{Deserialize, Serialize};

use super::rgb::Rgb;

/// sRGB -> XYZ matrix (sRGB primaries, D65 white).
const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

/// XYZ -> sRGB matrix, inverse of [`RGB_TO_XYZ`].
const XYZ_TO_RGB: [[f64; 3]; 3] = [
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
];

/// D65 reference white (2° observer).
const WHITE_D65: [f64; 3] = [0.95047, 1.0, 1.08883];

/// CIE `f` breakpoint, 6/29.
const DELTA: f64 = 6.0 / 29.0;

/// A color in CIELAB space.
///
/// `l` is lightness (0..=100), `a` and `b` are the green–red and blue–yellow
/// chromaticity axes. Serializes as `[l, a, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Lab {
    /// Lightness L*
    pub l: f64,
    /// Green–red axis a*
    pub a: f64,
    /// Blue–yellow axis b*
    pub b: f64,
}

impl Lab {
    /// Create a Lab color from its three coordinates.
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }
}

impl From<[f64; 3]> for Lab {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Lab> for [f64; 3] {
    fn from(lab: Lab) -> Self {
        [lab.l, lab.a, lab.b]
    }
}

impl From<Rgb> for Lab {
    fn from(rgb: Rgb) -> Self {
        rgb_to_lab(rgb)
    }
}

impl From<Lab> for Rgb {
    fn from(lab: Lab) -> Self {
        lab_to_rgb(lab)
    }
}

#[inline]
fn srgb_decode(c: f64) -> f64 {
    if c > 0.04045 {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    }
}

#[inline]
fn srgb_encode(c: f64) -> f64 {
    if c > 0.0031308 {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    } else {
        c * 12.92
    }
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

#[inline]
fn lab_f_inv(t: f64) -> f64 {
    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}

#[inline]
fn mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// Convert an 8-bit sRGB color to CIELAB (D65).
///
/// # Example
/// ```
/// use stitch_pattern::{rgb_to_lab, Rgb};
/// let lab = rgb_to_lab(Rgb::new(0, 0, 0));
/// assert!(lab.l.abs() < 1e-9);
/// ```
pub fn rgb_to_lab(rgb: Rgb) -> Lab {
    let linear = rgb.to_f64().map(|c| srgb_decode(c / 255.0));
    let xyz = mul(&RGB_TO_XYZ, linear);

    let fx = lab_f(xyz[0] / WHITE_D65[0]);
    let fy = lab_f(xyz[1] / WHITE_D65[1]);
    let fz = lab_f(xyz[2] / WHITE_D65[2]);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// Convert a CIELAB (D65) color back to 8-bit sRGB.
///
/// Out-of-gamut results are clamped per channel.
pub fn lab_to_rgb(lab: Lab) -> Rgb {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = fy + lab.a / 500.0;
    let fz = fy - lab.b / 200.0;

    let xyz = [
        lab_f_inv(fx) * WHITE_D65[0],
        lab_f_inv(fy) * WHITE_D65[1],
        lab_f_inv(fz) * WHITE_D65[2],
    ];
    let linear = mul(&XYZ_TO_RGB, xyz);

    Rgb::from_f64_rounded(linear.map(|c| srgb_encode(c.clamp(0.0, 1.0)) * 255.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_and_black() {
        let white = rgb_to_lab(Rgb::new(255, 255, 255));
        assert!((white.l - 100.0).abs() < 0.01, "L* = {}", white.l);
        assert!(white.a.abs() < 0.01, "a* = {}", white.a);
        assert!(white.b.abs() < 0.01, "b* = {}", white.b);

        let black = rgb_to_lab(Rgb::new(0, 0, 0));
        assert!(black.l.abs() < 1e-9, "L* = {}", black.l);
    }

    #[test]
    fn test_known_values() {
        // Pure sRGB red, D65: L*=53.24, a*=80.09, b*=67.20
        let red = rgb_to_lab(Rgb::new(255, 0, 0));
        assert!((red.l - 53.24).abs() < 0.05, "L* = {}", red.l);
        assert!((red.a - 80.09).abs() < 0.05, "a* = {}", red.a);
        assert!((red.b - 67.20).abs() < 0.05, "b* = {}", red.b);

        // Mid grey is achromatic
        let grey = rgb_to_lab(Rgb::new(128, 128, 128));
        assert!((grey.l - 53.59).abs() < 0.05, "L* = {}", grey.l);
        assert!(grey.a.abs() < 0.01);
        assert!(grey.b.abs() < 0.01);
    }

    #[test]
    fn test_dark_values_use_linear_segment() {
        // sRGB 5 is below the gamma threshold and Y is below (6/29)^3
        let lab = rgb_to_lab(Rgb::new(5, 5, 5));
        assert!(lab.l > 0.0 && lab.l < 2.0, "L* = {}", lab.l);
    }

    #[test]
    fn test_round_trip_is_lossless_for_8bit() {
        for r in (0..=255u16).step_by(17) {
            for g in (0..=255u16).step_by(51) {
                for b in (0..=255u16).step_by(85) {
                    let rgb = Rgb::new(r as u8, g as u8, b as u8);
                    assert_eq!(lab_to_rgb(rgb_to_lab(rgb)), rgb, "round trip of {rgb}");
                }
            }
        }
    }

    #[test]
    fn test_lab_to_rgb_clamps_out_of_gamut() {
        // Far outside the sRGB gamut: green goes negative, blue far above 1.0
        let rgb = lab_to_rgb(Lab::new(50.0, 200.0, -200.0));
        assert_eq!(rgb.g, 0);
        assert_eq!(rgb.b, 255);
    }

    #[test]
    fn test_matches_palette_crate() {
        use palette::{white_point::D65, FromColor, Lab as RefLab, Srgb};

        let samples = [
            Rgb::new(185, 45, 72),
            Rgb::new(12, 200, 90),
            Rgb::new(60, 60, 240),
            Rgb::new(250, 240, 200),
        ];
        for rgb in samples {
            let ours = rgb_to_lab(rgb);
            let srgb = Srgb::new(rgb.r, rgb.g, rgb.b).into_format::<f64>();
            let reference = RefLab::<D65, f64>::from_color(srgb);
            assert!((ours.l - reference.l).abs() < 0.05, "{rgb}: L* {} vs {}", ours.l, reference.l);
            assert!((ours.a - reference.a).abs() < 0.1, "{rgb}: a* {} vs {}", ours.a, reference.a);
            assert!((ours.b - reference.b).abs() < 0.1, "{rgb}: b* {} vs {}", ours.b, reference.b);
        }
    }
}
