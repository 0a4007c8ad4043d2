//! 8-bit sRGB color type
//!
//! Images, palettes and catalog threads all carry colors as three 8-bit
//! gamma-encoded channels. Arithmetic that needs more range (clustering,
//! error diffusion) promotes to floats locally.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ParseColorError;

/// A color in 8-bit sRGB.
///
/// Serializes as a `[r, g, b]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Create a color from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from float channels in 0.0..=255.0.
    ///
    /// Values are clamped, then truncated toward zero.
    #[inline]
    pub fn from_f64_truncated(channels: [f64; 3]) -> Self {
        let c = |v: f64| v.clamp(0.0, 255.0) as u8;
        Self::new(c(channels[0]), c(channels[1]), c(channels[2]))
    }

    /// Create a color from float channels in 0.0..=255.0.
    ///
    /// Values are rounded to nearest, then clamped.
    #[inline]
    pub fn from_f64_rounded(channels: [f64; 3]) -> Self {
        let c = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        Self::new(c(channels[0]), c(channels[1]), c(channels[2]))
    }

    /// Channels as floats, in 0.0..=255.0.
    #[inline]
    pub fn to_f64(self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }

    /// Squared Euclidean distance in RGB space.
    #[inline]
    pub fn distance_squared(self, other: Rgb) -> u32 {
        let d = |a: u8, b: u8| {
            let v = a as i32 - b as i32;
            (v * v) as u32
        };
        d(self.r, other.r) + d(self.g, other.g) + d(self.b, other.b)
    }

    /// Lowercase `#rrggbb` representation.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(rgb: Rgb) -> Self {
        [rgb.r, rgb.g, rgb.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Supports the following formats:
    /// - `#RRGGBB` - standard 6-digit hex with hash
    /// - `RRGGBB` - standard 6-digit hex without hash
    /// - `#RGB` - shorthand 3-digit hex with hash (expands to RRGGBB)
    /// - `RGB` - shorthand 3-digit hex without hash
    ///
    /// Parsing is case-insensitive. Leading and trailing whitespace is trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use stitch_pattern::Rgb;
    ///
    /// let red: Rgb = "#C72B3B".parse().unwrap();
    /// assert_eq!(red, Rgb::new(199, 43, 59));
    ///
    /// let white: Rgb = "fff".parse().unwrap();
    /// assert_eq!(white, Rgb::new(255, 255, 255));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing_6digit() {
        let white: Rgb = "#FFFFFF".parse().unwrap();
        assert_eq!(white, Rgb::new(255, 255, 255));

        let black: Rgb = "000000".parse().unwrap();
        assert_eq!(black, Rgb::new(0, 0, 0));

        let mixed: Rgb = "#c72B3b".parse().unwrap();
        assert_eq!(mixed, Rgb::new(199, 43, 59));
    }

    #[test]
    fn test_hex_parsing_shorthand() {
        let color: Rgb = "#ABC".parse().unwrap();
        assert_eq!(color, Rgb::new(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn test_hex_parsing_errors() {
        assert!(matches!(
            "#GGG".parse::<Rgb>(),
            Err(ParseColorError::InvalidHex(_))
        ));
        assert!(matches!(
            "#FFFF".parse::<Rgb>(),
            Err(ParseColorError::InvalidLength)
        ));
        assert!(matches!("".parse::<Rgb>(), Err(ParseColorError::InvalidLength)));
        // Multi-byte characters must not panic on slicing
        assert!("#ÿÿÿ".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_hex_parsing_whitespace() {
        let white: Rgb = "  #FFFFFF  ".parse().unwrap();
        assert_eq!(white, Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_to_hex_round_trip() {
        let color = Rgb::new(19, 71, 125);
        assert_eq!(color.to_hex(), "#13477d");
        assert_eq!(color.to_hex().parse::<Rgb>().unwrap(), color);
    }

    #[test]
    fn test_float_conversions() {
        assert_eq!(
            Rgb::from_f64_truncated([254.9, -3.0, 300.0]),
            Rgb::new(254, 0, 255)
        );
        assert_eq!(
            Rgb::from_f64_rounded([254.5, 0.49, 127.5]),
            Rgb::new(255, 0, 128)
        );
    }

    #[test]
    fn test_distance_squared() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(3, 4, 0);
        assert_eq!(a.distance_squared(b), 25);
        assert_eq!(b.distance_squared(a), 25);
    }
}
