//! Input image decoding
//!
//! The format is picked from the leading magic bytes. PNG goes through the
//! `png` crate and every layout is normalized to 8-bit RGB: palettes and
//! sub-byte gray are expanded, 16-bit samples are stripped to their high byte,
//! and alpha is composited over white (bare fabric). JPEG, the usual format of
//! camera photos, is decoded with `image` and converted to RGB.

use std::io::Cursor;
use std::path::Path;

use png::{BitDepth, ColorType, Transformations};
use stitch_pattern::{Rgb, RgbImage};

use crate::error::DecodeError;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_SOI: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Encoded formats accepted as input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Png,
    Jpeg,
}

impl InputFormat {
    /// Identify the format from its magic bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(PNG_SIGNATURE) {
            Some(Self::Png)
        } else if bytes.starts_with(JPEG_SOI) {
            Some(Self::Jpeg)
        } else {
            None
        }
    }
}

/// Decode PNG or JPEG bytes into an RGB image.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage, DecodeError> {
    match InputFormat::sniff(bytes) {
        Some(InputFormat::Png) => decode_png(bytes),
        Some(InputFormat::Jpeg) => decode_jpeg(bytes),
        None => Err(DecodeError::UnknownFormat),
    }
}

/// Decode JPEG bytes into an RGB image.
pub fn decode_jpeg(bytes: &[u8]) -> Result<RgbImage, DecodeError> {
    let decoded = image::load_from_memory_with_format(bytes, image::ImageFormat::Jpeg)?;
    let color = decoded.color();
    let rgb = decoded.into_rgb8();
    let (width, height) = rgb.dimensions();

    tracing::debug!(width, height, color = ?color, "Decoded JPEG");

    Ok(RgbImage::from_raw(width as usize, height as usize, rgb.as_raw())?)
}

/// Decode PNG bytes into an RGB image.
pub fn decode_png(bytes: &[u8]) -> Result<RgbImage, DecodeError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let data = &buf[..info.buffer_size()];

    let pixels: Vec<Rgb> = match (info.color_type, info.bit_depth) {
        (ColorType::Rgb, BitDepth::Eight) => data
            .chunks_exact(3)
            .map(|p| Rgb::new(p[0], p[1], p[2]))
            .collect(),
        (ColorType::Rgba, BitDepth::Eight) => data
            .chunks_exact(4)
            .map(|p| over_white([p[0], p[1], p[2]], p[3]))
            .collect(),
        (ColorType::Grayscale, BitDepth::Eight) => {
            data.iter().map(|&v| Rgb::new(v, v, v)).collect()
        }
        (ColorType::GrayscaleAlpha, BitDepth::Eight) => data
            .chunks_exact(2)
            .map(|p| over_white([p[0], p[0], p[0]], p[1]))
            .collect(),
        (color_type, bit_depth) => {
            return Err(DecodeError::UnsupportedLayout {
                color_type,
                bit_depth,
            })
        }
    };

    tracing::debug!(
        width = info.width,
        height = info.height,
        color_type = ?info.color_type,
        "Decoded PNG"
    );

    Ok(RgbImage::new(
        info.width as usize,
        info.height as usize,
        pixels,
    )?)
}

/// Read and decode a PNG or JPEG file.
pub fn load_image(path: &Path) -> Result<RgbImage, DecodeError> {
    let bytes = std::fs::read(path).map_err(|source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_image(&bytes)
}

fn over_white(rgb: [u8; 3], alpha: u8) -> Rgb {
    let a = alpha as u32;
    let blend = |c: u8| ((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8;
    Rgb::new(blend(rgb[0]), blend(rgb[1]), blend(rgb[2]))
}
