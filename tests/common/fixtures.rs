//! Test fixtures: small catalogs and generated PNG inputs.

use std::path::{Path, PathBuf};

/// Catalog with two brands and a handful of primaries
pub const CATALOG_YAML: &str = r##"
threads:
  - id: dmc_310
    brand: DMC
    code: "310"
    name: Black
    rgb: [0, 0, 0]
  - id: dmc_b5200
    brand: DMC
    code: B5200
    name: Snow White
    rgb: [255, 255, 255]
  - id: dmc_321
    brand: DMC
    code: "321"
    name: Red
    rgb: [199, 43, 59]
  - id: dmc_798
    brand: DMC
    code: "798"
    name: Dark Delft Blue
    hex: "#466a8e"
  - id: anchor_403
    brand: Anchor
    code: 403
    name: Black
    rgb: [0, 0, 0]
  - id: anchor_9046
    brand: Anchor
    code: 9046
    name: Christmas Red
    rgb: [186, 18, 43]
"##;

/// Same catalog as JSON
pub const CATALOG_JSON: &str = r##"{
  "threads": [
    {"id": "dmc_310", "brand": "DMC", "code": "310", "name": "Black", "rgb": [0, 0, 0]},
    {"id": "dmc_b5200", "brand": "DMC", "code": "B5200", "name": "Snow White",
     "rgb": [255, 255, 255]},
    {"id": "dmc_321", "brand": "DMC", "code": "321", "name": "Red", "rgb": [199, 43, 59]},
    {"id": "dmc_798", "brand": "DMC", "code": "798", "name": "Dark Delft Blue", "hex": "#466a8e"},
    {"id": "anchor_403", "brand": "Anchor", "code": 403, "name": "Black", "rgb": [0, 0, 0]},
    {"id": "anchor_9046", "brand": "Anchor", "code": 9046, "name": "Christmas Red",
     "rgb": [186, 18, 43]}
  ]
}"##;

/// Write `contents` to `dir/name` and return the path
pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

fn rgb_bytes(width: u32, height: u32, pixel: impl Fn(u32, u32) -> [u8; 3]) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&pixel(x, y));
        }
    }
    data
}

/// Encode an 8-bit RGB PNG from a pixel function
pub fn rgb_png(width: u32, height: u32, pixel: impl Fn(u32, u32) -> [u8; 3]) -> Vec<u8> {
    let data = rgb_bytes(width, height, pixel);

    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("png header");
        writer.write_image_data(&data).expect("png data");
    }
    buf
}

/// Encode a baseline JPEG (quality 95) from a pixel function
pub fn rgb_jpeg(width: u32, height: u32, pixel: impl Fn(u32, u32) -> [u8; 3]) -> Vec<u8> {
    let data = rgb_bytes(width, height, pixel);

    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, 95)
        .encode(&data, width, height, image::ExtendedColorType::Rgb8)
        .expect("jpeg encode");
    buf
}

/// Four vertical bands: black, white, red, blue
pub fn bands_png(width: u32, height: u32) -> Vec<u8> {
    rgb_png(width, height, |x, _| match x * 4 / width {
        0 => [0, 0, 0],
        1 => [255, 255, 255],
        2 => [199, 43, 59],
        _ => [70, 106, 142],
    })
}

/// White canvas with a black filled square in the middle
pub fn square_png(size: u32) -> Vec<u8> {
    let lo = size / 4;
    let hi = size - size / 4;
    rgb_png(size, size, |x, y| {
        if (lo..hi).contains(&x) && (lo..hi).contains(&y) {
            [0, 0, 0]
        } else {
            [255, 255, 255]
        }
    })
}
