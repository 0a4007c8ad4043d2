pub mod catalog;
pub mod conversion;
pub mod image_decoder;

pub use catalog::{load_catalog, load_catalog_file, parse_catalog, CatalogFormat};
pub use conversion::{write_pattern, ConversionService};
pub use image_decoder::{decode_image, decode_jpeg, decode_png, load_image, InputFormat};
