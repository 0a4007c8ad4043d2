use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use stitch_pattern::{
    ConversionBudget, ConversionOptions, Pattern, PatternConverter, RgbImage, ThreadCatalog,
};

use crate::error::AppError;
use crate::services::image_decoder;

/// Runs conversions against a shared, read-only thread catalog.
///
/// Cloning is cheap; every clone shares the same catalog.
#[derive(Clone)]
pub struct ConversionService {
    catalog: Arc<ThreadCatalog>,
}

impl ConversionService {
    pub fn new(catalog: Arc<ThreadCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ThreadCatalog {
        &self.catalog
    }

    /// Convert an already decoded image
    pub fn convert_image(
        &self,
        image: &RgbImage,
        options: ConversionOptions,
        budget: ConversionBudget,
    ) -> Result<Pattern, AppError> {
        let start = Instant::now();

        let pattern = PatternConverter::new(&self.catalog)
            .options(options)
            .budget(budget)
            .convert(image)?;

        tracing::info!(
            width = pattern.dimensions.width_stitches,
            height = pattern.dimensions.height_stitches,
            colors = pattern.palette.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Converted image"
        );

        Ok(pattern)
    }

    /// Decode PNG or JPEG bytes and convert
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        options: ConversionOptions,
        budget: ConversionBudget,
    ) -> Result<Pattern, AppError> {
        let image = image_decoder::decode_image(bytes)?;
        self.convert_image(&image, options, budget)
    }

    /// Read a PNG or JPEG file and convert
    pub fn convert_file(
        &self,
        path: &Path,
        options: ConversionOptions,
        budget: ConversionBudget,
    ) -> Result<Pattern, AppError> {
        let image = image_decoder::load_image(path)?;
        tracing::debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "Loaded input image"
        );
        self.convert_image(&image, options, budget)
    }
}

/// Write a pattern as pretty-printed JSON to a file, or stdout when `None`.
pub fn write_pattern(pattern: &Pattern, output: Option<&Path>) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(pattern)?;
    match output {
        Some(path) => std::fs::write(path, json + "\n")?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stitch_pattern::{Rgb, ThreadRecord};

    fn catalog() -> Arc<ThreadCatalog> {
        let record = |id: &str, code: &str, rgb: Rgb| ThreadRecord {
            id: id.to_string(),
            brand: "DMC".to_string(),
            code: code.to_string(),
            name: String::new(),
            rgb,
            lab: None,
        };
        Arc::new(
            ThreadCatalog::from_records(vec![
                record("dmc_310", "310", Rgb::new(0, 0, 0)),
                record("dmc_b5200", "B5200", Rgb::new(255, 255, 255)),
                record("dmc_321", "321", Rgb::new(199, 43, 59)),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_convert_image() {
        let service = ConversionService::new(catalog());
        let image = RgbImage::filled(4, 2, Rgb::new(200, 40, 60)).unwrap();
        let options = ConversionOptions {
            max_colors: 4,
            ..ConversionOptions::default()
        };

        let pattern = service
            .convert_image(&image, options, ConversionBudget::unlimited())
            .unwrap();
        assert_eq!(pattern.palette.len(), 1);
        assert_eq!(pattern.palette[0].thread.id, "dmc_321");
        assert_eq!(pattern.dimensions.width_stitches, 4);
    }

    #[test]
    fn test_convert_bytes_rejects_garbage() {
        let service = ConversionService::new(catalog());
        let err = service
            .convert_bytes(b"nope", ConversionOptions::default(), ConversionBudget::unlimited())
            .unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[test]
    fn test_invalid_options_surface_as_pattern_error() {
        let service = ConversionService::new(catalog());
        let image = RgbImage::filled(2, 2, Rgb::new(0, 0, 0)).unwrap();
        let options = ConversionOptions {
            aida_count: 0,
            ..ConversionOptions::default()
        };
        let err = service
            .convert_image(&image, options, ConversionBudget::unlimited())
            .unwrap_err();
        assert!(matches!(err, AppError::Pattern(_)));
    }

    #[test]
    fn test_write_pattern_to_file() {
        let service = ConversionService::new(catalog());
        let image = RgbImage::filled(2, 2, Rgb::new(0, 0, 0)).unwrap();
        let pattern = service
            .convert_image(&image, ConversionOptions::default(), ConversionBudget::unlimited())
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pattern.json");
        write_pattern(&pattern, Some(&path)).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["palette"][0]["thread"]["id"], "dmc_310");
        assert_eq!(value["grid"]["rows"], serde_json::json!([[0, 0], [0, 0]]));
    }
}
