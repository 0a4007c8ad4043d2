//! Thread catalog files
//!
//! A catalog file is YAML or JSON with a top-level `threads` list:
//!
//! ```yaml
//! threads:
//!   - id: dmc_321
//!     brand: DMC
//!     code: "321"
//!     name: Red
//!     rgb: [199, 43, 59]     # or hex: "#c72b3b"
//!     lab: [44.5, 60.5, 30.2] # optional
//! ```

use std::path::Path;

use serde::{Deserialize, Deserializer};
use stitch_pattern::{Lab, Rgb, ThreadCatalog, ThreadRecord};

use crate::assets::{AssetLoader, CatalogSource};
use crate::error::CatalogError;

/// Serialization format of a catalog file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Yaml,
    Json,
}

impl CatalogFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Ok(Self::Yaml)
            }
            _ => Err(CatalogError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    threads: Vec<ThreadEntry>,
}

#[derive(Debug, Deserialize)]
struct ThreadEntry {
    id: String,
    brand: String,
    #[serde(deserialize_with = "code_string")]
    code: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    rgb: Option<Rgb>,
    #[serde(default)]
    hex: Option<String>,
    #[serde(default)]
    lab: Option<Lab>,
}

/// Codes are strings, but numeric codes are commonly written unquoted.
fn code_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(u64),
    }

    Ok(match Code::deserialize(deserializer)? {
        Code::Text(s) => s,
        Code::Number(n) => n.to_string(),
    })
}

impl ThreadEntry {
    fn into_record(self) -> Result<ThreadRecord, CatalogError> {
        let rgb = match (self.rgb, self.hex.as_deref()) {
            (Some(rgb), _) => rgb,
            (None, Some(hex)) => hex.parse().map_err(|source| CatalogError::InvalidHex {
                id: self.id.clone(),
                source,
            })?,
            (None, None) => return Err(CatalogError::MissingColor { id: self.id }),
        };

        Ok(ThreadRecord {
            id: self.id,
            brand: self.brand,
            code: self.code,
            name: self.name,
            rgb,
            lab: self.lab,
        })
    }
}

/// Parse catalog bytes in the given format.
pub fn parse_catalog(bytes: &[u8], format: CatalogFormat) -> Result<ThreadCatalog, CatalogError> {
    let file: CatalogFile = match format {
        CatalogFormat::Yaml => serde_yaml::from_slice(bytes)?,
        CatalogFormat::Json => serde_json::from_slice(bytes)?,
    };

    if file.threads.is_empty() {
        return Err(CatalogError::Empty);
    }

    let records = file
        .threads
        .into_iter()
        .map(ThreadEntry::into_record)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ThreadCatalog::from_records(records)?)
}

/// Read a catalog file from disk.
pub fn load_catalog_file(path: &Path) -> Result<ThreadCatalog, CatalogError> {
    let format = CatalogFormat::from_path(path)?;
    let bytes = std::fs::read(path)?;
    parse_catalog(&bytes, format)
}

/// Load the catalog the loader points at (file or embedded).
pub fn load_catalog(loader: &AssetLoader) -> Result<(CatalogSource, ThreadCatalog), CatalogError> {
    let (source, bytes) = loader.read_catalog()?;
    let format = CatalogFormat::from_path(source.format_hint())?;
    let catalog = parse_catalog(&bytes, format)?;

    tracing::info!(
        source = %source,
        threads = catalog.len(),
        brands = catalog.brands().len(),
        "Loaded thread catalog"
    );

    Ok((source, catalog))
}
