//! Asset loading with embedded fallbacks
//!
//! Two assets ship inside the binary: the default `config.yaml` and the
//! default thread catalog. Each can be overridden from the filesystem:
//!
//! - If the path is NOT configured: use the embedded asset only (no filesystem access)
//! - If the path IS configured and missing: seed it with the embedded asset, then use it
//! - If the path IS configured and present: use the file

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// Embedded default thread catalog
#[derive(RustEmbed)]
#[folder = "assets/"]
#[include = "*.yaml"]
struct EmbeddedCatalog;

const CONFIG_NAME: &str = "config.yaml";
const CATALOG_NAME: &str = "threads.yaml";

/// Asset category for selective operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    Config,
    Catalog,
}

/// Where a catalog was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Embedded,
    File(PathBuf),
}

impl CatalogSource {
    /// Path whose extension decides the catalog format.
    pub fn format_hint(&self) -> &Path {
        match self {
            CatalogSource::Embedded => Path::new(CATALOG_NAME),
            CatalogSource::File(path) => path,
        }
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Embedded => f.write_str("embedded"),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Report of seeding operations
#[derive(Debug, Default)]
pub struct SeedReport {
    pub config_seeded: bool,
    pub catalog_seeded: bool,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        !self.config_seeded && !self.catalog_seeded
    }
}

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Asset loader with optional filesystem override
pub struct AssetLoader {
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
    /// External thread catalog path (from CATALOG_FILE env var or config)
    catalog_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// Paths should be `Some` only if they were explicitly configured.
    /// If `None`, embedded assets are used exclusively.
    pub fn new(config_file: Option<PathBuf>, catalog_file: Option<PathBuf>) -> Self {
        Self {
            config_file,
            catalog_file,
        }
    }

    /// Same loader with a different catalog path.
    pub fn with_catalog_file(mut self, catalog_file: Option<PathBuf>) -> Self {
        self.catalog_file = catalog_file;
        self
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    pub fn catalog_file(&self) -> Option<&Path> {
        self.catalog_file.as_deref()
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
        }

        EmbeddedConfig::get(CONFIG_NAME)
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
            })
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Read the thread catalog
    ///
    /// A configured catalog path must exist; there is no embedded fallback
    /// once a path is set.
    pub fn read_catalog(&self) -> io::Result<(CatalogSource, Cow<'static, [u8]>)> {
        if let Some(ref path) = self.catalog_file {
            tracing::trace!(path = %path.display(), "Loading catalog from filesystem");
            let bytes = fs::read(path).map_err(|e| {
                io::Error::new(e.kind(), format!("{}: {e}", path.display()))
            })?;
            return Ok((CatalogSource::File(path.clone()), Cow::Owned(bytes)));
        }

        EmbeddedCatalog::get(CATALOG_NAME)
            .map(|f| {
                tracing::trace!("Loading catalog from embedded assets");
                (CatalogSource::Embedded, f.data)
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Embedded threads.yaml not found")
            })
    }

    /// Seed missing configured files with embedded assets
    ///
    /// Only operates on paths that were configured.
    /// Creates parent directories if they don't exist.
    pub fn seed_if_configured(&self) -> io::Result<SeedReport> {
        let mut report = SeedReport::default();

        if let Some(ref path) = self.config_file {
            if !path.exists() {
                if let Some(data) = EmbeddedConfig::get(CONFIG_NAME) {
                    write_with_parents(path, &data.data)?;
                    report.config_seeded = true;
                    tracing::info!(
                        path = %path.display(),
                        "Seeded config file with embedded default"
                    );
                }
            }
        }

        if let Some(ref path) = self.catalog_file {
            if !path.exists() && is_yaml(path) {
                if let Some(data) = EmbeddedCatalog::get(CATALOG_NAME) {
                    write_with_parents(path, &data.data)?;
                    report.catalog_seeded = true;
                    tracing::info!(
                        path = %path.display(),
                        "Seeded catalog file with embedded default"
                    );
                }
            }
        }

        Ok(report)
    }

    /// Extract embedded assets to filesystem (init command)
    ///
    /// Uses the configured paths (or defaults if not set).
    pub fn init(&self, categories: &[AssetCategory], force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();

        for category in categories {
            let (path, data) = match category {
                AssetCategory::Config => (
                    self.config_file
                        .clone()
                        .unwrap_or_else(|| PathBuf::from("./config.yaml")),
                    EmbeddedConfig::get(CONFIG_NAME).map(|f| f.data),
                ),
                AssetCategory::Catalog => (
                    self.catalog_file
                        .clone()
                        .unwrap_or_else(|| PathBuf::from("./threads.yaml")),
                    EmbeddedCatalog::get(CATALOG_NAME).map(|f| f.data),
                ),
            };

            if !force && path.exists() {
                report.skipped.push(path.display().to_string());
                continue;
            }
            if let Some(data) = data {
                write_with_parents(&path, &data)?;
                report.written.push(path.display().to_string());
            }
        }

        Ok(report)
    }

    /// List embedded assets by category (for display)
    pub fn list_embedded(category: AssetCategory) -> Vec<String> {
        match category {
            AssetCategory::Config => EmbeddedConfig::iter().map(|s| s.to_string()).collect(),
            AssetCategory::Catalog => EmbeddedCatalog::iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn write_with_parents(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, data)
}

// Only YAML is seeded; the embedded catalog is YAML.
fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml") | None
    )
}
