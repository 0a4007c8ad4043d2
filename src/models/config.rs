use crate::assets::AssetLoader;
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use stitch_pattern::{ConversionOptions, EdgeOptions, Inventory, Rgb};

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Cross stitch defaults
    #[serde(default)]
    pub conversion: ConversionConfig,

    /// Outline pattern defaults
    #[serde(default)]
    pub outline: OutlineConfig,

    /// Thread ids the user owns
    #[serde(default)]
    pub inventory: Vec<String>,

    /// Thread catalog file (overridden by CATALOG_FILE)
    #[serde(default)]
    pub catalog: Option<PathBuf>,
}

/// Defaults for `mulina convert`
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ConversionConfig {
    #[serde(default = "default_max_colors")]
    pub max_colors: usize,

    #[serde(default = "default_aida_count")]
    pub aida_count: u32,

    /// Brand filter; `null` searches every brand
    #[serde(default = "default_brand")]
    pub brand: Option<String>,

    #[serde(default)]
    pub dithering: bool,

    #[serde(default)]
    pub enhance_contrast: bool,

    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_restarts")]
    pub restarts: usize,

    #[serde(default = "default_max_dimension")]
    pub max_dimension: usize,
}

fn default_max_colors() -> usize {
    50
}

fn default_aida_count() -> u32 {
    14
}

fn default_brand() -> Option<String> {
    Some("DMC".to_string())
}

fn default_seed() -> u64 {
    42
}

fn default_restarts() -> usize {
    10
}

fn default_max_dimension() -> usize {
    stitch_pattern::DEFAULT_MAX_DIMENSION
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_colors: default_max_colors(),
            aida_count: default_aida_count(),
            brand: default_brand(),
            dithering: false,
            enhance_contrast: false,
            seed: default_seed(),
            restarts: default_restarts(),
            max_dimension: default_max_dimension(),
        }
    }
}

/// Defaults for outline patterns
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OutlineConfig {
    #[serde(default = "default_low_threshold")]
    pub low_threshold: f64,

    #[serde(default = "default_high_threshold")]
    pub high_threshold: f64,

    #[serde(default = "default_background", deserialize_with = "hex_color")]
    pub background: Rgb,

    #[serde(default = "default_outline", deserialize_with = "hex_color")]
    pub outline: Rgb,
}

fn default_low_threshold() -> f64 {
    50.0
}

fn default_high_threshold() -> f64 {
    150.0
}

fn default_background() -> Rgb {
    Rgb::new(255, 255, 255)
}

fn default_outline() -> Rgb {
    Rgb::new(0, 0, 0)
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            low_threshold: default_low_threshold(),
            high_threshold: default_high_threshold(),
            background: default_background(),
            outline: default_outline(),
        }
    }
}

fn hex_color<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rgb, D::Error> {
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        max_colors = config.conversion.max_colors,
                        aida_count = config.conversion.aida_count,
                        brand = config.conversion.brand.as_deref().unwrap_or("any"),
                        inventory = config.inventory.len(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Core conversion options seeded from this config
    pub fn conversion_options(&self) -> ConversionOptions {
        let c = &self.conversion;
        ConversionOptions {
            max_colors: c.max_colors,
            aida_count: c.aida_count,
            brand: c.brand.clone(),
            dithering: c.dithering,
            enhance_contrast: c.enhance_contrast,
            seed: c.seed,
            restarts: c.restarts,
            max_dimension: c.max_dimension,
            inventory: self.inventory.iter().cloned().collect::<Inventory>(),
            edge: EdgeOptions::new(self.outline.low_threshold, self.outline.high_threshold),
            background: self.outline.background,
            outline: self.outline.outline,
            ..ConversionOptions::default()
        }
    }
}
