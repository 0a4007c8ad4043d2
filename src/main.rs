use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mulina::assets::{AssetCategory, AssetLoader};
use mulina::models::AppConfig;
use mulina::services::{self, ConversionService};
use stitch_pattern::{
    convert_brand, delta_e, find_closest_thread, ConversionBudget, Inventory, PatternType, Rgb,
    ThreadCatalog,
};

#[derive(Parser)]
#[command(name = "mulina")]
#[command(about = "Turn images into cross-stitch patterns matched to real embroidery threads")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PNG or JPEG image into a pattern (JSON)
    Convert {
        /// Input PNG or JPEG file
        input: PathBuf,

        /// Output JSON file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Produce a two-color outline pattern instead of cross stitch
        #[arg(long)]
        outline: bool,

        /// Maximum number of colors
        #[arg(short, long)]
        colors: Option<usize>,

        /// Aida count in stitches per inch (e.g. 14)
        #[arg(short, long)]
        aida: Option<u32>,

        /// Finished width in centimeters
        #[arg(short, long)]
        width: Option<f64>,

        /// Only match threads of this brand (e.g. "DMC")
        #[arg(short, long)]
        brand: Option<String>,

        /// Match threads of every brand
        #[arg(long, conflicts_with = "brand")]
        any_brand: bool,

        /// Floyd-Steinberg dithering onto the reduced palette
        #[arg(long)]
        dither: bool,

        /// Enhance local contrast before reducing colors
        #[arg(long)]
        contrast: bool,

        /// Owned thread ids, comma-separated (e.g. "dmc_310,dmc_321")
        #[arg(long, value_delimiter = ',')]
        inventory: Vec<String>,

        /// Clustering seed
        #[arg(long)]
        seed: Option<u64>,

        /// Abort the conversion after this many seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Find the thread closest to a color
    Match {
        /// Color as hex (e.g. "#C72B3B")
        color: String,

        /// Only consider threads of this brand
        #[arg(short, long)]
        brand: Option<String>,

        /// Owned thread ids, comma-separated
        #[arg(long, value_delimiter = ',')]
        inventory: Vec<String>,
    },
    /// Find the equivalent of a thread in another brand
    ConvertBrand {
        /// Thread code in the source brand (e.g. "321")
        code: String,

        /// Source brand
        #[arg(long)]
        from: String,

        /// Target brand
        #[arg(long)]
        to: String,
    },
    /// List threads in the catalog
    Threads {
        /// Only list threads of this brand
        #[arg(short, long)]
        brand: Option<String>,
    },
    /// Extract embedded assets to filesystem for customization
    Init {
        /// Extract config.yaml
        #[arg(long)]
        config: bool,

        /// Extract the thread catalog
        #[arg(long)]
        catalog: bool,

        /// Extract all assets
        #[arg(long)]
        all: bool,

        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert {
            input,
            output,
            outline,
            colors,
            aida,
            width,
            brand,
            any_brand,
            dither,
            contrast,
            inventory,
            seed,
            timeout,
        }) => {
            init_logging();
            let (config, loader) = open_assets();
            let service = ConversionService::new(Arc::new(load_catalog(&loader)?));

            let mut options = config.conversion_options();
            if outline {
                options.pattern_type = PatternType::Outline;
            }
            if let Some(colors) = colors {
                options.max_colors = colors;
            }
            if let Some(aida) = aida {
                options.aida_count = aida;
            }
            options.target_width_cm = width;
            if any_brand {
                options.brand = None;
            } else if brand.is_some() {
                options.brand = brand;
            }
            options.dithering |= dither;
            options.enhance_contrast |= contrast;
            if !inventory.is_empty() {
                options.inventory = inventory.into_iter().collect();
            }
            if let Some(seed) = seed {
                options.seed = seed;
            }

            let budget = match timeout {
                Some(secs) => {
                    ConversionBudget::unlimited().with_timeout(Duration::from_secs(secs))
                }
                None => ConversionBudget::unlimited(),
            };

            let pattern = service
                .convert_file(&input, options, budget)
                .with_context(|| format!("Failed to convert {}", input.display()))?;
            services::write_pattern(&pattern, output.as_deref())?;

            if let Some(ref path) = output {
                println!(
                    "Wrote {} ({}x{} grid, {} stitches, {} colors, {:.1}x{:.1} cm, ~{} min)",
                    path.display(),
                    pattern.dimensions.width_stitches,
                    pattern.dimensions.height_stitches,
                    pattern.stitch_count(),
                    pattern.palette.len(),
                    pattern.dimensions.width_cm,
                    pattern.dimensions.height_cm,
                    pattern.estimated_minutes,
                );
            }
            Ok(())
        }
        Some(Commands::Match {
            color,
            brand,
            inventory,
        }) => {
            init_logging();
            let (config, loader) = open_assets();
            let catalog = load_catalog(&loader)?;

            let rgb: Rgb = color
                .parse()
                .with_context(|| format!("Invalid color: {color}"))?;
            let inventory: Inventory = if inventory.is_empty() {
                config.inventory.iter().cloned().collect()
            } else {
                inventory.into_iter().collect()
            };
            let owned = (!inventory.is_empty()).then_some(&inventory);

            let result = find_closest_thread(rgb, &catalog, brand.as_deref(), owned)?;
            let t = result.thread;
            println!(
                "{} {} {}  {}  dE {:.2} ({}){}",
                t.brand(),
                t.code(),
                t.name(),
                t.rgb(),
                result.distance,
                result.quality,
                if result.from_inventory { "  [owned]" } else { "" }
            );
            Ok(())
        }
        Some(Commands::ConvertBrand { code, from, to }) => {
            init_logging();
            let (_, loader) = open_assets();
            let catalog = load_catalog(&loader)?;

            match convert_brand(&code, &from, &to, &catalog)? {
                Some(target) => {
                    let source = catalog
                        .find_code(&from, &code)
                        .context("Source thread disappeared from catalog")?;
                    println!(
                        "{from} {code} {} -> {to} {} {}  dE {:.2}",
                        source.name(),
                        target.code(),
                        target.name(),
                        delta_e(source.lab(), target.lab())
                    );
                    Ok(())
                }
                None => anyhow::bail!("{from} {code} is not in the catalog"),
            }
        }
        Some(Commands::Threads { brand }) => {
            init_logging();
            let (_, loader) = open_assets();
            let catalog = load_catalog(&loader)?;
            run_threads_command(&catalog, brand.as_deref())
        }
        Some(Commands::Init {
            config,
            catalog,
            all,
            force,
            list,
        }) => run_init_command(config, catalog, all, force, list),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Log to stderr so JSON on stdout stays clean
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mulina=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Config plus an asset loader pointing at the effective catalog.
///
/// CATALOG_FILE wins over the `catalog` key in config.yaml.
fn open_assets() -> (AppConfig, AssetLoader) {
    let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
    let loader = AssetLoader::new(config_file, None);
    let config = AppConfig::load_from_assets(&loader);

    let catalog_file = std::env::var("CATALOG_FILE")
        .ok()
        .map(PathBuf::from)
        .or_else(|| config.catalog.clone());
    let loader = loader.with_catalog_file(catalog_file);

    // Seed if configured paths are missing
    if let Err(e) = loader.seed_if_configured() {
        tracing::warn!(%e, "Failed to seed assets");
    }

    (config, loader)
}

fn load_catalog(loader: &AssetLoader) -> anyhow::Result<ThreadCatalog> {
    let (_, catalog) = services::load_catalog(loader)?;
    Ok(catalog)
}

/// Print catalog threads as a table
fn run_threads_command(catalog: &ThreadCatalog, brand: Option<&str>) -> anyhow::Result<()> {
    let threads: Vec<_> = match brand {
        Some(b) => catalog.by_brand(b).collect(),
        None => catalog.threads().iter().collect(),
    };

    if threads.is_empty() {
        anyhow::bail!(
            "No threads for brand {}; known brands: {}",
            brand.unwrap_or("(any)"),
            catalog.brands().join(", ")
        );
    }

    println!("{:<16} {:<8} {:<8} {:<8} NAME", "ID", "BRAND", "CODE", "COLOR");
    for t in &threads {
        println!(
            "{:<16} {:<8} {:<8} {:<8} {}",
            t.id(),
            t.brand(),
            t.code(),
            t.rgb().to_hex(),
            t.name()
        );
    }
    println!("\n{} threads", threads.len());
    Ok(())
}

/// Extract embedded assets to filesystem
fn run_init_command(
    config: bool,
    catalog: bool,
    all: bool,
    force: bool,
    list: bool,
) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        println!("Config:");
        for f in AssetLoader::list_embedded(AssetCategory::Config) {
            println!("  {f}");
        }
        println!("\nCatalog:");
        for f in AssetLoader::list_embedded(AssetCategory::Catalog) {
            println!("  {f}");
        }
        return Ok(());
    }

    let mut categories = Vec::new();
    if all || config {
        categories.push(AssetCategory::Config);
    }
    if all || catalog {
        categories.push(AssetCategory::Catalog);
    }

    if categories.is_empty() {
        eprintln!("No categories specified. Use --all, --config, or --catalog");
        eprintln!("\nRun 'mulina init --list' to see embedded assets.");
        std::process::exit(1);
    }

    let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
    let catalog_file = std::env::var("CATALOG_FILE").ok().map(PathBuf::from);
    let loader = AssetLoader::new(config_file, catalog_file);

    let report = loader.init(&categories, force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    if report.written.is_empty() && report.skipped.is_empty() {
        println!("No files to extract.");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var("CONFIG_FILE").ok();
    let catalog_file = std::env::var("CATALOG_FILE").ok();
    let rust_log = std::env::var("RUST_LOG").ok();

    println!("Mulina v{VERSION}");
    println!("Cross-stitch patterns from images\n");

    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE  = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  CATALOG_FILE = {}",
        catalog_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG     = {}",
        rust_log.as_deref().unwrap_or("mulina=info (default)")
    );

    println!("\nAsset Sources:");

    let config_source = match config_file {
        Some(ref path) if PathBuf::from(path).exists() => path.to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("  Config:  {config_source}");

    let loader = AssetLoader::new(config_file.map(PathBuf::from), None);
    let config = AppConfig::load_from_assets(&loader);
    let loader = loader.with_catalog_file(
        catalog_file
            .map(PathBuf::from)
            .or_else(|| config.catalog.clone()),
    );

    fn plural(n: usize) -> &'static str {
        if n == 1 {
            "thread"
        } else {
            "threads"
        }
    }

    match services::load_catalog(&loader) {
        Ok((source, catalog)) => {
            println!(
                "  Catalog: {source} ({} {})",
                catalog.len(),
                plural(catalog.len())
            );
            for brand in catalog.brands() {
                let count = catalog.by_brand(brand).count();
                println!("    {brand:<10} {count} {}", plural(count));
            }
        }
        Err(e) => println!("  Catalog: unavailable ({e})"),
    }

    let c = &config.conversion;
    println!("\nConversion Defaults:");
    println!("  max colors  {}", c.max_colors);
    println!("  aida count  {}", c.aida_count);
    println!("  brand       {}", c.brand.as_deref().unwrap_or("(any)"));
    println!("  dithering   {}", c.dithering);
    println!("  contrast    {}", c.enhance_contrast);
    println!("  inventory   {} owned", config.inventory.len());

    println!("\nCommands:");
    println!("  mulina convert        Convert a PNG or JPEG into a pattern");
    println!("  mulina match          Find the closest thread to a color");
    println!("  mulina convert-brand  Find a thread's equivalent in another brand");
    println!("  mulina threads        List catalog threads");
    println!("  mulina init           Extract embedded assets");
    println!("\nRun 'mulina --help' for more details.");
}
