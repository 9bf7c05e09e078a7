//! # banner-quote
//!
//! Operator command line for the Banner Forge quote engine. Prints JSON on
//! stdout; logs go to stderr.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Parse arguments (clap)                                              │
//! │  2. Load QuoteConfig: defaults → TOML file → BANNER_* environment       │
//! │  3. Initialize logging (RUST_LOG, else config log_filter)               │
//! │  4. Build PricingConfig (validated)                                     │
//! │  5. Run command → JSON on stdout                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use banner_core::layout::{FitMode, Size};
use banner_core::prompt::{AspectRatio, StyleOptions, TargetSize};
use banner_core::{BannerSpec, Grommets, Material, PolePockets};

use crate::config::QuoteConfig;

#[derive(Parser)]
#[command(name = "banner-quote")]
#[command(about = "Price banners, fit artwork and derive prompt cache keys")]
#[command(version)]
struct Cli {
    /// Config file (default: ./banner-quote.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Price a single banner specification
    Price {
        /// Width in inches
        #[arg(long)]
        width: f64,
        /// Height in inches
        #[arg(long)]
        height: f64,
        #[arg(long, default_value_t = 1)]
        quantity: i64,
        /// 13oz, 15oz, 18oz or mesh
        #[arg(long, default_value = "13oz")]
        material: Material,
        /// none, every-2-3ft, every-1-2ft, 4-corners, top-corners, ...
        #[arg(long, default_value = "none")]
        grommets: Grommets,
        /// none, top, bottom, left, right or top-bottom
        #[arg(long, default_value = "none")]
        pole_pockets: PolePockets,
        /// Add rope to the hem
        #[arg(long)]
        rope: bool,
    },
    /// Price an order file (JSON: {"items": [...], "promo": {...}})
    Order {
        file: PathBuf,
        /// Fail when the total is below the minimum order
        #[arg(long)]
        enforce_minimum: bool,
    },
    /// Compute the artwork placement rectangle on a banner
    Fit {
        /// Banner width in inches
        #[arg(long)]
        width: f64,
        /// Banner height in inches
        #[arg(long)]
        height: f64,
        /// Artwork width in pixels
        #[arg(long)]
        image_width: f64,
        /// Artwork height in pixels
        #[arg(long)]
        image_height: f64,
        /// contain, cover or stretch
        #[arg(long, default_value = "contain")]
        mode: FitMode,
        #[arg(long, default_value = "none")]
        grommets: Grommets,
    },
    /// Derive the cache key for an AI generation request
    PromptKey {
        prompt: String,
        /// 1:1, 4:3, 3:2, 16:9 or 2:3
        #[arg(long, default_value = "1:1")]
        aspect: AspectRatio,
        /// WIDTHxHEIGHT (default: the aspect ratio's generation size)
        #[arg(long)]
        size: Option<TargetSize>,
        #[arg(long)]
        mood: Option<String>,
        #[arg(long)]
        theme: Option<String>,
        #[arg(long)]
        color_scheme: Option<String>,
    },
    /// Generate a generation (gen_) or selection (sel_) id
    NewId {
        #[arg(long)]
        selection: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let quote_config = QuoteConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&quote_config.log_filter);
    let pricing = quote_config.pricing()?;
    debug!(?pricing, "Price list ready");

    match cli.command {
        Command::Price {
            width,
            height,
            quantity,
            material,
            grommets,
            pole_pockets,
            rope,
        } => {
            let spec = BannerSpec::new(width, height, quantity, material)
                .with_grommets(grommets)
                .with_pole_pockets(pole_pockets)
                .with_rope(rope);
            emit(&commands::price(spec, &pricing)?, cli.pretty)
        }
        Command::Order {
            file,
            enforce_minimum,
        } => emit(&commands::order(&file, &pricing, enforce_minimum)?, cli.pretty),
        Command::Fit {
            width,
            height,
            image_width,
            image_height,
            mode,
            grommets,
        } => emit(
            &commands::fit(
                Size::new(width, height),
                Size::new(image_width, image_height),
                mode,
                grommets,
            )?,
            cli.pretty,
        ),
        Command::PromptKey {
            prompt,
            aspect,
            size,
            mood,
            theme,
            color_scheme,
        } => {
            let style = StyleOptions {
                mood,
                theme,
                color_scheme,
            };
            emit(&commands::prompt_key(&prompt, aspect, style, size)?, cli.pretty)
        }
        Command::NewId { selection } => {
            println!("{}", commands::new_id(selection));
            Ok(())
        }
    }
}

/// Logs to stderr. `RUST_LOG` wins over the configured filter.
fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn emit<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
