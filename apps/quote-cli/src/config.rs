//! # Quote Configuration
//!
//! Price list overrides for the CLI, layered with the `config` crate.
//!
//! ## Source Precedence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  lowest                                                       highest   │
//! │                                                                         │
//! │  PricingConfig::default() ──► banner-quote.toml ──► BANNER_* env vars   │
//! │  (production price list)      (or --config path)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example File
//! ```toml
//! tax_rate_bps = 0
//! minimum_order_cents = 2500
//! log_filter = "info,banner_core=debug"
//!
//! [material_rates]
//! "13oz" = 475
//! ```
//!
//! Environment keys use `__` for nesting: `BANNER_TAX_RATE_BPS=0`,
//! `BANNER_MATERIAL_RATES__MESH=650`.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use banner_core::{CoreError, Material, PricingConfig};
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_NAME: &str = "banner-quote";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "BANNER";

/// Default log filter when neither `RUST_LOG` nor `log_filter` is set.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// CLI configuration. Every field is optional in the sources.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    pub tax_rate_bps: u32,
    pub multi_banner_discount_bps: u32,
    pub rope_cents_per_foot: i64,
    pub pole_pocket_setup_cents: i64,
    pub pole_pocket_cents_per_foot: i64,
    pub minimum_order_cents: i64,
    /// Per-material overrides, keyed by wire id (`"13oz"`, `"mesh"`).
    /// Materials not listed keep the production rate.
    pub material_rates: BTreeMap<String, i64>,
    pub log_filter: String,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        let pricing = PricingConfig::default();
        QuoteConfig {
            tax_rate_bps: pricing.tax_rate_bps,
            multi_banner_discount_bps: pricing.multi_banner_discount_bps,
            rope_cents_per_foot: pricing.rope_cents_per_foot,
            pole_pocket_setup_cents: pricing.pole_pocket_setup_cents,
            pole_pocket_cents_per_foot: pricing.pole_pocket_cents_per_foot,
            minimum_order_cents: pricing.minimum_order_cents,
            material_rates: BTreeMap::new(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl QuoteConfig {
    /// Loads the file (required when given explicitly) and environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let builder = config::Config::builder().add_source(file).add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Self::from_builder(builder)
    }

    pub(crate) fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Applies the overrides to the production price list and validates it.
    pub fn pricing(&self) -> Result<PricingConfig, ConfigError> {
        let mut pricing = PricingConfig {
            tax_rate_bps: self.tax_rate_bps,
            multi_banner_discount_bps: self.multi_banner_discount_bps,
            rope_cents_per_foot: self.rope_cents_per_foot,
            pole_pocket_setup_cents: self.pole_pocket_setup_cents,
            pole_pocket_cents_per_foot: self.pole_pocket_cents_per_foot,
            minimum_order_cents: self.minimum_order_cents,
            ..PricingConfig::default()
        };

        for (key, cents) in &self.material_rates {
            let material: Material = key.parse()?;
            pricing.material_rates.set_rate(material, *cents);
        }

        pricing.validate()?;
        Ok(pricing)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid price list: {0}")]
    Invalid(#[from] CoreError),
}
