// =============================================================================
// CONFIGURATION MODULE
// =============================================================================
// Loads host settings from environment variables.
//
// NOTES:
// - main() calls dotenvy first, so a local .env file feeds into this too
// - Every variable has a default; a storefront runs with no setup at all
// - Bad values fail at startup with a message naming the variable
// =============================================================================

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;

use crate::cart::DEFAULT_TAX_RATE;

#[derive(Debug, Clone)]
pub struct Config {
    /// JSON catalog to load instead of the built-in laptops
    /// (STOREFRONT_CATALOG_PATH)
    pub catalog_path: Option<PathBuf>,

    /// Sales tax applied at checkout, 0.0 to 1.0 (STOREFRONT_TAX_RATE)
    pub tax_rate: f64,

    /// Close the comparison picker when the third product is chosen
    /// (STOREFRONT_COMPARISON_AUTO_CLOSE)
    pub comparison_auto_close: bool,

    /// Install the Prometheus recorder (STOREFRONT_METRICS)
    pub metrics_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            tax_rate: DEFAULT_TAX_RATE,
            comparison_auto_close: true,
            metrics_enabled: false,
        }
    }
}

impl Config {
    // -------------------------------------------------------------------------
    // LOAD CONFIGURATION FROM ENVIRONMENT
    // -------------------------------------------------------------------------
    /// Creates a Config by reading the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Creates a Config from any key → value lookup.
    ///
    /// ```
    /// use storefront::config::Config;
    ///
    /// let config = Config::from_lookup(|key| match key {
    ///     "STOREFRONT_TAX_RATE" => Some("0.1".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.tax_rate, 0.1);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let tax_rate = match lookup("STOREFRONT_TAX_RATE") {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .context("Failed to parse STOREFRONT_TAX_RATE as a number")?,
            None => defaults.tax_rate,
        };
        if !(0.0..=1.0).contains(&tax_rate) {
            bail!("STOREFRONT_TAX_RATE must be between 0 and 1, got {}", tax_rate);
        }

        Ok(Self {
            catalog_path: lookup("STOREFRONT_CATALOG_PATH")
                .filter(|raw| !raw.trim().is_empty())
                .map(PathBuf::from),
            tax_rate,
            comparison_auto_close: parse_flag(
                lookup("STOREFRONT_COMPARISON_AUTO_CLOSE"),
                "STOREFRONT_COMPARISON_AUTO_CLOSE",
                defaults.comparison_auto_close,
            )?,
            metrics_enabled: parse_flag(
                lookup("STOREFRONT_METRICS"),
                "STOREFRONT_METRICS",
                defaults.metrics_enabled,
            )?,
        })
    }
}

fn parse_flag(raw: Option<String>, name: &str, default: bool) -> Result<bool> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{} must be a boolean, got {:?}", name, other),
    }
}
