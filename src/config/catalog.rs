//! Catalog configuration loading from catalog.toml
//!
//! This module provides functionality to load the gift catalog from a TOML
//! configuration file: the individually priced gift items, the box presets a
//! user can start from, and an optional `[fees]` section overriding the
//! checkout fee rates. The core treats the parsed catalog as injected,
//! read-only reference data regardless of where it came from.

use crate::config::fees::FeeConfig;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire catalog.toml file
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// List of orderable gift items
    pub gifts: Vec<GiftItemConfig>,
    /// List of box presets offered by the flow
    #[serde(default)]
    pub boxes: Vec<BoxPresetConfig>,
    /// Fee-rate overrides; canonical rates apply when absent
    #[serde(default)]
    pub fees: FeeConfig,
}

/// Configuration for a single gift item
#[derive(Debug, Deserialize, Clone)]
pub struct GiftItemConfig {
    /// Stable catalog identifier (e.g., `"cocoa-trio"`)
    pub id: String,
    /// Display name of the gift
    pub name: String,
    /// Unit price in dollars
    pub price: f64,
    /// Category for organization (e.g., "gourmet", "wellness")
    pub category: String,
    /// Image asset reference
    #[serde(default)]
    pub image: String,
}

/// Configuration for a single box preset
#[derive(Debug, Deserialize, Clone)]
pub struct BoxPresetConfig {
    /// Stable preset identifier
    pub id: String,
    /// Display name of the box
    pub name: String,
    /// Physical size label (e.g., "small", "medium")
    #[serde(default)]
    pub size: Option<String>,
    /// Visual theme (e.g., "holiday", "welcome")
    #[serde(default)]
    pub theme: Option<String>,
    /// Price of the box before gift lines and add-ons
    pub base_price: f64,
    /// Maximum total gift-line quantity; only set for build-your-own presets
    #[serde(default)]
    pub capacity: Option<u32>,
}

/// Loads the catalog configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read catalog file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse catalog.toml: {e}"),
    })
}

/// Loads the catalog configuration from the default location (./catalog.toml)
pub fn load_default_catalog() -> Result<CatalogConfig> {
    load_catalog("catalog.toml")
}
