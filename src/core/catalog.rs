//! Read-only gift catalog lookup.
//!
//! The catalog maps gift identifiers to their name, price, and category so a
//! stored `(gift_id, quantity)` pair can always be resolved back to a cost.
//! It is injected reference data: built from the parsed catalog file or
//! assembled directly, and never mutated by the cart.

use crate::config::catalog::{BoxPresetConfig, CatalogConfig, GiftItemConfig};
use std::collections::HashMap;

/// One orderable gift item.
#[derive(Debug, Clone, PartialEq)]
pub struct GiftItem {
    /// Stable catalog identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Unit price in dollars
    pub price: f64,
    /// Category for organization
    pub category: String,
    /// Image asset reference
    pub image: String,
}

impl From<GiftItemConfig> for GiftItem {
    fn from(config: GiftItemConfig) -> Self {
        Self {
            id: config.id,
            name: config.name,
            price: config.price,
            category: config.category,
            image: config.image,
        }
    }
}

/// One box preset a user can start a box from.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxPreset {
    /// Stable preset identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Physical size label
    pub size: Option<String>,
    /// Visual theme
    pub theme: Option<String>,
    /// Price before gift lines and add-ons
    pub base_price: f64,
    /// Maximum total gift-line quantity, set only for build-your-own presets
    pub capacity: Option<u32>,
}

impl From<BoxPresetConfig> for BoxPreset {
    fn from(config: BoxPresetConfig) -> Self {
        Self {
            id: config.id,
            name: config.name,
            size: config.size,
            theme: config.theme,
            base_price: config.base_price,
            capacity: config.capacity,
        }
    }
}

/// Read-only lookup over gift items and box presets.
#[derive(Debug, Clone, Default)]
pub struct GiftCatalog {
    items: HashMap<String, GiftItem>,
    presets: Vec<BoxPreset>,
}

impl GiftCatalog {
    /// Builds a catalog from already-resolved items and presets.
    #[must_use]
    pub fn new(items: Vec<GiftItem>, presets: Vec<BoxPreset>) -> Self {
        let items = items.into_iter().map(|item| (item.id.clone(), item)).collect();
        Self { items, presets }
    }

    /// Builds a catalog from a parsed catalog file.
    #[must_use]
    pub fn from_config(config: CatalogConfig) -> Self {
        Self::new(
            config.gifts.into_iter().map(Into::into).collect(),
            config.boxes.into_iter().map(Into::into).collect(),
        )
    }

    /// Resolves a gift identifier to its catalog entry.
    #[must_use]
    pub fn lookup(&self, gift_id: &str) -> Option<&GiftItem> {
        self.items.get(gift_id)
    }

    /// Resolves a preset identifier to its catalog entry.
    #[must_use]
    pub fn preset(&self, preset_id: &str) -> Option<&BoxPreset> {
        self.presets.iter().find(|preset| preset.id == preset_id)
    }

    /// All box presets in catalog order.
    #[must_use]
    pub fn presets(&self) -> &[BoxPreset] {
        &self.presets
    }

    /// Number of gift items in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no gift items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
