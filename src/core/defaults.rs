//! Saved preference records.
//!
//! Standalone preference sets (shipping defaults, customization defaults) are
//! saved under named keys as opaque serialized records. The core only needs a
//! get/set-by-key contract; the records are TOML strings in the
//! `saved_defaults` table and nothing else reads their contents.

use crate::{
    entities::{SavedDefault, saved_default},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::info;

/// Key for the saved shipping preferences.
pub const SHIPPING_DEFAULTS_KEY: &str = "shipping_defaults";

/// Key for the saved customization preferences.
pub const CUSTOMIZATION_DEFAULTS_KEY: &str = "customization_defaults";

/// Preferred shipping settings, reapplied to new campaigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingDefaults {
    /// Carrier name
    pub carrier: String,
    /// Service speed (e.g., "ground", "two-day")
    pub speed: String,
    /// Flat shipping cost in dollars
    pub cost: f64,
}

/// Preferred personalization settings, reapplied to new boxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizationDefaults {
    /// Preferred ribbon color name
    pub ribbon_color: String,
    /// Preferred packaging name
    pub packaging: String,
    /// Default gift message
    pub message: String,
}

/// Retrieves the raw serialized record stored under a key, if any.
pub async fn get_saved_value(db: &DatabaseConnection, key: &str) -> Result<Option<String>> {
    let record = SavedDefault::find()
        .filter(saved_default::Column::Key.eq(key))
        .one(db)
        .await?;

    Ok(record.map(|model| model.value))
}

/// Stores a raw serialized record under a key (UPSERT behavior).
pub async fn set_saved_value(db: &DatabaseConnection, key: &str, value: &str) -> Result<()> {
    let now = Utc::now().naive_utc();

    let existing = SavedDefault::find()
        .filter(saved_default::Column::Key.eq(key))
        .one(db)
        .await?;

    if let Some(record) = existing {
        let mut active_model: saved_default::ActiveModel = record.into();
        active_model.value = Set(value.to_string());
        active_model.updated_at = Set(now);
        active_model.update(db).await?;
    } else {
        let active_model = saved_default::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
            updated_at: Set(now),
            ..Default::default()
        };
        active_model.insert(db).await?;
    }

    info!("Saved defaults under key '{key}'");
    Ok(())
}

/// Serializes and stores a preference record under a named key.
pub async fn save_defaults<T: Serialize>(
    db: &DatabaseConnection,
    key: &str,
    record: &T,
) -> Result<()> {
    let value = toml::to_string(record).map_err(|e| Error::Config {
        message: format!("Failed to serialize defaults for '{key}': {e}"),
    })?;
    set_saved_value(db, key, &value).await
}

/// Loads and deserializes the preference record stored under a named key.
///
/// Returns `Ok(None)` when the key has never been saved.
pub async fn load_defaults<T: DeserializeOwned>(
    db: &DatabaseConnection,
    key: &str,
) -> Result<Option<T>> {
    let Some(value) = get_saved_value(db, key).await? else {
        return Ok(None);
    };

    toml::from_str(&value)
        .map(Some)
        .map_err(|e| Error::Config {
            message: format!("Failed to parse defaults for '{key}': {e}"),
        })
}
