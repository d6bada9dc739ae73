//! Shared test utilities for `BoxCart`.
//!
//! This module provides common helper functions for setting up test sessions,
//! catalogs, and the in-memory defaults store.

#![allow(clippy::unwrap_used)]

use crate::config::fees::FeeConfig;
use crate::core::catalog::{BoxPreset, GiftCatalog, GiftItem};
use crate::core::recipient::RecipientInput;
use crate::core::session::CartSession;
use crate::errors::Result;
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Installs a tracing subscriber suitable for `cargo test` output.
/// Safe to call from every test; repeat installs are ignored.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` defaults store with tables initialized.
/// This is the standard setup for all store-touching tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A small catalog covering both flows: plain presets and a capacity-bound
/// build-your-own preset.
///
/// Gifts:
/// * `cocoa-trio`: $18.50
/// * `wool-socks`: $12.00
///
/// Presets:
/// * `holiday-classic`: $45.00 base, no capacity
/// * `build-your-own-small`: $20.00 base, capacity 5
#[must_use]
pub fn sample_catalog() -> GiftCatalog {
    GiftCatalog::new(
        vec![
            GiftItem {
                id: "cocoa-trio".to_string(),
                name: "Hot Cocoa Trio".to_string(),
                price: 18.5,
                category: "gourmet".to_string(),
                image: "cocoa.png".to_string(),
            },
            GiftItem {
                id: "wool-socks".to_string(),
                name: "Wool Socks".to_string(),
                price: 12.0,
                category: "cozy".to_string(),
                image: String::new(),
            },
        ],
        vec![
            BoxPreset {
                id: "holiday-classic".to_string(),
                name: "Holiday Classic".to_string(),
                size: Some("medium".to_string()),
                theme: Some("holiday".to_string()),
                base_price: 45.0,
                capacity: None,
            },
            BoxPreset {
                id: "build-your-own-small".to_string(),
                name: "Build Your Own (Small)".to_string(),
                size: Some("small".to_string()),
                theme: None,
                base_price: 20.0,
                capacity: Some(5),
            },
        ],
    )
}

/// Resolves one gift from the sample catalog by id.
#[must_use]
pub fn sample_gift(gift_id: &str) -> GiftItem {
    sample_catalog().lookup(gift_id).unwrap().clone()
}

/// Creates a fresh session over the sample catalog and canonical fee rates.
#[must_use]
pub fn test_session() -> CartSession {
    CartSession::new(sample_catalog(), FeeConfig::default())
}

/// Recipient input with just the required fields.
#[must_use]
pub fn recipient_input(name: &str, email: &str) -> RecipientInput {
    RecipientInput {
        name: name.to_string(),
        email: email.to_string(),
        phone: String::new(),
        address: String::new(),
        tag: String::new(),
    }
}

/// Recipient input with a shipping address already filled in.
#[must_use]
pub fn addressed_input(name: &str, email: &str) -> RecipientInput {
    RecipientInput {
        address: "12 Main St".to_string(),
        ..recipient_input(name, email)
    }
}
