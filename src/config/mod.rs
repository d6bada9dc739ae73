/// Catalog configuration loading from catalog.toml
pub mod catalog;

/// Defaults-store connection management
pub mod database;

/// Fee-rate configuration for checkout pricing
pub mod fees;
