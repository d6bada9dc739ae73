//! Entity module - Contains all SeaORM entity definitions for the defaults store.
//! The cart itself lives in memory for the life of the browsing session; only
//! named preference records are persisted.

pub mod saved_default;

// Re-export specific types to avoid conflicts
pub use saved_default::{
    Column as SavedDefaultColumn, Entity as SavedDefault, Model as SavedDefaultModel,
};
