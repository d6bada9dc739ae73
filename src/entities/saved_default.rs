//! Saved-default entity - Stores named preference records as key-value pairs.
//! Used for standalone preference sets such as shipping defaults and
//! customization defaults, serialized as opaque strings under stable keys.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Saved-default database model - stores key-value preference records
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "saved_defaults")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Record key (e.g., `"shipping_defaults"`)
    pub key: String,
    /// Serialized record stored as an opaque string
    pub value: String,
    /// When this record was last modified
    pub updated_at: DateTime,
}

/// `SavedDefault` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
