//! Field (playing surface) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Field model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Field {
    pub id: i32,
    /// Display name (e.g. "Pitch A")
    pub name: String,
    /// Maximum number of players
    pub capacity: i32,
    /// Inactive fields are hidden and excluded from the rank sequence
    pub active: bool,
    /// Position in operator-defined ordering; 1..N among active fields
    pub display_rank: i32,
    /// Image filename in external media storage
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create field request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateField {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(range(min = 1))]
    pub capacity: i32,
    pub image: Option<String>,
}

/// Update field request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateField {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    pub active: Option<bool>,
    pub image: Option<String>,
}

/// Move a field to a new position in the display ordering
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReorderFields {
    /// Zero-based target index within the active-field sequence
    pub new_index: usize,
}
