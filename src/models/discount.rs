//! Discount code model and request types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// How a discount value is applied to a subtotal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "discount_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// value is a percentage of the subtotal
    Percentage,
    /// value is a fixed amount, clamped to the subtotal
    Fixed,
}

/// Discount code model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DiscountCode {
    pub id: i32,
    /// Unique, stored upper-cased
    pub code: String,
    pub discount_type: DiscountType,
    pub value: Decimal,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    /// None means unlimited
    pub max_uses: Option<i32>,
    pub current_uses: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Create discount code request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDiscountCode {
    #[validate(length(min = 2, max = 40))]
    pub code: String,
    pub discount_type: DiscountType,
    pub value: Decimal,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    #[validate(range(min = 1))]
    pub max_uses: Option<i32>,
}

/// Update discount code request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDiscountCode {
    pub discount_type: Option<DiscountType>,
    pub value: Option<Decimal>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    /// None leaves the existing cap untouched
    #[validate(range(min = 1))]
    pub max_uses: Option<i32>,
    pub active: Option<bool>,
}
