//! Shift models (recurring time blocks with per-weekday pricing)

use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Per-weekday price table, indexed Sunday..Saturday
#[derive(Debug, Clone, Copy)]
pub struct WeekdayPrices(pub [Decimal; 7]);

/// Shift model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Shift {
    pub id: i32,
    /// Owning field ID
    pub field_id: i32,
    /// Shift name (e.g. "Evening 18-20")
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub price_sun: Decimal,
    pub price_mon: Decimal,
    pub price_tue: Decimal,
    pub price_wed: Decimal,
    pub price_thu: Decimal,
    pub price_fri: Decimal,
    pub price_sat: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Shift {
    /// Price table as a Sunday-first array
    pub fn weekday_prices(&self) -> WeekdayPrices {
        WeekdayPrices([
            self.price_sun,
            self.price_mon,
            self.price_tue,
            self.price_wed,
            self.price_thu,
            self.price_fri,
            self.price_sat,
        ])
    }
}

/// Create shift request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateShift {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    /// Start time (HH:MM)
    pub start_time: String,
    /// End time (HH:MM)
    pub end_time: String,
    /// Prices for Sunday through Saturday
    #[validate(length(min = 7, max = 7))]
    pub prices: Vec<Decimal>,
}

/// Update shift request; price edits affect only slots provisioned afterward
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateShift {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    /// Start time (HH:MM)
    pub start_time: Option<String>,
    /// End time (HH:MM)
    pub end_time: Option<String>,
    /// Prices for Sunday through Saturday
    #[validate(length(min = 7, max = 7))]
    pub prices: Option<Vec<Decimal>>,
}
