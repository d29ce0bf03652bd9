//! Booking model (aggregate root over claimed slots) and request types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::slot::SlotInstance;

/// Payment state, driven by paid_amount vs final_amount but operator-overridable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    PartiallyPaid,
    FullyPaid,
}

/// Booking model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: i32,
    /// Human-readable reference (e.g. "PB-K27F3A")
    pub booking_code: String,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    /// Sum of claimed slot prices
    pub subtotal: Decimal,
    pub discount_code_id: Option<i32>,
    pub discount_amount: Decimal,
    /// subtotal - discount_amount, never negative
    pub final_amount: Decimal,
    pub paid_amount: Decimal,
    pub payment_status: PaymentStatus,
    /// Terminal once set; no further mutation is permitted
    pub cancelled: bool,
    pub player_count: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Booking with its claimed slots, for detail views
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: Booking,
    pub slots: Vec<SlotInstance>,
}

/// Create booking request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBooking {
    #[validate(length(min = 1, max = 120))]
    pub customer_name: String,
    #[validate(length(max = 40))]
    pub customer_phone: Option<String>,
    #[validate(email)]
    pub customer_email: Option<String>,
    /// Slot instances to claim; must be non-empty and all AVAILABLE
    pub slot_ids: Vec<i32>,
    /// Optional promotional code
    pub discount_code: Option<String>,
    #[validate(range(min = 1))]
    pub player_count: Option<i32>,
    pub notes: Option<String>,
}

/// Reschedule / update / cancel request. When `cancel` is true all other
/// fields are ignored and the booking is terminated.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RescheduleBooking {
    /// New slot membership; omitted means keep the current slots
    pub slot_ids: Option<Vec<i32>>,
    #[validate(length(min = 1, max = 120))]
    pub customer_name: Option<String>,
    #[validate(length(max = 40))]
    pub customer_phone: Option<String>,
    #[validate(email)]
    pub customer_email: Option<String>,
    #[validate(range(min = 1))]
    pub player_count: Option<i32>,
    pub notes: Option<String>,
    pub paid_amount: Option<Decimal>,
    /// Explicit operator override; otherwise derived from paid vs final
    pub payment_status: Option<PaymentStatus>,
    #[serde(default)]
    pub cancel: bool,
}

/// Query parameters for listing bookings
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookingQuery {
    /// Restrict to bookings with a slot on this date (YYYY-MM-DD)
    pub date: Option<String>,
    /// Restrict to bookings with a slot on this field
    pub field_id: Option<i32>,
    /// Include cancelled bookings (default false)
    pub include_cancelled: Option<bool>,
}
