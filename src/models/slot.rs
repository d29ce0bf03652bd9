//! Slot instance models (concrete dated bookable units) and maintenance blocks

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Occupancy state of a slot instance. States are exclusive: a slot is
/// either free, claimed by exactly one non-cancelled booking, or blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "slot_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Available,
    Booked,
    Maintenance,
}

/// Slot instance model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SlotInstance {
    pub id: i32,
    pub field_id: i32,
    pub shift_id: i32,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Price snapshot taken from the shift's weekday table at provisioning time
    pub price: Decimal,
    pub status: SlotStatus,
    /// Owning booking when status is booked
    pub booking_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Provision slots for a shift over an inclusive date range
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProvisionSlots {
    pub shift_id: i32,
    /// First date (YYYY-MM-DD)
    pub start_date: String,
    /// Last date, inclusive (YYYY-MM-DD)
    pub end_date: String,
}

/// Query parameters for the availability grid
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AvailabilityQuery {
    /// Date to list (YYYY-MM-DD)
    pub date: String,
}

/// One row of the availability grid: slot state plus, when booked,
/// who holds it (for operator display only)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AvailabilityEntry {
    pub slot_id: i32,
    pub shift_id: i32,
    pub shift_name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub price: Decimal,
    pub status: SlotStatus,
    pub booking_code: Option<String>,
    pub customer_name: Option<String>,
}

/// Maintenance block pinning a slot out of availability
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceBlock {
    pub id: i32,
    pub slot_id: i32,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create maintenance block request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMaintenance {
    pub slot_id: i32,
    pub reason: Option<String>,
}
