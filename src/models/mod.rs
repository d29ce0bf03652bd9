//! Data models for Pitchbook

pub mod booking;
pub mod discount;
pub mod field;
pub mod operator;
pub mod shift;
pub mod slot;

// Re-export commonly used types
pub use booking::{Booking, PaymentStatus};
pub use discount::{DiscountCode, DiscountType};
pub use field::Field;
pub use shift::Shift;
pub use slot::{SlotInstance, SlotStatus};
