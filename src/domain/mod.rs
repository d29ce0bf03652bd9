//! Pure business logic
//!
//! These modules perform no I/O; repositories feed them snapshots and apply
//! the plans they return inside a single transaction.

pub mod discount;
pub mod pricing;
pub mod reorder;
pub mod reschedule;
pub mod revenue;
