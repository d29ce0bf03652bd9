//! Repository layer for database operations

pub mod bookings;
pub mod discounts;
pub mod fields;
pub mod shifts;
pub mod slots;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub fields: fields::FieldsRepository,
    pub shifts: shifts::ShiftsRepository,
    pub slots: slots::SlotsRepository,
    pub bookings: bookings::BookingsRepository,
    pub discounts: discounts::DiscountsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            fields: fields::FieldsRepository::new(pool.clone()),
            shifts: shifts::ShiftsRepository::new(pool.clone()),
            slots: slots::SlotsRepository::new(pool.clone()),
            bookings: bookings::BookingsRepository::new(pool.clone()),
            discounts: discounts::DiscountsRepository::new(pool.clone()),
            pool,
        }
    }
}
