//! Business logic services

pub mod bookings;
pub mod discounts;
pub mod fields;
pub mod revenue;
pub mod shifts;
pub mod slots;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub fields: fields::FieldsService,
    pub shifts: shifts::ShiftsService,
    pub slots: slots::SlotsService,
    pub bookings: bookings::BookingsService,
    pub discounts: discounts::DiscountsService,
    pub revenue: revenue::RevenueService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            fields: fields::FieldsService::new(repository.clone()),
            shifts: shifts::ShiftsService::new(repository.clone()),
            slots: slots::SlotsService::new(repository.clone()),
            bookings: bookings::BookingsService::new(repository.clone()),
            discounts: discounts::DiscountsService::new(repository.clone()),
            revenue: revenue::RevenueService::new(repository),
        }
    }
}
