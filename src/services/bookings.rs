//! Booking service

use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::booking::{
        Booking, BookingDetails, BookingQuery, CreateBooking, PaymentStatus, RescheduleBooking,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
}

impl BookingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: BookingQuery) -> AppResult<Vec<Booking>> {
        self.repository.bookings.list(&query).await
    }

    pub async fn get_details(&self, id: i32) -> AppResult<BookingDetails> {
        self.repository.bookings.get_details(id).await
    }

    pub async fn get_by_code(&self, code: &str) -> AppResult<BookingDetails> {
        let booking = self.repository.bookings.get_by_code(code).await?;
        self.repository.bookings.get_details(booking.id).await
    }

    pub async fn create(&self, data: CreateBooking) -> AppResult<BookingDetails> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let booking = self.repository.bookings.create(&data).await?;
        self.repository.bookings.get_details(booking.id).await
    }

    /// Reschedule, update or cancel. Slot membership changes, customer field
    /// edits and payment updates all go through the same atomic path.
    pub async fn reschedule(&self, id: i32, data: RescheduleBooking) -> AppResult<BookingDetails> {
        if let Some(paid) = data.paid_amount {
            if paid < Decimal::ZERO {
                return Err(AppError::Validation(
                    "paid_amount must not be negative".to_string(),
                ));
            }
        }
        let booking = self.repository.bookings.reschedule(id, &data).await?;
        self.repository.bookings.get_details(booking.id).await
    }

    pub async fn update_payment(
        &self,
        id: i32,
        paid_amount: Decimal,
        payment_status: Option<PaymentStatus>,
    ) -> AppResult<Booking> {
        if paid_amount < Decimal::ZERO {
            return Err(AppError::Validation(
                "paid_amount must not be negative".to_string(),
            ));
        }
        self.repository
            .bookings
            .update_payment(id, paid_amount, payment_status)
            .await
    }
}
