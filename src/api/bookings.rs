//! Booking endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::booking::{
        Booking, BookingDetails, BookingQuery, CreateBooking, PaymentStatus, RescheduleBooking,
    },
};

use super::Operator;

/// Record a payment against a booking
#[derive(Deserialize, ToSchema)]
pub struct UpdatePaymentRequest {
    pub paid_amount: Decimal,
    /// Explicit override; otherwise derived from paid vs final amount
    pub payment_status: Option<PaymentStatus>,
}

/// List bookings
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(BookingQuery),
    responses(
        (status = 200, description = "Bookings, most recent first", body = Vec<Booking>)
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    Operator(_claims): Operator,
    Query(query): Query<BookingQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = state.services.bookings.list(query).await?;
    Ok(Json(bookings))
}

/// Get a booking with its slots
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = BookingDetails),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    Operator(_claims): Operator,
    Path(id): Path<i32>,
) -> AppResult<Json<BookingDetails>> {
    let details = state.services.bookings.get_details(id).await?;
    Ok(Json(details))
}

/// Look a booking up by its code (customer-facing)
#[utoipa::path(
    get,
    path = "/bookings/code/{code}",
    tag = "bookings",
    params(("code" = String, Path, description = "Booking code, e.g. PB-7KQ2MX")),
    responses(
        (status = 200, description = "Booking details", body = BookingDetails),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking_by_code(
    State(state): State<crate::AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<BookingDetails>> {
    let details = state.services.bookings.get_by_code(&code).await?;
    Ok(Json(details))
}

/// Create a booking claiming one or more available slots
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created", body = BookingDetails),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "A requested slot does not exist"),
        (status = 409, description = "A slot is unavailable or was claimed concurrently"),
        (status = 422, description = "Past slot date or discount code not applicable")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    Operator(_claims): Operator,
    Json(request): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<BookingDetails>)> {
    let details = state.services.bookings.create(request).await?;
    Ok((StatusCode::CREATED, Json(details)))
}

/// Reschedule, update or cancel a booking
#[utoipa::path(
    put,
    path = "/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = RescheduleBooking,
    responses(
        (status = 200, description = "Booking updated", body = BookingDetails),
        (status = 404, description = "Booking or target slot not found"),
        (status = 409, description = "Booking is cancelled or a target slot is taken"),
        (status = 422, description = "A target slot is in the past")
    )
)]
pub async fn reschedule_booking(
    State(state): State<crate::AppState>,
    Operator(_claims): Operator,
    Path(id): Path<i32>,
    Json(request): Json<RescheduleBooking>,
) -> AppResult<Json<BookingDetails>> {
    let details = state.services.bookings.reschedule(id, request).await?;
    Ok(Json(details))
}

/// Record a payment against a booking
#[utoipa::path(
    put,
    path = "/bookings/{id}/payment",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = UpdatePaymentRequest,
    responses(
        (status = 200, description = "Payment recorded", body = Booking),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Booking is cancelled")
    )
)]
pub async fn update_payment(
    State(state): State<crate::AppState>,
    Operator(_claims): Operator,
    Path(id): Path<i32>,
    Json(request): Json<UpdatePaymentRequest>,
) -> AppResult<Json<Booking>> {
    let booking = state
        .services
        .bookings
        .update_payment(id, request.paid_amount, request.payment_status)
        .await?;
    Ok(Json(booking))
}
