//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bookings, discounts, fields, health, revenue, shifts, slots};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pitchbook API",
        version = "1.0.0",
        description = "Sports facility booking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Fields
        fields::list_fields,
        fields::get_field,
        fields::create_field,
        fields::update_field,
        fields::reorder_field,
        // Shifts
        shifts::list_shifts,
        shifts::create_shift,
        shifts::update_shift,
        shifts::delete_shift,
        // Slots
        slots::provision_slots,
        slots::get_availability,
        slots::create_maintenance,
        slots::list_maintenance,
        slots::delete_maintenance,
        slots::delete_slot,
        // Bookings
        bookings::list_bookings,
        bookings::get_booking,
        bookings::get_booking_by_code,
        bookings::create_booking,
        bookings::reschedule_booking,
        bookings::update_payment,
        // Discounts
        discounts::list_discounts,
        discounts::check_discount,
        discounts::create_discount,
        discounts::update_discount,
        discounts::toggle_discount,
        discounts::delete_discount,
        // Revenue
        revenue::get_revenue,
        revenue::get_summary,
    ),
    components(
        schemas(
            // Fields
            crate::models::field::Field,
            crate::models::field::CreateField,
            crate::models::field::UpdateField,
            crate::models::field::ReorderFields,
            fields::FieldListQuery,
            // Shifts
            crate::models::shift::Shift,
            crate::models::shift::CreateShift,
            crate::models::shift::UpdateShift,
            // Slots
            crate::models::slot::SlotInstance,
            crate::models::slot::SlotStatus,
            crate::models::slot::ProvisionSlots,
            crate::models::slot::AvailabilityEntry,
            crate::models::slot::MaintenanceBlock,
            crate::models::slot::CreateMaintenance,
            // Bookings
            crate::models::booking::Booking,
            crate::models::booking::BookingDetails,
            crate::models::booking::CreateBooking,
            crate::models::booking::RescheduleBooking,
            crate::models::booking::PaymentStatus,
            bookings::UpdatePaymentRequest,
            // Discounts
            crate::models::discount::DiscountCode,
            crate::models::discount::DiscountType,
            crate::models::discount::CreateDiscountCode,
            crate::models::discount::UpdateDiscountCode,
            // Revenue
            crate::services::revenue::RevenueReport,
            crate::services::revenue::DashboardSummary,
            crate::domain::revenue::RevenueBucket,
            crate::domain::revenue::Granularity,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "fields", description = "Field management"),
        (name = "shifts", description = "Shift template management"),
        (name = "slots", description = "Slot provisioning, availability and maintenance"),
        (name = "bookings", description = "Booking lifecycle"),
        (name = "discounts", description = "Discount code management"),
        (name = "revenue", description = "Revenue reporting")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
