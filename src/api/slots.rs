//! Slot inventory endpoints: provisioning, availability, maintenance

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::slot::{
        AvailabilityEntry, AvailabilityQuery, CreateMaintenance, MaintenanceBlock, ProvisionSlots,
        SlotInstance,
    },
};

use super::Operator;

/// Provision slot instances for a shift across a date range
#[utoipa::path(
    post,
    path = "/slots/provision",
    tag = "slots",
    security(("bearer_auth" = [])),
    request_body = ProvisionSlots,
    responses(
        (status = 201, description = "Slots created", body = Vec<SlotInstance>),
        (status = 400, description = "Invalid date range"),
        (status = 404, description = "Shift not found"),
        (status = 409, description = "A slot already exists in the range")
    )
)]
pub async fn provision_slots(
    State(state): State<crate::AppState>,
    Operator(_claims): Operator,
    Json(request): Json<ProvisionSlots>,
) -> AppResult<(StatusCode, Json<Vec<SlotInstance>>)> {
    let slots = state.services.slots.provision(request).await?;
    Ok((StatusCode::CREATED, Json(slots)))
}

/// Availability grid for a field on a date
#[utoipa::path(
    get,
    path = "/fields/{id}/availability",
    tag = "slots",
    params(
        ("id" = i32, Path, description = "Field ID"),
        AvailabilityQuery
    ),
    responses(
        (status = 200, description = "Slots with their state", body = Vec<AvailabilityEntry>),
        (status = 404, description = "Field not found")
    )
)]
pub async fn get_availability(
    State(state): State<crate::AppState>,
    Path(field_id): Path<i32>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<Vec<AvailabilityEntry>>> {
    let entries = state
        .services
        .slots
        .availability(field_id, &query.date)
        .await?;
    Ok(Json(entries))
}

/// Put an available slot under maintenance
#[utoipa::path(
    post,
    path = "/maintenance",
    tag = "slots",
    security(("bearer_auth" = [])),
    request_body = CreateMaintenance,
    responses(
        (status = 201, description = "Maintenance block created", body = MaintenanceBlock),
        (status = 404, description = "Slot not found"),
        (status = 409, description = "Slot is booked or already under maintenance")
    )
)]
pub async fn create_maintenance(
    State(state): State<crate::AppState>,
    Operator(_claims): Operator,
    Json(request): Json<CreateMaintenance>,
) -> AppResult<(StatusCode, Json<MaintenanceBlock>)> {
    let block = state.services.slots.set_maintenance(request).await?;
    Ok((StatusCode::CREATED, Json(block)))
}

/// List maintenance blocks
#[utoipa::path(
    get,
    path = "/maintenance",
    tag = "slots",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Maintenance blocks", body = Vec<MaintenanceBlock>)
    )
)]
pub async fn list_maintenance(
    State(state): State<crate::AppState>,
    Operator(_claims): Operator,
) -> AppResult<Json<Vec<MaintenanceBlock>>> {
    let blocks = state.services.slots.list_maintenance().await?;
    Ok(Json(blocks))
}

/// Lift a maintenance block; the slot becomes available again
#[utoipa::path(
    delete,
    path = "/maintenance/{id}",
    tag = "slots",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Maintenance block ID")),
    responses(
        (status = 204, description = "Maintenance lifted"),
        (status = 404, description = "Block not found")
    )
)]
pub async fn delete_maintenance(
    State(state): State<crate::AppState>,
    Operator(_claims): Operator,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.slots.clear_maintenance(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a slot instance never referenced by an active booking
#[utoipa::path(
    delete,
    path = "/slots/{id}",
    tag = "slots",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Slot ID")),
    responses(
        (status = 204, description = "Slot deleted"),
        (status = 404, description = "Slot not found"),
        (status = 409, description = "Slot is linked to a booking")
    )
)]
pub async fn delete_slot(
    State(state): State<crate::AppState>,
    Operator(_claims): Operator,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.slots.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
