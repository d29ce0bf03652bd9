//! Shift template endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::shift::{CreateShift, Shift, UpdateShift},
};

use super::Operator;

/// List shift templates for a field
#[utoipa::path(
    get,
    path = "/fields/{id}/shifts",
    tag = "shifts",
    params(("id" = i32, Path, description = "Field ID")),
    responses(
        (status = 200, description = "Shifts ordered by start time", body = Vec<Shift>),
        (status = 404, description = "Field not found")
    )
)]
pub async fn list_shifts(
    State(state): State<crate::AppState>,
    Path(field_id): Path<i32>,
) -> AppResult<Json<Vec<Shift>>> {
    let shifts = state.services.shifts.list_by_field(field_id).await?;
    Ok(Json(shifts))
}

/// Create a shift template for a field
#[utoipa::path(
    post,
    path = "/fields/{id}/shifts",
    tag = "shifts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Field ID")),
    request_body = CreateShift,
    responses(
        (status = 201, description = "Shift created", body = Shift),
        (status = 400, description = "Invalid times or price table"),
        (status = 404, description = "Field not found")
    )
)]
pub async fn create_shift(
    State(state): State<crate::AppState>,
    Operator(_claims): Operator,
    Path(field_id): Path<i32>,
    Json(request): Json<CreateShift>,
) -> AppResult<(StatusCode, Json<Shift>)> {
    let shift = state.services.shifts.create(field_id, request).await?;
    Ok((StatusCode::CREATED, Json(shift)))
}

/// Update a shift template; already provisioned slots keep their price
#[utoipa::path(
    put,
    path = "/shifts/{id}",
    tag = "shifts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Shift ID")),
    request_body = UpdateShift,
    responses(
        (status = 200, description = "Shift updated", body = Shift),
        (status = 404, description = "Shift not found")
    )
)]
pub async fn update_shift(
    State(state): State<crate::AppState>,
    Operator(_claims): Operator,
    Path(id): Path<i32>,
    Json(request): Json<UpdateShift>,
) -> AppResult<Json<Shift>> {
    let shift = state.services.shifts.update(id, request).await?;
    Ok(Json(shift))
}

/// Delete a shift template with no provisioned slots
#[utoipa::path(
    delete,
    path = "/shifts/{id}",
    tag = "shifts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Shift ID")),
    responses(
        (status = 204, description = "Shift deleted"),
        (status = 404, description = "Shift not found"),
        (status = 409, description = "Shift has provisioned slots")
    )
)]
pub async fn delete_shift(
    State(state): State<crate::AppState>,
    Operator(_claims): Operator,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.shifts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
