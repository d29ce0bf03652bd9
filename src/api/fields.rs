//! Field management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::field::{CreateField, Field, ReorderFields, UpdateField},
};

use super::Operator;

/// Listing filter
#[derive(Deserialize, IntoParams, ToSchema)]
pub struct FieldListQuery {
    /// Include deactivated fields (operator views)
    pub include_inactive: Option<bool>,
}

/// List fields in display order
#[utoipa::path(
    get,
    path = "/fields",
    tag = "fields",
    params(FieldListQuery),
    responses(
        (status = 200, description = "Fields in display order", body = Vec<Field>)
    )
)]
pub async fn list_fields(
    State(state): State<crate::AppState>,
    Query(query): Query<FieldListQuery>,
) -> AppResult<Json<Vec<Field>>> {
    let fields = state
        .services
        .fields
        .list(query.include_inactive.unwrap_or(false))
        .await?;
    Ok(Json(fields))
}

/// Get a single field
#[utoipa::path(
    get,
    path = "/fields/{id}",
    tag = "fields",
    params(("id" = i32, Path, description = "Field ID")),
    responses(
        (status = 200, description = "Field", body = Field),
        (status = 404, description = "Field not found")
    )
)]
pub async fn get_field(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Field>> {
    let field = state.services.fields.get(id).await?;
    Ok(Json(field))
}

/// Create a field; it is appended at the end of the display order
#[utoipa::path(
    post,
    path = "/fields",
    tag = "fields",
    security(("bearer_auth" = [])),
    request_body = CreateField,
    responses(
        (status = 201, description = "Field created", body = Field),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_field(
    State(state): State<crate::AppState>,
    Operator(_claims): Operator,
    Json(request): Json<CreateField>,
) -> AppResult<(StatusCode, Json<Field>)> {
    let field = state.services.fields.create(request).await?;
    Ok((StatusCode::CREATED, Json(field)))
}

/// Update a field; toggling `active` adjusts the rank sequence
#[utoipa::path(
    put,
    path = "/fields/{id}",
    tag = "fields",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Field ID")),
    request_body = UpdateField,
    responses(
        (status = 200, description = "Field updated", body = Field),
        (status = 404, description = "Field not found")
    )
)]
pub async fn update_field(
    State(state): State<crate::AppState>,
    Operator(_claims): Operator,
    Path(id): Path<i32>,
    Json(request): Json<UpdateField>,
) -> AppResult<Json<Field>> {
    let field = state.services.fields.update(id, request).await?;
    Ok(Json(field))
}

/// Move a field within the display order; returns the full new ordering
#[utoipa::path(
    put,
    path = "/fields/{id}/reorder",
    tag = "fields",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Field ID")),
    request_body = ReorderFields,
    responses(
        (status = 200, description = "Fields in new display order", body = Vec<Field>),
        (status = 400, description = "Target index out of range"),
        (status = 404, description = "Field not found")
    )
)]
pub async fn reorder_field(
    State(state): State<crate::AppState>,
    Operator(_claims): Operator,
    Path(id): Path<i32>,
    Json(request): Json<ReorderFields>,
) -> AppResult<Json<Vec<Field>>> {
    let fields = state.services.fields.reorder(id, request).await?;
    Ok(Json(fields))
}
