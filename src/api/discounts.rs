//! Discount code endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::discount::{CreateDiscountCode, DiscountCode, UpdateDiscountCode},
};

use super::Operator;

/// List discount codes
#[utoipa::path(
    get,
    path = "/discounts",
    tag = "discounts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Discount codes", body = Vec<DiscountCode>)
    )
)]
pub async fn list_discounts(
    State(state): State<crate::AppState>,
    Operator(_claims): Operator,
) -> AppResult<Json<Vec<DiscountCode>>> {
    let codes = state.services.discounts.list().await?;
    Ok(Json(codes))
}

/// Check a code's applicability right now (customer-facing, advisory)
#[utoipa::path(
    get,
    path = "/discounts/check/{code}",
    tag = "discounts",
    params(("code" = String, Path, description = "Discount code")),
    responses(
        (status = 200, description = "Code is applicable", body = DiscountCode),
        (status = 404, description = "Code not found"),
        (status = 422, description = "Code inactive, outside its window or capped")
    )
)]
pub async fn check_discount(
    State(state): State<crate::AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<DiscountCode>> {
    let code = state.services.discounts.check(&code).await?;
    Ok(Json(code))
}

/// Create a discount code
#[utoipa::path(
    post,
    path = "/discounts",
    tag = "discounts",
    security(("bearer_auth" = [])),
    request_body = CreateDiscountCode,
    responses(
        (status = 201, description = "Code created", body = DiscountCode),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Code already exists")
    )
)]
pub async fn create_discount(
    State(state): State<crate::AppState>,
    Operator(_claims): Operator,
    Json(request): Json<CreateDiscountCode>,
) -> AppResult<(StatusCode, Json<DiscountCode>)> {
    let code = state.services.discounts.create(request).await?;
    Ok((StatusCode::CREATED, Json(code)))
}

/// Update a discount code
#[utoipa::path(
    put,
    path = "/discounts/{id}",
    tag = "discounts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Discount code ID")),
    request_body = UpdateDiscountCode,
    responses(
        (status = 200, description = "Code updated", body = DiscountCode),
        (status = 404, description = "Code not found")
    )
)]
pub async fn update_discount(
    State(state): State<crate::AppState>,
    Operator(_claims): Operator,
    Path(id): Path<i32>,
    Json(request): Json<UpdateDiscountCode>,
) -> AppResult<Json<DiscountCode>> {
    let code = state.services.discounts.update(id, request).await?;
    Ok(Json(code))
}

/// Flip a code between active and inactive
#[utoipa::path(
    put,
    path = "/discounts/{id}/toggle",
    tag = "discounts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Discount code ID")),
    responses(
        (status = 200, description = "Code toggled", body = DiscountCode),
        (status = 404, description = "Code not found")
    )
)]
pub async fn toggle_discount(
    State(state): State<crate::AppState>,
    Operator(_claims): Operator,
    Path(id): Path<i32>,
) -> AppResult<Json<DiscountCode>> {
    let code = state.services.discounts.toggle_active(id).await?;
    Ok(Json(code))
}

/// Delete a code no booking references
#[utoipa::path(
    delete,
    path = "/discounts/{id}",
    tag = "discounts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Discount code ID")),
    responses(
        (status = 204, description = "Code deleted"),
        (status = 404, description = "Code not found"),
        (status = 409, description = "Code is referenced by bookings")
    )
)]
pub async fn delete_discount(
    State(state): State<crate::AppState>,
    Operator(_claims): Operator,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.discounts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
