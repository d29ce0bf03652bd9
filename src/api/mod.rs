//! API handlers for Pitchbook REST endpoints

pub mod bookings;
pub mod discounts;
pub mod fields;
pub mod health;
pub mod openapi;
pub mod revenue;
pub mod shifts;
pub mod slots;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use crate::{error::AppError, models::operator::OperatorClaims, AppState};

/// Extractor for an authenticated operator from a JWT bearer token
pub struct Operator(pub OperatorClaims);

#[async_trait]
impl FromRequestParts<AppState> for Operator {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Authentication("Invalid authorization header format".to_string()));
        }

        let token = &auth_header[7..];

        let claims = OperatorClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(Operator(claims))
    }
}
