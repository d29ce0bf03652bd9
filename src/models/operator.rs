//! Operator identity claims
//!
//! Tokens are issued by the external identity provider; this server only
//! validates them and treats the result as "operator present".

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Claims carried by an operator bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorClaims {
    /// Operator identifier
    pub sub: String,
    /// Display name
    pub name: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

impl OperatorClaims {
    /// Parse and validate a JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, AppError> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| AppError::Authentication(e.to_string()))?;
        Ok(token_data.claims)
    }

    /// Create a JWT token (used by tooling and tests; issuance is external)
    pub fn create_token(&self, secret: &str) -> Result<String, AppError> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(e.to_string()))
    }
}
