//! Discount code service

use chrono::Utc;
use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    domain::discount as discount_rules,
    error::{AppError, AppResult},
    models::discount::{CreateDiscountCode, DiscountCode, UpdateDiscountCode},
    repository::Repository,
};

#[derive(Clone)]
pub struct DiscountsService {
    repository: Repository,
}

impl DiscountsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<DiscountCode>> {
        self.repository.discounts.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<DiscountCode> {
        self.repository.discounts.get_by_id(id).await
    }

    /// Look a code up and check it against the current time. The result is
    /// advisory; the binding check happens inside the booking transaction.
    pub async fn check(&self, code: &str) -> AppResult<DiscountCode> {
        let code = self.repository.discounts.get_by_code(code).await?;
        discount_rules::check_applicable(&code, Utc::now())?;
        Ok(code)
    }

    pub async fn create(&self, data: CreateDiscountCode) -> AppResult<DiscountCode> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        if data.value <= Decimal::ZERO {
            return Err(AppError::Validation(
                "discount value must be positive".to_string(),
            ));
        }
        self.repository.discounts.create(&data).await
    }

    pub async fn update(&self, id: i32, data: UpdateDiscountCode) -> AppResult<DiscountCode> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        if let Some(value) = data.value {
            if value <= Decimal::ZERO {
                return Err(AppError::Validation(
                    "discount value must be positive".to_string(),
                ));
            }
        }
        self.repository.discounts.update(id, &data).await
    }

    pub async fn toggle_active(&self, id: i32) -> AppResult<DiscountCode> {
        self.repository.discounts.toggle_active(id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.discounts.delete(id).await
    }
}
