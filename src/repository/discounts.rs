use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::discount::{CreateDiscountCode, DiscountCode, UpdateDiscountCode},
};

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

#[derive(Clone)]
pub struct DiscountsRepository {
    pool: Pool<Postgres>,
}

impl DiscountsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<DiscountCode>> {
        let codes = sqlx::query_as::<_, DiscountCode>(
            "SELECT * FROM discount_codes ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(codes)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<DiscountCode> {
        sqlx::query_as::<_, DiscountCode>("SELECT * FROM discount_codes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Discount code with id {} not found", id)))
    }

    /// Codes are stored and matched uppercase
    pub async fn get_by_code(&self, code: &str) -> AppResult<DiscountCode> {
        sqlx::query_as::<_, DiscountCode>("SELECT * FROM discount_codes WHERE code = $1")
            .bind(code.trim().to_uppercase())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Discount code {} not found", code)))
    }

    pub async fn create(&self, data: &CreateDiscountCode) -> AppResult<DiscountCode> {
        if data.valid_until <= data.valid_from {
            return Err(AppError::Validation(
                "valid_until must be after valid_from".to_string(),
            ));
        }

        let created = sqlx::query_as::<_, DiscountCode>(
            r#"
            INSERT INTO discount_codes (code, discount_type, value, valid_from, valid_until, max_uses)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(data.code.trim().to_uppercase())
        .bind(data.discount_type)
        .bind(data.value)
        .bind(data.valid_from)
        .bind(data.valid_until)
        .bind(data.max_uses)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict(format!("discount code {} already exists", data.code))
            } else {
                e.into()
            }
        })?;

        tracing::info!(code = %created.code, "discount code created");
        Ok(created)
    }

    pub async fn update(&self, id: i32, data: &UpdateDiscountCode) -> AppResult<DiscountCode> {
        let current = self.get_by_id(id).await?;

        let valid_from = data.valid_from.unwrap_or(current.valid_from);
        let valid_until = data.valid_until.unwrap_or(current.valid_until);
        if valid_until <= valid_from {
            return Err(AppError::Validation(
                "valid_until must be after valid_from".to_string(),
            ));
        }
        // max_uses cannot drop below what has already been redeemed
        if let Some(cap) = data.max_uses {
            if cap < current.current_uses {
                return Err(AppError::Validation(format!(
                    "max_uses {} is below the {} existing redemptions",
                    cap, current.current_uses
                )));
            }
        }

        let updated = sqlx::query_as::<_, DiscountCode>(
            r#"
            UPDATE discount_codes
            SET discount_type = COALESCE($2, discount_type),
                value = COALESCE($3, value),
                valid_from = $4,
                valid_until = $5,
                max_uses = COALESCE($6, max_uses),
                active = COALESCE($7, active)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.discount_type)
        .bind(data.value)
        .bind(valid_from)
        .bind(valid_until)
        .bind(data.max_uses)
        .bind(data.active)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn toggle_active(&self, id: i32) -> AppResult<DiscountCode> {
        sqlx::query_as::<_, DiscountCode>(
            "UPDATE discount_codes SET active = NOT active WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Discount code with id {} not found", id)))
    }

    /// Hard delete, only for codes no booking has ever used
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let referenced: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM bookings WHERE discount_code_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        if referenced {
            return Err(AppError::Conflict(
                "discount code is referenced by bookings; deactivate it instead".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM discount_codes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Discount code with id {} not found",
                id
            )));
        }
        Ok(())
    }

    /// Dashboard helper: codes usable right now
    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM discount_codes
            WHERE active AND valid_from <= $1 AND valid_until >= $1
              AND (max_uses IS NULL OR current_uses < max_uses)
            "#,
        )
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
