//! Shifts repository: recurring time blocks and their weekday price tables

use chrono::NaiveTime;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::shift::{CreateShift, Shift, UpdateShift},
};

fn parse_time(value: &str, label: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| AppError::Validation(format!("Invalid {} (expected HH:MM)", label)))
}

#[derive(Clone)]
pub struct ShiftsRepository {
    pool: Pool<Postgres>,
}

impl ShiftsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List shifts for a field, ordered by start time
    pub async fn list_by_field(&self, field_id: i32) -> AppResult<Vec<Shift>> {
        let shifts = sqlx::query_as::<_, Shift>(
            "SELECT * FROM shifts WHERE field_id = $1 ORDER BY start_time",
        )
        .bind(field_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(shifts)
    }

    /// Get shift by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Shift> {
        sqlx::query_as::<_, Shift>("SELECT * FROM shifts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Shift with id {} not found", id)))
    }

    /// Create a shift under a field
    pub async fn create(&self, field_id: i32, data: &CreateShift) -> AppResult<Shift> {
        let start = parse_time(&data.start_time, "start_time")?;
        let end = parse_time(&data.end_time, "end_time")?;
        if end <= start {
            return Err(AppError::Validation(
                "end_time must be after start_time".to_string(),
            ));
        }
        if data.prices.len() != 7 {
            return Err(AppError::Validation(
                "prices must have exactly 7 entries (Sunday through Saturday)".to_string(),
            ));
        }

        let shift = sqlx::query_as::<_, Shift>(
            r#"
            INSERT INTO shifts (
                field_id, name, start_time, end_time,
                price_sun, price_mon, price_tue, price_wed, price_thu, price_fri, price_sat
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(field_id)
        .bind(&data.name)
        .bind(start)
        .bind(end)
        .bind(data.prices[0])
        .bind(data.prices[1])
        .bind(data.prices[2])
        .bind(data.prices[3])
        .bind(data.prices[4])
        .bind(data.prices[5])
        .bind(data.prices[6])
        .fetch_one(&self.pool)
        .await?;
        Ok(shift)
    }

    /// Update a shift. Price edits affect only slots provisioned afterward;
    /// existing slot instances keep their snapshot.
    pub async fn update(&self, id: i32, data: &UpdateShift) -> AppResult<Shift> {
        let current = self.get_by_id(id).await?;

        let start = match &data.start_time {
            Some(s) => parse_time(s, "start_time")?,
            None => current.start_time,
        };
        let end = match &data.end_time {
            Some(s) => parse_time(s, "end_time")?,
            None => current.end_time,
        };
        if end <= start {
            return Err(AppError::Validation(
                "end_time must be after start_time".to_string(),
            ));
        }

        let prices: Vec<Decimal> = match &data.prices {
            Some(p) => {
                if p.len() != 7 {
                    return Err(AppError::Validation(
                        "prices must have exactly 7 entries (Sunday through Saturday)".to_string(),
                    ));
                }
                p.clone()
            }
            None => current.weekday_prices().0.to_vec(),
        };

        let shift = sqlx::query_as::<_, Shift>(
            r#"
            UPDATE shifts
            SET name = COALESCE($2, name),
                start_time = $3,
                end_time = $4,
                price_sun = $5, price_mon = $6, price_tue = $7, price_wed = $8,
                price_thu = $9, price_fri = $10, price_sat = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(start)
        .bind(end)
        .bind(prices[0])
        .bind(prices[1])
        .bind(prices[2])
        .bind(prices[3])
        .bind(prices[4])
        .bind(prices[5])
        .bind(prices[6])
        .fetch_one(&self.pool)
        .await?;
        Ok(shift)
    }

    /// Delete a shift; refused while slot instances still reference it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let referenced: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM slot_instances WHERE shift_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        if referenced {
            return Err(AppError::Conflict(format!(
                "Shift {} still has slot instances; delete them first",
                id
            )));
        }

        let result = sqlx::query("DELETE FROM shifts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Shift with id {} not found", id)));
        }
        Ok(())
    }
}
