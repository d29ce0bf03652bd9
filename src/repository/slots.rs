//! Slot inventory repository: provisioning, maintenance blocks, availability

use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Postgres, Row};

use crate::{
    domain::pricing,
    error::{AppError, AppResult},
    models::slot::{AvailabilityEntry, MaintenanceBlock, SlotInstance, SlotStatus},
};

#[derive(Clone)]
pub struct SlotsRepository {
    pool: Pool<Postgres>,
}

impl SlotsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get slot by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<SlotInstance> {
        sqlx::query_as::<_, SlotInstance>("SELECT * FROM slot_instances WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Slot with id {} not found", id)))
    }

    /// Provision one slot per date in the inclusive range, with the price
    /// resolved from the shift's weekday table at creation time. The whole
    /// batch is one transaction; an existing occurrence aborts it.
    pub async fn provision(
        &self,
        shift_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<Vec<SlotInstance>> {
        if end_date < start_date {
            return Err(AppError::Validation(
                "end_date must not be before start_date".to_string(),
            ));
        }

        let shift = sqlx::query_as::<_, crate::models::shift::Shift>(
            "SELECT * FROM shifts WHERE id = $1",
        )
        .bind(shift_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Shift with id {} not found", shift_id)))?;

        let mut tx = self.pool.begin().await?;

        let existing: Option<NaiveDate> = sqlx::query_scalar(
            r#"
            SELECT date FROM slot_instances
            WHERE shift_id = $1 AND start_time = $2 AND date BETWEEN $3 AND $4
            LIMIT 1
            "#,
        )
        .bind(shift_id)
        .bind(shift.start_time)
        .bind(start_date)
        .bind(end_date)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(date) = existing {
            return Err(AppError::DuplicateSlot(format!(
                "a slot for shift {} already exists on {}",
                shift_id, date
            )));
        }

        let prices = shift.weekday_prices();
        let mut created = Vec::new();
        let mut date = start_date;
        while date <= end_date {
            let slot = sqlx::query_as::<_, SlotInstance>(
                r#"
                INSERT INTO slot_instances (field_id, shift_id, date, start_time, end_time, price, status)
                VALUES ($1, $2, $3, $4, $5, $6, 'available')
                RETURNING *
                "#,
            )
            .bind(shift.field_id)
            .bind(shift_id)
            .bind(date)
            .bind(shift.start_time)
            .bind(shift.end_time)
            .bind(pricing::price_for(&prices, date))
            .fetch_one(&mut *tx)
            .await?;
            created.push(slot);

            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }

        tx.commit().await?;

        tracing::info!(
            shift_id,
            count = created.len(),
            "provisioned slots from {} to {}",
            start_date,
            end_date
        );
        Ok(created)
    }

    /// Put an AVAILABLE slot under maintenance. A booked slot is refused;
    /// maintenance and bookings are mutually exclusive.
    pub async fn set_maintenance(
        &self,
        slot_id: i32,
        reason: Option<&str>,
    ) -> AppResult<MaintenanceBlock> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE slot_instances SET status = 'maintenance' WHERE id = $1 AND status = 'available'",
        )
        .bind(slot_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            let status: Option<SlotStatus> =
                sqlx::query_scalar("SELECT status FROM slot_instances WHERE id = $1")
                    .bind(slot_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            return match status {
                None => Err(AppError::NotFound(format!("Slot with id {} not found", slot_id))),
                Some(_) => Err(AppError::SlotUnavailable(format!(
                    "slot {} is not available for maintenance",
                    slot_id
                ))),
            };
        }

        let block = sqlx::query_as::<_, MaintenanceBlock>(
            "INSERT INTO maintenance_blocks (slot_id, reason) VALUES ($1, $2) RETURNING *",
        )
        .bind(slot_id)
        .bind(reason)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(block)
    }

    /// Remove a maintenance block. The slot returns to AVAILABLE only when
    /// no booking claims it.
    pub async fn clear_maintenance(&self, block_id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let block = sqlx::query_as::<_, MaintenanceBlock>(
            "SELECT * FROM maintenance_blocks WHERE id = $1",
        )
        .bind(block_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Maintenance block {} not found", block_id))
        })?;

        sqlx::query(
            r#"
            UPDATE slot_instances SET status = 'available'
            WHERE id = $1 AND status = 'maintenance' AND booking_id IS NULL
            "#,
        )
        .bind(block.slot_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM maintenance_blocks WHERE id = $1")
            .bind(block_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// List maintenance blocks, newest first
    pub async fn list_maintenance(&self) -> AppResult<Vec<MaintenanceBlock>> {
        let blocks = sqlx::query_as::<_, MaintenanceBlock>(
            "SELECT * FROM maintenance_blocks ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(blocks)
    }

    /// Delete a slot instance; refused while a non-cancelled booking links it
    pub async fn delete(&self, slot_id: i32) -> AppResult<()> {
        let in_use: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM slot_instances s
                JOIN bookings b ON s.booking_id = b.id
                WHERE s.id = $1 AND NOT b.cancelled
            )
            "#,
        )
        .bind(slot_id)
        .fetch_one(&self.pool)
        .await?;

        if in_use {
            return Err(AppError::SlotInUse(format!(
                "slot {} is linked to an active booking",
                slot_id
            )));
        }

        let result = sqlx::query("DELETE FROM slot_instances WHERE id = $1")
            .bind(slot_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Slot with id {} not found", slot_id)));
        }
        Ok(())
    }

    /// Availability grid for a field and date: every slot with its state
    /// and, when booked, the owning booking's code and customer name.
    pub async fn list_availability(
        &self,
        field_id: i32,
        date: NaiveDate,
    ) -> AppResult<Vec<AvailabilityEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT s.id as slot_id, s.shift_id, sh.name as shift_name,
                   s.date, s.start_time, s.end_time, s.price, s.status,
                   b.booking_code, b.customer_name
            FROM slot_instances s
            JOIN shifts sh ON s.shift_id = sh.id
            LEFT JOIN bookings b ON s.booking_id = b.id AND NOT b.cancelled
            WHERE s.field_id = $1 AND s.date = $2
            ORDER BY s.start_time
            "#,
        )
        .bind(field_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        let entries = rows
            .into_iter()
            .map(|row| AvailabilityEntry {
                slot_id: row.get("slot_id"),
                shift_id: row.get("shift_id"),
                shift_name: row.get("shift_name"),
                date: row.get("date"),
                start_time: row.get("start_time"),
                end_time: row.get("end_time"),
                price: row.get("price"),
                status: row.get("status"),
                booking_code: row.get("booking_code"),
                customer_name: row.get("customer_name"),
            })
            .collect();
        Ok(entries)
    }

    /// Count slots still open today or later (dashboard helper)
    pub async fn count_upcoming_available(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM slot_instances WHERE status = 'available' AND date >= $1",
        )
        .bind(Utc::now().date_naive())
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
