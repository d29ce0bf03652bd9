//! Bookings repository: the consistency engine for slot claims
//!
//! Every mutating operation here runs in a single transaction. Slot claims
//! are conditional updates keyed on `status = 'available'` with an
//! affected-row check, so two bookings can never both claim the same slot:
//! the loser's transaction rolls back with a typed conflict error.

use chrono::{NaiveDate, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres, Row};

use crate::{
    domain::{discount as discount_rules, reschedule},
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingDetails, BookingQuery, CreateBooking, PaymentStatus, RescheduleBooking},
        discount::DiscountCode,
        slot::{SlotInstance, SlotStatus},
    },
};

/// Unambiguous alphabet for booking codes (no 0/O, 1/I)
const CODE_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

fn generate_booking_code() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..6)
        .map(|_| CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())] as char)
        .collect();
    format!("PB-{}", suffix)
}

fn derive_payment_status(paid: Decimal, final_amount: Decimal) -> PaymentStatus {
    if paid <= Decimal::ZERO {
        PaymentStatus::Unpaid
    } else if paid >= final_amount {
        PaymentStatus::FullyPaid
    } else {
        PaymentStatus::PartiallyPaid
    }
}

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    /// Get booking by its human-readable code
    pub async fn get_by_code(&self, code: &str) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE booking_code = $1")
            .bind(code.trim().to_uppercase())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", code)))
    }

    /// Booking with its linked slots
    pub async fn get_details(&self, id: i32) -> AppResult<BookingDetails> {
        let booking = self.get_by_id(id).await?;
        let slots = sqlx::query_as::<_, SlotInstance>(
            "SELECT * FROM slot_instances WHERE booking_id = $1 ORDER BY date, start_time",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(BookingDetails { booking, slots })
    }

    /// List bookings, optionally narrowed to a date or field
    pub async fn list(&self, query: &BookingQuery) -> AppResult<Vec<Booking>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if !query.include_cancelled.unwrap_or(false) {
            conditions.push("NOT b.cancelled".to_string());
        }
        let date = query
            .date
            .as_ref()
            .map(|s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map_err(|_| AppError::Validation("Invalid date (expected YYYY-MM-DD)".to_string()))
            })
            .transpose()?;
        if date.is_some() {
            conditions.push(format!(
                "EXISTS(SELECT 1 FROM slot_instances s WHERE s.booking_id = b.id AND s.date = ${})",
                idx
            ));
            idx += 1;
        }
        if query.field_id.is_some() {
            conditions.push(format!(
                "EXISTS(SELECT 1 FROM slot_instances s WHERE s.booking_id = b.id AND s.field_id = ${})",
                idx
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let sql = format!(
            "SELECT b.* FROM bookings b {} ORDER BY b.created_at DESC",
            where_clause
        );

        let mut q = sqlx::query_as::<_, Booking>(&sql);
        if let Some(d) = date {
            q = q.bind(d);
        }
        if let Some(f) = query.field_id {
            q = q.bind(f);
        }
        let bookings = q.fetch_all(&self.pool).await?;
        Ok(bookings)
    }

    /// Create a booking: claim every requested slot, apply and redeem the
    /// discount code, compute amounts. All-or-nothing.
    pub async fn create(&self, data: &CreateBooking) -> AppResult<Booking> {
        if data.slot_ids.is_empty() {
            return Err(AppError::SlotUnavailable(
                "no slots requested".to_string(),
            ));
        }

        let now = Utc::now();
        let today = now.date_naive();
        let mut tx = self.pool.begin().await?;

        // Lock the requested slots up front so validation and claim see the
        // same state
        let slots = sqlx::query_as::<_, SlotInstance>(
            "SELECT * FROM slot_instances WHERE id = ANY($1) FOR UPDATE",
        )
        .bind(&data.slot_ids)
        .fetch_all(&mut *tx)
        .await?;

        if slots.len() != data.slot_ids.len() {
            return Err(AppError::NotFound(
                "one or more requested slots do not exist".to_string(),
            ));
        }
        if let Some(slot) = slots.iter().find(|s| s.status != SlotStatus::Available) {
            return Err(AppError::SlotUnavailable(format!(
                "slot {} is not available",
                slot.id
            )));
        }
        if let Some(slot) = slots.iter().find(|s| s.date < today) {
            return Err(AppError::PastDate(format!(
                "slot {} is on {} which is in the past",
                slot.id, slot.date
            )));
        }

        let subtotal: Decimal = slots.iter().map(|s| s.price).sum();

        let (discount_code_id, discount_amount) = match &data.discount_code {
            Some(raw) => {
                let code = sqlx::query_as::<_, DiscountCode>(
                    "SELECT * FROM discount_codes WHERE code = $1 FOR UPDATE",
                )
                .bind(raw.trim().to_uppercase())
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| {
                    AppError::InapplicableCode(format!("unknown discount code {}", raw))
                })?;

                discount_rules::check_applicable(&code, now)?;
                let amount =
                    discount_rules::discount_amount(code.discount_type, code.value, subtotal);

                // Authoritative cap enforcement: the redemption only counts
                // if this transaction commits
                let redeemed = sqlx::query(
                    r#"
                    UPDATE discount_codes SET current_uses = current_uses + 1
                    WHERE id = $1 AND (max_uses IS NULL OR current_uses < max_uses)
                    "#,
                )
                .bind(code.id)
                .execute(&mut *tx)
                .await?;
                if redeemed.rows_affected() == 0 {
                    return Err(AppError::UsageCapExceeded(format!(
                        "code {} has reached its usage cap",
                        code.code
                    )));
                }

                (Some(code.id), amount)
            }
            None => (None, Decimal::ZERO),
        };

        let final_amount = subtotal - discount_amount;

        // Booking codes are random; retry on the rare collision
        let mut booking = None;
        for _ in 0..5 {
            let inserted = sqlx::query_as::<_, Booking>(
                r#"
                INSERT INTO bookings (
                    booking_code, customer_name, customer_phone, customer_email,
                    subtotal, discount_code_id, discount_amount, final_amount,
                    paid_amount, payment_status, player_count, notes
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 0, 'unpaid', $9, $10)
                ON CONFLICT (booking_code) DO NOTHING
                RETURNING *
                "#,
            )
            .bind(generate_booking_code())
            .bind(&data.customer_name)
            .bind(&data.customer_phone)
            .bind(&data.customer_email)
            .bind(subtotal)
            .bind(discount_code_id)
            .bind(discount_amount)
            .bind(final_amount)
            .bind(data.player_count)
            .bind(&data.notes)
            .fetch_optional(&mut *tx)
            .await?;
            if let Some(b) = inserted {
                booking = Some(b);
                break;
            }
        }
        let booking = booking
            .ok_or_else(|| AppError::Internal("could not allocate a booking code".to_string()))?;

        // Conditional claim: a concurrent transaction that already claimed
        // any of these slots makes the row count fall short, rolling us back
        let claimed = sqlx::query(
            r#"
            UPDATE slot_instances SET status = 'booked', booking_id = $1
            WHERE id = ANY($2) AND status = 'available'
            "#,
        )
        .bind(booking.id)
        .bind(&data.slot_ids)
        .execute(&mut *tx)
        .await?;
        if claimed.rows_affected() != data.slot_ids.len() as u64 {
            return Err(AppError::SlotConflict(
                "one or more slots were claimed concurrently".to_string(),
            ));
        }

        tx.commit().await?;

        tracing::info!(
            booking_id = booking.id,
            code = %booking.booking_code,
            slots = data.slot_ids.len(),
            "booking created"
        );
        Ok(booking)
    }

    /// Reschedule, update or cancel a booking. The slot diff is planned up
    /// front against locked rows and applied atomically; any violated
    /// precondition leaves every slot untouched.
    pub async fn reschedule(&self, id: i32, data: &RescheduleBooking) -> AppResult<Booking> {
        let now = Utc::now();
        let today = now.date_naive();
        let mut tx = self.pool.begin().await?;

        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))?;

        if booking.cancelled {
            return Err(AppError::Conflict(format!(
                "booking {} is cancelled and cannot be modified",
                booking.booking_code
            )));
        }

        if data.cancel {
            // Release future slots; past ones stay linked as history
            sqlx::query(
                r#"
                UPDATE slot_instances SET status = 'available', booking_id = NULL
                WHERE booking_id = $1 AND date >= $2
                "#,
            )
            .bind(id)
            .bind(today)
            .execute(&mut *tx)
            .await?;

            let cancelled = sqlx::query_as::<_, Booking>(
                "UPDATE bookings SET cancelled = TRUE, updated_at = $2 WHERE id = $1 RETURNING *",
            )
            .bind(id)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

            tx.commit().await?;
            tracing::info!(booking_id = id, code = %cancelled.booking_code, "booking cancelled");
            return Ok(cancelled);
        }

        let current = sqlx::query_as::<_, SlotInstance>(
            "SELECT * FROM slot_instances WHERE booking_id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        let mut membership_changed = false;
        if let Some(slot_ids) = &data.slot_ids {
            let targets = sqlx::query_as::<_, SlotInstance>(
                "SELECT * FROM slot_instances WHERE id = ANY($1) FOR UPDATE",
            )
            .bind(slot_ids)
            .fetch_all(&mut *tx)
            .await?;
            if targets.len() != slot_ids.len() {
                return Err(AppError::NotFound(
                    "one or more requested slots do not exist".to_string(),
                ));
            }

            let current_refs: Vec<reschedule::SlotRef> = current
                .iter()
                .map(|s| reschedule::SlotRef {
                    id: s.id,
                    date: s.date,
                    status: s.status,
                    booking_id: s.booking_id,
                })
                .collect();
            let target_refs: Vec<reschedule::SlotRef> = targets
                .iter()
                .map(|s| reschedule::SlotRef {
                    id: s.id,
                    date: s.date,
                    status: s.status,
                    booking_id: s.booking_id,
                })
                .collect();

            let plan = reschedule::plan(id, &current_refs, &target_refs, today)?;
            membership_changed = !plan.is_membership_noop();

            if !plan.to_release.is_empty() {
                sqlx::query(
                    r#"
                    UPDATE slot_instances SET status = 'available', booking_id = NULL
                    WHERE id = ANY($1) AND booking_id = $2
                    "#,
                )
                .bind(&plan.to_release)
                .bind(id)
                .execute(&mut *tx)
                .await?;
            }

            if !plan.to_claim.is_empty() {
                let claimed = sqlx::query(
                    r#"
                    UPDATE slot_instances SET status = 'booked', booking_id = $1
                    WHERE id = ANY($2) AND status = 'available'
                    "#,
                )
                .bind(id)
                .bind(&plan.to_claim)
                .execute(&mut *tx)
                .await?;
                if claimed.rows_affected() != plan.to_claim.len() as u64 {
                    return Err(AppError::SlotConflict(
                        "one or more slots were claimed concurrently".to_string(),
                    ));
                }
            }
        }

        let (subtotal, discount_amount, final_amount) = if membership_changed {
            let subtotal: Decimal = sqlx::query_scalar(
                "SELECT COALESCE(SUM(price), 0) FROM slot_instances WHERE booking_id = $1",
            )
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

            let discount_amount = match booking.discount_code_id {
                Some(code_id) => {
                    let code = sqlx::query_as::<_, DiscountCode>(
                        "SELECT * FROM discount_codes WHERE id = $1",
                    )
                    .bind(code_id)
                    .fetch_one(&mut *tx)
                    .await?;
                    // Already redeemed at creation; only the amount tracks
                    // the new subtotal
                    discount_rules::discount_amount(code.discount_type, code.value, subtotal)
                }
                None => Decimal::ZERO,
            };
            (subtotal, discount_amount, subtotal - discount_amount)
        } else {
            (booking.subtotal, booking.discount_amount, booking.final_amount)
        };

        let paid_amount = data.paid_amount.unwrap_or(booking.paid_amount);
        let payment_status = data
            .payment_status
            .unwrap_or_else(|| derive_payment_status(paid_amount, final_amount));

        let updated = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET customer_name = COALESCE($2, customer_name),
                customer_phone = COALESCE($3, customer_phone),
                customer_email = COALESCE($4, customer_email),
                player_count = COALESCE($5, player_count),
                notes = COALESCE($6, notes),
                subtotal = $7,
                discount_amount = $8,
                final_amount = $9,
                paid_amount = $10,
                payment_status = $11,
                updated_at = $12
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.customer_name)
        .bind(&data.customer_phone)
        .bind(&data.customer_email)
        .bind(data.player_count)
        .bind(&data.notes)
        .bind(subtotal)
        .bind(discount_amount)
        .bind(final_amount)
        .bind(paid_amount)
        .bind(payment_status)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            booking_id = id,
            code = %updated.booking_code,
            membership_changed,
            "booking rescheduled"
        );
        Ok(updated)
    }

    /// Record a payment against a non-cancelled booking
    pub async fn update_payment(
        &self,
        id: i32,
        paid_amount: Decimal,
        payment_status: Option<PaymentStatus>,
    ) -> AppResult<Booking> {
        let booking = self.get_by_id(id).await?;
        if booking.cancelled {
            return Err(AppError::Conflict(format!(
                "booking {} is cancelled and cannot be modified",
                booking.booking_code
            )));
        }

        let status =
            payment_status.unwrap_or_else(|| derive_payment_status(paid_amount, booking.final_amount));

        let updated = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings SET paid_amount = $2, payment_status = $3, updated_at = $4
            WHERE id = $1 AND NOT cancelled
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(paid_amount)
        .bind(status)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))?;

        Ok(updated)
    }

    /// Revenue facts for non-cancelled bookings in the inclusive range. Each
    /// booked slot contributes its price scaled by the booking's discount
    /// (final_amount / subtotal), so the series reflects charged revenue.
    pub async fn revenue_facts(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<crate::domain::revenue::RevenueFact>> {
        let rows = sqlx::query(
            r#"
            SELECT s.date, s.start_time,
                   COALESCE(s.price * b.final_amount / NULLIF(b.subtotal, 0), 0) as amount
            FROM slot_instances s
            JOIN bookings b ON s.booking_id = b.id
            WHERE NOT b.cancelled AND s.date BETWEEN $1 AND $2
            ORDER BY s.date, s.start_time
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        let facts = rows
            .into_iter()
            .map(|row| crate::domain::revenue::RevenueFact {
                date: row.get("date"),
                start_time: row.get("start_time"),
                amount: row.get("amount"),
            })
            .collect();
        Ok(facts)
    }

    /// Count non-cancelled bookings (dashboard helper)
    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE NOT cancelled")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
