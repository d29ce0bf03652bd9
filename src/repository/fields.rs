//! Fields repository: CRUD plus the transactional display-rank sequencer

use sqlx::{Pool, Postgres};

use crate::{
    domain::reorder,
    error::{AppError, AppResult},
    models::field::{CreateField, Field, UpdateField},
};

#[derive(Clone)]
pub struct FieldsRepository {
    pool: Pool<Postgres>,
}

impl FieldsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List fields ordered by display rank (active first)
    pub async fn list(&self, include_inactive: bool) -> AppResult<Vec<Field>> {
        let query = if include_inactive {
            "SELECT * FROM fields ORDER BY active DESC, display_rank, id"
        } else {
            "SELECT * FROM fields WHERE active ORDER BY display_rank"
        };
        let fields = sqlx::query_as::<_, Field>(query).fetch_all(&self.pool).await?;
        Ok(fields)
    }

    /// Get field by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Field> {
        sqlx::query_as::<_, Field>("SELECT * FROM fields WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Field with id {} not found", id)))
    }

    /// Create a field, appending it at the end of the active rank sequence
    pub async fn create(&self, data: &CreateField) -> AppResult<Field> {
        let mut tx = self.pool.begin().await?;

        let next_rank: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(display_rank), 0) + 1 FROM fields WHERE active",
        )
        .fetch_one(&mut *tx)
        .await?;

        let field = sqlx::query_as::<_, Field>(
            r#"
            INSERT INTO fields (name, capacity, image, display_rank)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.capacity)
        .bind(&data.image)
        .bind(next_rank)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(field)
    }

    /// Update a field. Activation transitions keep the active-field rank
    /// sequence dense: deactivating compacts ranks above the removed one,
    /// reactivating appends at the end.
    pub async fn update(&self, id: i32, data: &UpdateField) -> AppResult<Field> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Field>("SELECT * FROM fields WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Field with id {} not found", id)))?;

        let field = sqlx::query_as::<_, Field>(
            r#"
            UPDATE fields
            SET name = COALESCE($2, name),
                capacity = COALESCE($3, capacity),
                image = COALESCE($4, image)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.capacity)
        .bind(&data.image)
        .fetch_one(&mut *tx)
        .await?;

        let field = match data.active {
            Some(false) if current.active => {
                let field = sqlx::query_as::<_, Field>(
                    "UPDATE fields SET active = FALSE, display_rank = 0 WHERE id = $1 RETURNING *",
                )
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
                sqlx::query("UPDATE fields SET display_rank = display_rank - 1 WHERE active AND display_rank > $1")
                    .bind(current.display_rank)
                    .execute(&mut *tx)
                    .await?;
                field
            }
            Some(true) if !current.active => {
                sqlx::query_as::<_, Field>(
                    r#"
                    UPDATE fields
                    SET active = TRUE,
                        display_rank = (SELECT COALESCE(MAX(display_rank), 0) + 1 FROM fields WHERE active)
                    WHERE id = $1
                    RETURNING *
                    "#,
                )
                .bind(id)
                .fetch_one(&mut *tx)
                .await?
            }
            _ => field,
        };

        tx.commit().await?;
        Ok(field)
    }

    /// Move a field to a new index in the display ordering. The whole rank
    /// batch is applied in one transaction so readers never observe a torn
    /// sequence.
    pub async fn reorder(&self, moved_id: i32, new_index: usize) -> AppResult<Vec<Field>> {
        let mut tx = self.pool.begin().await?;

        let ordered_ids: Vec<i32> = sqlx::query_scalar(
            "SELECT id FROM fields WHERE active ORDER BY display_rank FOR UPDATE",
        )
        .fetch_all(&mut *tx)
        .await?;

        let changes = reorder::plan_reorder(&ordered_ids, moved_id, new_index)?;

        for change in &changes {
            sqlx::query("UPDATE fields SET display_rank = $1 WHERE id = $2")
                .bind(change.rank)
                .bind(change.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        self.list(false).await
    }
}
