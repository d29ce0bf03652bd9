//! Field management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::field::{CreateField, Field, ReorderFields, UpdateField},
    repository::Repository,
};

#[derive(Clone)]
pub struct FieldsService {
    repository: Repository,
}

impl FieldsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, include_inactive: bool) -> AppResult<Vec<Field>> {
        self.repository.fields.list(include_inactive).await
    }

    pub async fn get(&self, id: i32) -> AppResult<Field> {
        self.repository.fields.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateField) -> AppResult<Field> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.fields.create(&data).await
    }

    pub async fn update(&self, id: i32, data: UpdateField) -> AppResult<Field> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.fields.update(id, &data).await
    }

    /// Move a field to a new position in the display order. Returns the full
    /// ordering so clients can refresh in one round trip.
    pub async fn reorder(&self, id: i32, data: ReorderFields) -> AppResult<Vec<Field>> {
        self.repository.fields.reorder(id, data.new_index).await
    }
}
