//! Shift template service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::shift::{CreateShift, Shift, UpdateShift},
    repository::Repository,
};

#[derive(Clone)]
pub struct ShiftsService {
    repository: Repository,
}

impl ShiftsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_by_field(&self, field_id: i32) -> AppResult<Vec<Shift>> {
        // Verify field exists
        self.repository.fields.get_by_id(field_id).await?;
        self.repository.shifts.list_by_field(field_id).await
    }

    pub async fn get(&self, id: i32) -> AppResult<Shift> {
        self.repository.shifts.get_by_id(id).await
    }

    pub async fn create(&self, field_id: i32, data: CreateShift) -> AppResult<Shift> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.fields.get_by_id(field_id).await?;
        self.repository.shifts.create(field_id, &data).await
    }

    /// Price and time edits apply to future provisioning only; already
    /// provisioned slots keep their snapshot.
    pub async fn update(&self, id: i32, data: UpdateShift) -> AppResult<Shift> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.shifts.update(id, &data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.shifts.delete(id).await
    }
}
