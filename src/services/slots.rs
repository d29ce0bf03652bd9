//! Slot inventory service: provisioning, availability, maintenance

use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    models::slot::{AvailabilityEntry, CreateMaintenance, MaintenanceBlock, ProvisionSlots, SlotInstance},
    repository::Repository,
};

fn parse_date(value: &str, label: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid {} (expected YYYY-MM-DD)", label)))
}

#[derive(Clone)]
pub struct SlotsService {
    repository: Repository,
}

impl SlotsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn provision(&self, data: ProvisionSlots) -> AppResult<Vec<SlotInstance>> {
        let start = parse_date(&data.start_date, "start_date")?;
        let end = parse_date(&data.end_date, "end_date")?;
        self.repository.slots.provision(data.shift_id, start, end).await
    }

    pub async fn availability(&self, field_id: i32, date: &str) -> AppResult<Vec<AvailabilityEntry>> {
        let date = parse_date(date, "date")?;
        self.repository.fields.get_by_id(field_id).await?;
        self.repository.slots.list_availability(field_id, date).await
    }

    pub async fn set_maintenance(&self, data: CreateMaintenance) -> AppResult<MaintenanceBlock> {
        self.repository
            .slots
            .set_maintenance(data.slot_id, data.reason.as_deref())
            .await
    }

    pub async fn clear_maintenance(&self, block_id: i32) -> AppResult<()> {
        self.repository.slots.clear_maintenance(block_id).await
    }

    pub async fn list_maintenance(&self) -> AppResult<Vec<MaintenanceBlock>> {
        self.repository.slots.list_maintenance().await
    }

    pub async fn delete(&self, slot_id: i32) -> AppResult<()> {
        self.repository.slots.delete(slot_id).await
    }
}
