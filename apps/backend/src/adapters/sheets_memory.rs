//! In-process sheet store backed by a `DashMap`.
//!
//! Used by tests and by embedders that do not need durable storage. Writes
//! can be made to fail or stall to exercise the engine's failure paths.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;

use crate::domain::{PlayerId, ScoreField, ScoreSheet, ScoreValue, SheetId};
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::repos::sheets::SheetRepo;

#[derive(Debug, Default)]
pub struct SheetRepoMemory {
    sheets: DashMap<SheetId, ScoreSheet>,
    fail_writes: AtomicBool,
    write_delay: Mutex<Option<Duration>>,
}

impl SheetRepoMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with a persistence error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Delay every subsequent write by `delay`.
    pub fn set_write_delay(&self, delay: Option<Duration>) {
        *self.write_delay.lock() = delay;
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    async fn before_write(&self) -> Result<(), DomainError> {
        let delay = *self.write_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::infra(
                InfraErrorKind::DbUnavailable,
                "sheet store rejected the write",
            ));
        }
        Ok(())
    }
}

fn missing(id: &SheetId) -> DomainError {
    DomainError::not_found(NotFoundKind::Sheet, format!("Sheet {id} not found"))
}

#[async_trait]
impl SheetRepo for SheetRepoMemory {
    async fn create_sheet(&self, sheet: &ScoreSheet) -> Result<(), DomainError> {
        self.before_write().await?;
        if self.sheets.contains_key(&sheet.id) {
            return Err(DomainError::validation_other(format!(
                "sheet {} already exists",
                sheet.id
            )));
        }
        self.sheets.insert(sheet.id.clone(), sheet.clone());
        Ok(())
    }

    async fn find_sheet(&self, id: &SheetId) -> Result<Option<ScoreSheet>, DomainError> {
        Ok(self.sheets.get(id).map(|entry| entry.value().clone()))
    }

    async fn write_cell(
        &self,
        id: &SheetId,
        player: &PlayerId,
        field: ScoreField,
        value: ScoreValue,
    ) -> Result<(), DomainError> {
        self.before_write().await?;
        let mut sheet = self.sheets.get_mut(id).ok_or_else(|| missing(id))?;
        sheet.put_cell(player, field, value)?;
        Ok(())
    }

    async fn replace_order(&self, id: &SheetId, order: &[PlayerId]) -> Result<(), DomainError> {
        self.before_write().await?;
        let mut sheet = self.sheets.get_mut(id).ok_or_else(|| missing(id))?;
        sheet.player_order = order.to_vec();
        sheet.ensure_columns();
        Ok(())
    }

    async fn delete_sheet(&self, id: &SheetId) -> Result<(), DomainError> {
        self.before_write().await?;
        self.sheets.remove(id).map(|_| ()).ok_or_else(|| missing(id))
    }
}
