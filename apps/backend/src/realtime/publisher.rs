use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, warn};

use crate::domain::{PlayerId, ScoreField, ScoreSheet, ScoreValue, SheetId};
use crate::errors::domain::DomainError;
use crate::realtime::hub::SheetFeedHub;
use crate::repos::sheets::SheetRepo;

/// Wraps a sheet store and pushes the committed document to the feed hub
/// after every successful write.
///
/// Commit, re-read and publish run under one lock per sheet, so snapshots
/// reach the hub in commit order and the last one published is current.
pub struct PublishingSheetRepo<R> {
    inner: R,
    hub: Arc<SheetFeedHub>,
    commit_locks: DashMap<SheetId, Arc<Mutex<()>>>,
}

impl<R: SheetRepo> PublishingSheetRepo<R> {
    pub fn new(inner: R, hub: Arc<SheetFeedHub>) -> Self {
        Self {
            inner,
            hub,
            commit_locks: DashMap::new(),
        }
    }

    async fn lock_sheet(&self, id: &SheetId) -> OwnedMutexGuard<()> {
        let lock = self
            .commit_locks
            .entry(id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    async fn republish(&self, id: &SheetId) {
        match self.inner.find_sheet(id).await {
            Ok(Some(snapshot)) => {
                self.hub.publish(snapshot);
            }
            Ok(None) => debug!(sheet_id = %id, "Sheet vanished before its snapshot was published"),
            // The write itself committed; subscribers catch up on the next one.
            Err(e) => warn!(sheet_id = %id, error = %e, "Failed to re-read sheet for publishing"),
        }
    }
}

#[async_trait]
impl<R: SheetRepo> SheetRepo for PublishingSheetRepo<R> {
    async fn create_sheet(&self, sheet: &ScoreSheet) -> Result<(), DomainError> {
        let _guard = self.lock_sheet(&sheet.id).await;
        self.inner.create_sheet(sheet).await?;
        self.republish(&sheet.id).await;
        Ok(())
    }

    async fn find_sheet(&self, id: &SheetId) -> Result<Option<ScoreSheet>, DomainError> {
        self.inner.find_sheet(id).await
    }

    async fn write_cell(
        &self,
        id: &SheetId,
        player: &PlayerId,
        field: ScoreField,
        value: ScoreValue,
    ) -> Result<(), DomainError> {
        let _guard = self.lock_sheet(id).await;
        self.inner.write_cell(id, player, field, value).await?;
        self.republish(id).await;
        Ok(())
    }

    async fn replace_order(&self, id: &SheetId, order: &[PlayerId]) -> Result<(), DomainError> {
        let _guard = self.lock_sheet(id).await;
        self.inner.replace_order(id, order).await?;
        self.republish(id).await;
        Ok(())
    }

    async fn delete_sheet(&self, id: &SheetId) -> Result<(), DomainError> {
        let guard = self.lock_sheet(id).await;
        self.inner.delete_sheet(id).await?;
        self.hub.close(id);
        drop(guard);
        self.commit_locks.remove(id);
        Ok(())
    }
}
