//! Sheet persistence seam.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{PlayerId, ScoreField, ScoreSheet, ScoreValue, SheetId};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Persistence collaborator for scoresheets.
///
/// Every write is committed on its own: a cell write touches exactly one
/// cell and a reorder replaces the whole order array, so concurrent writers
/// converge to whichever write landed last.
#[async_trait]
pub trait SheetRepo: Send + Sync {
    async fn create_sheet(&self, sheet: &ScoreSheet) -> Result<(), DomainError>;

    async fn find_sheet(&self, id: &SheetId) -> Result<Option<ScoreSheet>, DomainError>;

    /// Write one cell. `ScoreValue::Empty` removes the stored value.
    async fn write_cell(
        &self,
        id: &SheetId,
        player: &PlayerId,
        field: ScoreField,
        value: ScoreValue,
    ) -> Result<(), DomainError>;

    async fn replace_order(&self, id: &SheetId, order: &[PlayerId]) -> Result<(), DomainError>;

    /// Remove the sheet and all of its cells.
    async fn delete_sheet(&self, id: &SheetId) -> Result<(), DomainError>;
}

#[async_trait]
impl<T: SheetRepo + ?Sized> SheetRepo for Arc<T> {
    async fn create_sheet(&self, sheet: &ScoreSheet) -> Result<(), DomainError> {
        (**self).create_sheet(sheet).await
    }

    async fn find_sheet(&self, id: &SheetId) -> Result<Option<ScoreSheet>, DomainError> {
        (**self).find_sheet(id).await
    }

    async fn write_cell(
        &self,
        id: &SheetId,
        player: &PlayerId,
        field: ScoreField,
        value: ScoreValue,
    ) -> Result<(), DomainError> {
        (**self).write_cell(id, player, field, value).await
    }

    async fn replace_order(&self, id: &SheetId, order: &[PlayerId]) -> Result<(), DomainError> {
        (**self).replace_order(id, order).await
    }

    async fn delete_sheet(&self, id: &SheetId) -> Result<(), DomainError> {
        (**self).delete_sheet(id).await
    }
}

/// Load a sheet or fail with `NotFound`.
pub async fn require_sheet(
    repo: &(impl SheetRepo + ?Sized),
    id: &SheetId,
) -> Result<ScoreSheet, DomainError> {
    repo.find_sheet(id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Sheet, format!("Sheet {id} not found"))
    })
}
