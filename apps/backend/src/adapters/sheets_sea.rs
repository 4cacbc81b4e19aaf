//! SeaORM adapter for the sheet repository.
//!
//! A sheet is one `score_sheets` row plus one `score_cells` row per
//! non-empty cell. Cell writes are single-row upserts (or deletes when the
//! cell is cleared), so concurrent writers to different cells never touch
//! each other's rows.

use std::str::FromStr;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set,
    TransactionTrait,
};
use time::OffsetDateTime;
use tracing::debug;

use crate::domain::{
    GuestPlayer, KniffelScores, Period, PlayerId, ScoreField, ScoreSheet, ScoreValue, SheetId,
};
use crate::entities::score_cells::{self, CellState};
use crate::entities::score_sheets;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::infra::db_errors::{corrupt_row, sheet_not_found};
use crate::repos::sheets::SheetRepo;

/// SeaORM implementation of SheetRepo.
#[derive(Debug, Clone)]
pub struct SheetRepoSea {
    db: DatabaseConnection,
}

impl SheetRepoSea {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SheetRepo for SheetRepoSea {
    async fn create_sheet(&self, sheet: &ScoreSheet) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let row = score_sheets::ActiveModel {
            id: Set(sheet.id.as_str().to_string()),
            year: Set(sheet.period.year),
            month: Set(i16::from(sheet.period.month)),
            player_order: Set(serde_json::to_string(&sheet.player_order)?),
            guests: Set(serde_json::to_string(&sheet.guests)?),
            created_at: Set(sheet.created_at),
            updated_at: Set(sheet.created_at),
        };
        score_sheets::Entity::insert(row)
            .exec_without_returning(&txn)
            .await?;

        let now = OffsetDateTime::now_utc();
        for pid in &sheet.player_order {
            let Some(column) = sheet.scores_for(pid) else {
                continue;
            };
            for (field, value) in column.iter() {
                if let Some(cell) = cell_active_model(&sheet.id, pid, field, value, now) {
                    score_cells::Entity::insert(cell)
                        .exec_without_returning(&txn)
                        .await?;
                }
            }
        }

        txn.commit().await?;
        Ok(())
    }

    async fn find_sheet(&self, id: &SheetId) -> Result<Option<ScoreSheet>, DomainError> {
        // Order and cells must come from the same committed state.
        let txn = self.db.begin().await?;
        let Some(row) = score_sheets::Entity::find_by_id(id.as_str().to_string())
            .one(&txn)
            .await?
        else {
            txn.commit().await?;
            return Ok(None);
        };

        let cells = score_cells::Entity::find()
            .filter(score_cells::Column::SheetId.eq(id.as_str()))
            .all(&txn)
            .await?;
        txn.commit().await?;

        Ok(Some(sheet_from_rows(row, cells)?))
    }

    async fn write_cell(
        &self,
        id: &SheetId,
        player: &PlayerId,
        field: ScoreField,
        value: ScoreValue,
    ) -> Result<(), DomainError> {
        let order = load_order(&self.db, id).await?;
        if !order.contains(player) {
            return Err(DomainError::validation(
                ValidationKind::PlayerNotOnSheet,
                format!("player {player} is not seated on sheet {id}"),
            ));
        }

        match cell_active_model(id, player, field, value, OffsetDateTime::now_utc()) {
            Some(cell) => {
                score_cells::Entity::insert(cell)
                    .on_conflict(
                        OnConflict::columns([
                            score_cells::Column::SheetId,
                            score_cells::Column::PlayerId,
                            score_cells::Column::Field,
                        ])
                        .update_columns([
                            score_cells::Column::State,
                            score_cells::Column::Value,
                            score_cells::Column::UpdatedAt,
                        ])
                        .to_owned(),
                    )
                    .exec_without_returning(&self.db)
                    .await?;
            }
            None => {
                score_cells::Entity::delete_many()
                    .filter(score_cells::Column::SheetId.eq(id.as_str()))
                    .filter(score_cells::Column::PlayerId.eq(player.as_str()))
                    .filter(score_cells::Column::Field.eq(field.as_str()))
                    .exec(&self.db)
                    .await?;
            }
        }
        Ok(())
    }

    async fn replace_order(&self, id: &SheetId, order: &[PlayerId]) -> Result<(), DomainError> {
        let encoded = serde_json::to_string(order)?;
        let result = score_sheets::Entity::update_many()
            .col_expr(score_sheets::Column::PlayerOrder, Expr::value(encoded))
            .col_expr(
                score_sheets::Column::UpdatedAt,
                Expr::value(OffsetDateTime::now_utc()),
            )
            .filter(score_sheets::Column::Id.eq(id.as_str()))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(sheet_not_found(id.as_str()).into());
        }
        Ok(())
    }

    async fn delete_sheet(&self, id: &SheetId) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let cells = score_cells::Entity::delete_many()
            .filter(score_cells::Column::SheetId.eq(id.as_str()))
            .exec(&txn)
            .await?;
        let sheets = score_sheets::Entity::delete_by_id(id.as_str().to_string())
            .exec(&txn)
            .await?;

        if sheets.rows_affected == 0 {
            return Err(sheet_not_found(id.as_str()).into());
        }
        txn.commit().await?;

        debug!(sheet_id = %id, cells = cells.rows_affected, "Deleted sheet rows");
        Ok(())
    }
}

async fn load_order<C: ConnectionTrait>(conn: &C, id: &SheetId) -> Result<Vec<PlayerId>, DomainError> {
    let row = score_sheets::Entity::find_by_id(id.as_str().to_string())
        .one(conn)
        .await?
        .ok_or_else(|| sheet_not_found(id.as_str()))?;
    Ok(serde_json::from_str(&row.player_order)?)
}

/// Row for a non-empty cell; `None` means the cell has no row.
fn cell_active_model(
    sheet_id: &SheetId,
    player: &PlayerId,
    field: ScoreField,
    value: ScoreValue,
    now: OffsetDateTime,
) -> Option<score_cells::ActiveModel> {
    let (state, stored) = match value {
        ScoreValue::Empty => return None,
        ScoreValue::Numeric(v) => (CellState::Numeric, Some(i32::from(v))),
        ScoreValue::Stroke => (CellState::Stroke, None),
    };
    Some(score_cells::ActiveModel {
        id: NotSet,
        sheet_id: Set(sheet_id.as_str().to_string()),
        player_id: Set(player.as_str().to_string()),
        field: Set(field.as_str().to_string()),
        state: Set(state),
        value: Set(stored),
        updated_at: Set(now),
    })
}

fn cell_value(cell: &score_cells::Model) -> Result<ScoreValue, sea_orm::DbErr> {
    match (cell.state, cell.value) {
        (CellState::Stroke, _) => Ok(ScoreValue::Stroke),
        (CellState::Numeric, Some(v)) => u16::try_from(v)
            .map(ScoreValue::Numeric)
            .map_err(|_| corrupt_row(format!("cell {} holds out-of-range value {v}", cell.id))),
        (CellState::Numeric, None) => Err(corrupt_row(format!(
            "numeric cell {} has no value",
            cell.id
        ))),
    }
}

fn sheet_from_rows(
    row: score_sheets::Model,
    cells: Vec<score_cells::Model>,
) -> Result<ScoreSheet, DomainError> {
    let month = u8::try_from(row.month)
        .map_err(|_| corrupt_row(format!("sheet {} has month {}", row.id, row.month)))?;
    let period = Period::new(row.year, month)
        .map_err(|e| corrupt_row(format!("sheet {}: {e}", row.id)))?;
    let player_order: Vec<PlayerId> = serde_json::from_str(&row.player_order)?;
    let guests: Vec<GuestPlayer> = serde_json::from_str(&row.guests)?;

    let mut sheet = ScoreSheet::new(
        SheetId::new(row.id),
        period,
        row.created_at,
        player_order,
        guests,
    );

    for cell in cells {
        let pid = PlayerId::new(cell.player_id.clone());
        if !sheet.is_seated(&pid) {
            debug!(sheet_id = %sheet.id, player_id = %pid, "Skipping cell of unseated player");
            continue;
        }
        let field = ScoreField::from_str(&cell.field)
            .map_err(|_| corrupt_row(format!("cell {} has unknown field '{}'", cell.id, cell.field)))?;
        let value = cell_value(&cell)?;
        sheet
            .scores
            .entry(pid)
            .or_insert_with(KniffelScores::default)
            .set(field, value);
    }

    Ok(sheet)
}
