use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stored state of a non-empty cell. Empty cells have no row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum CellState {
    #[sea_orm(string_value = "NUMERIC")]
    Numeric,
    #[sea_orm(string_value = "STROKE")]
    Stroke,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "score_cells")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "sheet_id")]
    pub sheet_id: String,
    #[sea_orm(column_name = "player_id")]
    pub player_id: String,
    pub field: String,
    pub state: CellState,
    pub value: Option<i32>,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::score_sheets::Entity",
        from = "Column::SheetId",
        to = "super::score_sheets::Column::Id",
        on_delete = "Cascade"
    )]
    Sheet,
}

impl Related<super::score_sheets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sheet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
