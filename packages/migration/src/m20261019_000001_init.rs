use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Members {
    Table,
    Id,
    DisplayName,
    CreatedAt,
}

#[derive(Iden)]
enum ScoreSheets {
    Table,
    Id,
    Year,
    Month,
    PlayerOrder,
    Guests,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ScoreCells {
    Table,
    Id,
    SheetId,
    PlayerId,
    Field,
    State,
    Value,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // members (read-only roster mirror)
        manager
            .create_table(
                Table::create()
                    .table(Members::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Members::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Members::DisplayName).string().not_null())
                    .col(
                        ColumnDef::new(Members::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // score_sheets
        manager
            .create_table(
                Table::create()
                    .table(ScoreSheets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScoreSheets::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScoreSheets::Year).integer().not_null())
                    .col(ColumnDef::new(ScoreSheets::Month).small_integer().not_null())
                    .col(ColumnDef::new(ScoreSheets::PlayerOrder).text().not_null())
                    .col(ColumnDef::new(ScoreSheets::Guests).text().not_null())
                    .col(
                        ColumnDef::new(ScoreSheets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScoreSheets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_score_sheets_period")
                    .table(ScoreSheets::Table)
                    .col(ScoreSheets::Year)
                    .col(ScoreSheets::Month)
                    .to_owned(),
            )
            .await?;

        // score_cells: one row per non-empty cell
        manager
            .create_table(
                Table::create()
                    .table(ScoreCells::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScoreCells::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(ScoreCells::SheetId).string().not_null())
                    .col(ColumnDef::new(ScoreCells::PlayerId).string().not_null())
                    .col(ColumnDef::new(ScoreCells::Field).string_len(32).not_null())
                    .col(ColumnDef::new(ScoreCells::State).string_len(16).not_null())
                    .col(ColumnDef::new(ScoreCells::Value).integer().null())
                    .col(
                        ColumnDef::new(ScoreCells::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_score_cells_sheet_id")
                            .from(ScoreCells::Table, ScoreCells::SheetId)
                            .to(ScoreSheets::Table, ScoreSheets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // upsert target for single-cell writes
        manager
            .create_index(
                Index::create()
                    .name("ux_score_cells_sheet_player_field")
                    .table(ScoreCells::Table)
                    .col(ScoreCells::SheetId)
                    .col(ScoreCells::PlayerId)
                    .col(ScoreCells::Field)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_index(
                Index::drop()
                    .name("ux_score_cells_sheet_player_field")
                    .table(ScoreCells::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(ScoreCells::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_score_sheets_period")
                    .table(ScoreSheets::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(ScoreSheets::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Members::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
