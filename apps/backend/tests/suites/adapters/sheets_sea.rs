use kniffel::adapters::SheetRepoSea;
use kniffel::domain::{PlayerId, ScoreField, ScoreSheet, ScoreValue, SheetId};
use kniffel::entities::score_cells::{self, CellState};
use kniffel::errors::domain::{NotFoundKind, ValidationKind};
use kniffel::infra::db::memory_db;
use kniffel::repos::SheetRepo;
use kniffel::{AppError, DomainError};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use time::macros::datetime;

use crate::support::{alice, bob, carol, ids, october};

fn three_seat_sheet() -> ScoreSheet {
    ScoreSheet::new(
        SheetId::generate(),
        october(),
        datetime!(2026-10-19 19:30 UTC),
        ids(&[alice(), bob(), carol()]),
        Vec::new(),
    )
}

async fn cell_rows(db: &DatabaseConnection, sheet_id: &SheetId) -> Result<u64, AppError> {
    Ok(score_cells::Entity::find()
        .filter(score_cells::Column::SheetId.eq(sheet_id.as_str()))
        .count(db)
        .await?)
}

#[tokio::test]
async fn create_then_find_roundtrips_cells_and_order() -> Result<(), AppError> {
    let db = memory_db().await?;
    let repo = SheetRepoSea::new(db.clone());

    let mut sheet = three_seat_sheet();
    let a = alice().id;
    sheet.put_cell(&a, ScoreField::Fours, ScoreValue::Numeric(12))?;
    sheet.put_cell(&a, ScoreField::Kniffel, ScoreValue::Stroke)?;
    repo.create_sheet(&sheet).await?;

    let found = repo.find_sheet(&sheet.id).await?.expect("sheet stored");
    assert_eq!(found.id, sheet.id);
    assert_eq!(found.period, sheet.period);
    assert_eq!(found.player_order, sheet.player_order);
    assert_eq!(found.scores, sheet.scores);
    assert_eq!(found.cell(&a, ScoreField::Kniffel)?, ScoreValue::Stroke);

    // Only non-empty cells get rows
    assert_eq!(cell_rows(&db, &sheet.id).await?, 2);
    Ok(())
}

#[tokio::test]
async fn find_unknown_sheet_is_none() -> Result<(), AppError> {
    let repo = SheetRepoSea::new(memory_db().await?);
    assert!(repo.find_sheet(&SheetId::from("nope")).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn write_cell_upserts_and_clears_single_row() -> Result<(), AppError> {
    let db = memory_db().await?;
    let repo = SheetRepoSea::new(db.clone());
    let sheet = three_seat_sheet();
    repo.create_sheet(&sheet).await?;
    let b = bob().id;

    repo.write_cell(&sheet.id, &b, ScoreField::Chance, ScoreValue::Numeric(22))
        .await?;
    repo.write_cell(&sheet.id, &b, ScoreField::Chance, ScoreValue::Numeric(17))
        .await?;
    assert_eq!(cell_rows(&db, &sheet.id).await?, 1);

    let row = score_cells::Entity::find()
        .filter(score_cells::Column::SheetId.eq(sheet.id.as_str()))
        .one(&db)
        .await?
        .expect("cell row");
    assert_eq!(row.state, CellState::Numeric);
    assert_eq!(row.value, Some(17));

    repo.write_cell(&sheet.id, &b, ScoreField::Chance, ScoreValue::Stroke)
        .await?;
    let found = repo.find_sheet(&sheet.id).await?.expect("sheet stored");
    assert_eq!(found.cell(&b, ScoreField::Chance)?, ScoreValue::Stroke);

    repo.write_cell(&sheet.id, &b, ScoreField::Chance, ScoreValue::Empty)
        .await?;
    assert_eq!(cell_rows(&db, &sheet.id).await?, 0);
    Ok(())
}

#[tokio::test]
async fn zero_is_stored_apart_from_stroke() -> Result<(), AppError> {
    let db = memory_db().await?;
    let repo = SheetRepoSea::new(db);
    let sheet = three_seat_sheet();
    repo.create_sheet(&sheet).await?;
    let c = carol().id;

    repo.write_cell(&sheet.id, &c, ScoreField::Ones, ScoreValue::Numeric(0))
        .await?;
    repo.write_cell(&sheet.id, &c, ScoreField::Twos, ScoreValue::Stroke)
        .await?;

    let found = repo.find_sheet(&sheet.id).await?.expect("sheet stored");
    assert_eq!(found.cell(&c, ScoreField::Ones)?, ScoreValue::Numeric(0));
    assert_eq!(found.cell(&c, ScoreField::Twos)?, ScoreValue::Stroke);
    Ok(())
}

#[tokio::test]
async fn write_cell_rejects_unseated_player() -> Result<(), AppError> {
    let repo = SheetRepoSea::new(memory_db().await?);
    let sheet = three_seat_sheet();
    repo.create_sheet(&sheet).await?;

    let err = repo
        .write_cell(
            &sheet.id,
            &PlayerId::from("m-stranger"),
            ScoreField::Chance,
            ScoreValue::Numeric(5),
        )
        .await
        .unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::PlayerNotOnSheet));
    Ok(())
}

#[tokio::test]
async fn write_cell_on_missing_sheet_is_not_found() -> Result<(), AppError> {
    let repo = SheetRepoSea::new(memory_db().await?);

    let err = repo
        .write_cell(
            &SheetId::from("missing"),
            &alice().id,
            ScoreField::Chance,
            ScoreValue::Numeric(5),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Sheet, _)));
    Ok(())
}

#[tokio::test]
async fn replace_order_keeps_cells() -> Result<(), AppError> {
    let repo = SheetRepoSea::new(memory_db().await?);
    let sheet = three_seat_sheet();
    repo.create_sheet(&sheet).await?;
    let a = alice().id;
    repo.write_cell(&sheet.id, &a, ScoreField::Sixes, ScoreValue::Numeric(24))
        .await?;

    let reversed: Vec<PlayerId> = sheet.player_order.iter().rev().cloned().collect();
    repo.replace_order(&sheet.id, &reversed).await?;

    let found = repo.find_sheet(&sheet.id).await?.expect("sheet stored");
    assert_eq!(found.player_order, reversed);
    assert_eq!(found.cell(&a, ScoreField::Sixes)?, ScoreValue::Numeric(24));
    Ok(())
}

#[tokio::test]
async fn replace_order_on_missing_sheet_is_not_found() -> Result<(), AppError> {
    let repo = SheetRepoSea::new(memory_db().await?);
    let err = repo
        .replace_order(&SheetId::from("missing"), &ids(&[alice(), bob()]))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Sheet, _)));
    Ok(())
}

#[tokio::test]
async fn delete_removes_sheet_and_cells() -> Result<(), AppError> {
    let db = memory_db().await?;
    let repo = SheetRepoSea::new(db.clone());
    let sheet = three_seat_sheet();
    repo.create_sheet(&sheet).await?;
    repo.write_cell(&sheet.id, &bob().id, ScoreField::FullHouse, ScoreValue::Numeric(25))
        .await?;

    repo.delete_sheet(&sheet.id).await?;

    assert!(repo.find_sheet(&sheet.id).await?.is_none());
    assert_eq!(cell_rows(&db, &sheet.id).await?, 0);

    let again = repo.delete_sheet(&sheet.id).await.unwrap_err();
    assert!(matches!(again, DomainError::NotFound(NotFoundKind::Sheet, _)));
    Ok(())
}

#[tokio::test]
async fn reads_see_order_and_cells_from_the_same_commit() -> Result<(), AppError> {
    let repo = SheetRepoSea::new(memory_db().await?);
    let sheet = three_seat_sheet();
    repo.create_sheet(&sheet).await?;
    let a = alice().id;

    let rotation = |k: usize| -> Vec<PlayerId> {
        let mut order = sheet.player_order.clone();
        let n = order.len();
        order.rotate_left(k % n);
        order
    };

    // Round k writes chance=k, then rotates the order k times.
    let writer = async {
        for k in 1..=12usize {
            repo.write_cell(&sheet.id, &a, ScoreField::Chance, ScoreValue::Numeric(k as u16))
                .await?;
            repo.replace_order(&sheet.id, &rotation(k)).await?;
        }
        Ok::<_, DomainError>(())
    };
    let reader = async {
        let mut seen = Vec::new();
        for _ in 0..24 {
            seen.push(repo.find_sheet(&sheet.id).await?.expect("sheet stored"));
            tokio::task::yield_now().await;
        }
        Ok::<_, DomainError>(seen)
    };
    let (written, seen) = tokio::join!(writer, reader);
    written?;

    for snapshot in seen? {
        match snapshot.cell(&a, ScoreField::Chance)? {
            ScoreValue::Empty => assert_eq!(snapshot.player_order, rotation(0)),
            ScoreValue::Numeric(k) => {
                let k = usize::from(k);
                assert!(
                    snapshot.player_order == rotation(k - 1) || snapshot.player_order == rotation(k),
                    "chance={k} seen with order {:?}",
                    snapshot.player_order
                );
            }
            other => panic!("unexpected chance value {other:?}"),
        }
    }
    Ok(())
}
