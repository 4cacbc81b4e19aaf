use std::time::Duration;

use kniffel::domain::{PlayerId, ScoreField, ScoreValue, SortMode};
use kniffel::errors::domain::{InfraErrorKind, NotFoundKind, ValidationKind};
use kniffel::repos::SheetRepo;
use kniffel::{AppError, DomainError, EngineConfig};

use crate::support::{alice, bob, carol, ids, memory_engine, october, roster, MemoryEngine};

async fn engine_with_sheet(
    config: EngineConfig,
) -> Result<(MemoryEngine, kniffel::domain::SheetId), AppError> {
    let engine = memory_engine(config).await?;
    let ctx = engine.ctx(&alice()).await?;
    let sheet = engine
        .state
        .sheet_service()
        .create_sheet(&ctx, october(), ids(&roster()), Vec::new())
        .await?;
    Ok((engine, sheet.id))
}

#[tokio::test]
async fn set_cell_updates_local_copy_and_store() -> Result<(), AppError> {
    let (engine, sheet_id) = engine_with_sheet(EngineConfig::default()).await?;
    let mut session = engine.state.sheet_service().open_sheet(&sheet_id).await?;
    let a = alice().id;

    let written = session
        .set_cell(&a, ScoreField::Chance, ScoreValue::Numeric(23))
        .await?;
    assert_eq!(written, ScoreValue::Numeric(23));
    assert_eq!(session.sheet().cell(&a, ScoreField::Chance)?, ScoreValue::Numeric(23));

    let stored = engine.store.find_sheet(&sheet_id).await?.expect("stored");
    assert_eq!(stored.cell(&a, ScoreField::Chance)?, ScoreValue::Numeric(23));
    // Only the touched cell changed
    assert_eq!(stored.cell(&a, ScoreField::Ones)?, ScoreValue::Empty);
    Ok(())
}

#[tokio::test]
async fn gestures_follow_entry_rules() -> Result<(), AppError> {
    let (engine, sheet_id) = engine_with_sheet(EngineConfig::default()).await?;
    let mut session = engine.state.sheet_service().open_sheet(&sheet_id).await?;
    let b = bob().id;

    assert_eq!(
        session.enter_dice_count(&b, ScoreField::Fives, 3).await?,
        ScoreValue::Numeric(15)
    );
    assert_eq!(
        session.enter_dice_count(&b, ScoreField::Twos, 0).await?,
        ScoreValue::Numeric(0)
    );
    assert_eq!(
        session.toggle_fixed(&b, ScoreField::LargeStraight).await?,
        ScoreValue::Numeric(40)
    );
    assert_eq!(
        session.toggle_stroke(&b, ScoreField::LargeStraight).await?,
        ScoreValue::Stroke
    );
    assert_eq!(
        session.enter_text(&b, ScoreField::ThreeOfAKind, " 24 ").await?,
        ScoreValue::Numeric(24)
    );
    assert_eq!(
        session.enter_text(&b, ScoreField::Kniffel, "-").await?,
        ScoreValue::Stroke
    );
    assert_eq!(
        session.clear_cell(&b, ScoreField::Kniffel).await?,
        ScoreValue::Empty
    );

    let stored = engine.store.find_sheet(&sheet_id).await?.expect("stored");
    assert_eq!(stored.cell(&b, ScoreField::Fives)?, ScoreValue::Numeric(15));
    assert_eq!(stored.cell(&b, ScoreField::Twos)?, ScoreValue::Numeric(0));
    assert_eq!(stored.cell(&b, ScoreField::LargeStraight)?, ScoreValue::Stroke);
    assert_eq!(stored.cell(&b, ScoreField::Kniffel)?, ScoreValue::Empty);
    Ok(())
}

#[tokio::test]
async fn illegal_value_changes_nothing() -> Result<(), AppError> {
    let (engine, sheet_id) = engine_with_sheet(EngineConfig::default()).await?;
    let mut session = engine.state.sheet_service().open_sheet(&sheet_id).await?;
    let c = carol().id;

    let err = session
        .set_cell(&c, ScoreField::Threes, ScoreValue::Numeric(10))
        .await
        .unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::InvalidScoreValue));
    assert_eq!(session.sheet().cell(&c, ScoreField::Threes)?, ScoreValue::Empty);

    let err = session
        .set_cell(&PlayerId::from("m-nobody"), ScoreField::Chance, ScoreValue::Numeric(5))
        .await
        .unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::PlayerNotOnSheet));
    Ok(())
}

#[tokio::test]
async fn failed_write_keeps_optimistic_value() -> Result<(), AppError> {
    let (engine, sheet_id) = engine_with_sheet(EngineConfig::default()).await?;
    let mut session = engine.state.sheet_service().open_sheet(&sheet_id).await?;
    let a = alice().id;

    engine.store.set_fail_writes(true);
    let err = session
        .set_cell(&a, ScoreField::Sixes, ScoreValue::Numeric(18))
        .await
        .unwrap_err();
    assert!(err.is_persistence());

    // No rollback: local copy still shows the value the store never got
    assert_eq!(session.sheet().cell(&a, ScoreField::Sixes)?, ScoreValue::Numeric(18));
    let stored = engine.store.find_sheet(&sheet_id).await?.expect("stored");
    assert_eq!(stored.cell(&a, ScoreField::Sixes)?, ScoreValue::Empty);

    // Re-reading the committed sheet resolves the divergence
    engine.store.set_fail_writes(false);
    let outcome = session.refresh().await?;
    assert_eq!(outcome.cell_changes.len(), 1);
    assert_eq!(session.sheet().cell(&a, ScoreField::Sixes)?, ScoreValue::Empty);
    Ok(())
}

#[tokio::test]
async fn first_write_of_a_cell_is_bounded_by_the_deadline() -> Result<(), AppError> {
    let config = EngineConfig::default().with_write_deadline(Some(Duration::from_millis(20)));
    let (engine, sheet_id) = engine_with_sheet(config).await?;
    let mut session = engine.state.sheet_service().open_sheet(&sheet_id).await?;
    let a = alice().id;

    engine.store.set_write_delay(Some(Duration::from_millis(250)));
    let err = session
        .set_cell(&a, ScoreField::Chance, ScoreValue::Numeric(20))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Infra(InfraErrorKind::Timeout, _)));
    assert_eq!(session.sheet().cell(&a, ScoreField::Chance)?, ScoreValue::Numeric(20));

    // The cell is no longer empty locally, so the next write waits it out
    let written = session
        .set_cell(&a, ScoreField::Chance, ScoreValue::Numeric(21))
        .await?;
    assert_eq!(written, ScoreValue::Numeric(21));
    let stored = engine.store.find_sheet(&sheet_id).await?.expect("stored");
    assert_eq!(stored.cell(&a, ScoreField::Chance)?, ScoreValue::Numeric(21));
    Ok(())
}

#[tokio::test]
async fn reorder_accepts_permutation_and_rejects_others() -> Result<(), AppError> {
    let (engine, sheet_id) = engine_with_sheet(EngineConfig::default()).await?;
    let mut session = engine.state.sheet_service().open_sheet(&sheet_id).await?;
    session
        .set_cell(&bob().id, ScoreField::Chance, ScoreValue::Numeric(19))
        .await?;

    let new_order = ids(&[carol(), bob(), alice()]);
    session
        .reorder_players(SortMode::Manual, new_order.clone())
        .await?;
    assert_eq!(session.sheet().player_order, new_order);

    let stored = engine.store.find_sheet(&sheet_id).await?.expect("stored");
    assert_eq!(stored.player_order, new_order);
    assert_eq!(stored.cell(&bob().id, ScoreField::Chance)?, ScoreValue::Numeric(19));

    let err = session
        .reorder_players(SortMode::Manual, ids(&[carol(), bob()]))
        .await
        .unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::NotAPermutation));
    assert_eq!(session.sheet().player_order, new_order);
    Ok(())
}

#[tokio::test]
async fn reorder_from_a_derived_sort_is_rejected() -> Result<(), AppError> {
    let (engine, sheet_id) = engine_with_sheet(EngineConfig::default()).await?;
    let mut session = engine.state.sheet_service().open_sheet(&sheet_id).await?;

    for basis in [SortMode::Alphabetical, SortMode::ScoreHigh, SortMode::ScoreLow] {
        let err = session
            .reorder_players(basis, ids(&[carol(), bob(), alice()]))
            .await
            .unwrap_err();
        assert_eq!(
            err.validation_kind(),
            Some(&ValidationKind::ReorderRequiresManual)
        );
    }

    assert_eq!(session.sheet().player_order, ids(&roster()));
    let stored = engine.store.find_sheet(&sheet_id).await?.expect("stored");
    assert_eq!(stored.player_order, ids(&roster()));
    Ok(())
}

#[tokio::test]
async fn sorted_view_leaves_manual_order_alone() -> Result<(), AppError> {
    let (engine, sheet_id) = engine_with_sheet(EngineConfig::default()).await?;
    let ctx = engine.ctx(&alice()).await?;
    let mut session = engine.state.sheet_service().open_sheet(&sheet_id).await?;
    session
        .set_cell(&carol().id, ScoreField::Chance, ScoreValue::Numeric(30))
        .await?;
    session
        .set_cell(&alice().id, ScoreField::Chance, ScoreValue::Numeric(10))
        .await?;

    let by_score = session.view(&ctx, SortMode::ScoreHigh);
    assert_eq!(by_score.player_ids(), vec!["m-carol", "m-alice", "m-bob"]);

    let manual = session.view(&ctx, SortMode::Manual);
    assert_eq!(manual.player_ids(), vec!["m-alice", "m-bob", "m-carol"]);
    assert_eq!(session.sheet().player_order, ids(&roster()));
    Ok(())
}

#[tokio::test]
async fn delete_ends_subscriptions_and_removes_sheet() -> Result<(), AppError> {
    let (engine, sheet_id) = engine_with_sheet(EngineConfig::default()).await?;
    let ctx = engine.ctx(&alice()).await?;
    let service = engine.state.sheet_service();
    let mut session = service.open_sheet(&sheet_id).await?;

    service.delete_sheet(&ctx, &sheet_id).await?;

    assert!(session.next_remote().await.is_none());
    assert!(engine.store.is_empty());
    let err = service.find_sheet(&sheet_id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Sheet, _)));

    let again = service.delete_sheet(&ctx, &sheet_id).await.unwrap_err();
    assert!(matches!(again, DomainError::NotFound(NotFoundKind::Sheet, _)));
    Ok(())
}

#[tokio::test]
async fn opening_missing_sheet_is_not_found() -> Result<(), AppError> {
    let engine = memory_engine(EngineConfig::default()).await?;
    let err = engine
        .state
        .sheet_service()
        .open_sheet(&kniffel::domain::SheetId::from("missing"))
        .await
        .err()
        .expect("missing sheet");
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Sheet, _)));
    Ok(())
}
