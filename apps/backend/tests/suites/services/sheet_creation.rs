use kniffel::domain::{
    resolve_billing_target, GuestDraft, Period, Player, PlayerId, ScoreField, ScoreValue,
};
use kniffel::errors::domain::ValidationKind;
use kniffel::{AppError, EngineConfig};

use crate::support::{alice, bob, carol, guest_of, ids, memory_engine, october, roster};

#[tokio::test]
async fn creates_sheet_with_empty_columns_in_given_order() -> Result<(), AppError> {
    let engine = memory_engine(EngineConfig::default()).await?;
    let ctx = engine.ctx(&alice()).await?;
    let order = ids(&[carol(), alice(), bob()]);

    let sheet = engine
        .state
        .sheet_service()
        .create_sheet(&ctx, october(), order.clone(), Vec::new())
        .await?;

    assert_eq!(sheet.player_order, order);
    assert_eq!(sheet.scores.len(), 3);
    for pid in &order {
        for field in ScoreField::ALL {
            assert_eq!(sheet.cell(pid, field)?, ScoreValue::Empty);
        }
    }
    assert_eq!(engine.store.len(), 1);
    Ok(())
}

#[tokio::test]
async fn rejects_single_player() -> Result<(), AppError> {
    let engine = memory_engine(EngineConfig::default()).await?;
    let ctx = engine.ctx(&alice()).await?;

    let err = engine
        .state
        .sheet_service()
        .create_sheet(&ctx, october(), ids(&[alice()]), Vec::new())
        .await
        .unwrap_err();

    assert_eq!(err.validation_kind(), Some(&ValidationKind::TooFewPlayers));
    assert!(engine.store.is_empty());
    Ok(())
}

#[tokio::test]
async fn rejects_duplicate_seat() -> Result<(), AppError> {
    let engine = memory_engine(EngineConfig::default()).await?;
    let ctx = engine.ctx(&alice()).await?;

    let err = engine
        .state
        .sheet_service()
        .create_sheet(&ctx, october(), ids(&[alice(), bob(), alice()]), Vec::new())
        .await
        .unwrap_err();

    assert_eq!(err.validation_kind(), Some(&ValidationKind::DuplicatePlayer));
    Ok(())
}

#[tokio::test]
async fn rejects_unknown_player() -> Result<(), AppError> {
    let engine = memory_engine(EngineConfig::default()).await?;
    let ctx = engine.ctx(&alice()).await?;
    let mut order = ids(&[alice(), bob()]);
    order.push(PlayerId::from("m-nobody"));

    let err = engine
        .state
        .sheet_service()
        .create_sheet(&ctx, october(), order, Vec::new())
        .await
        .unwrap_err();

    assert_eq!(err.validation_kind(), Some(&ValidationKind::UnknownPlayer));
    Ok(())
}

#[tokio::test]
async fn rejects_invalid_period() -> Result<(), AppError> {
    let engine = memory_engine(EngineConfig::default()).await?;
    let ctx = engine.ctx(&alice()).await?;

    let err = engine
        .state
        .sheet_service()
        .create_sheet(
            &ctx,
            Period { year: 2026, month: 13 },
            ids(&[alice(), bob()]),
            Vec::new(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.validation_kind(), Some(&ValidationKind::InvalidPeriod));
    Ok(())
}

#[tokio::test]
async fn guest_without_host_is_rejected() -> Result<(), AppError> {
    let engine = memory_engine(EngineConfig::default()).await?;
    let ctx = engine.ctx(&alice()).await?;
    let guest = GuestDraft::new("Gus", None);
    let order = vec![alice().id, guest.id.clone()];

    let err = engine
        .state
        .sheet_service()
        .create_sheet(&ctx, october(), order, vec![guest])
        .await
        .unwrap_err();

    assert_eq!(err.validation_kind(), Some(&ValidationKind::GuestMissingHost));
    assert!(engine.store.is_empty());
    Ok(())
}

#[tokio::test]
async fn guest_with_blank_host_is_rejected() -> Result<(), AppError> {
    let engine = memory_engine(EngineConfig::default()).await?;
    let ctx = engine.ctx(&alice()).await?;
    let guest = GuestDraft::new("Gus", Some("  "));
    let order = vec![alice().id, guest.id.clone()];

    let err = engine
        .state
        .sheet_service()
        .create_sheet(&ctx, october(), order, vec![guest])
        .await
        .unwrap_err();

    assert_eq!(err.validation_kind(), Some(&ValidationKind::GuestMissingHost));
    Ok(())
}

#[tokio::test]
async fn guest_hosted_by_non_member_is_rejected() -> Result<(), AppError> {
    let engine = memory_engine(EngineConfig::default()).await?;
    let ctx = engine.ctx(&alice()).await?;
    let guest = GuestDraft::new("Gus", Some("m-outsider"));
    let order = vec![alice().id, guest.id.clone()];

    let err = engine
        .state
        .sheet_service()
        .create_sheet(&ctx, october(), order, vec![guest])
        .await
        .unwrap_err();

    assert_eq!(err.validation_kind(), Some(&ValidationKind::UnknownHost));
    Ok(())
}

#[tokio::test]
async fn guest_not_in_seating_is_rejected() -> Result<(), AppError> {
    let engine = memory_engine(EngineConfig::default()).await?;
    let ctx = engine.ctx(&alice()).await?;

    let err = engine
        .state
        .sheet_service()
        .create_sheet(
            &ctx,
            october(),
            ids(&[alice(), bob()]),
            vec![guest_of("Gus", &bob())],
        )
        .await
        .unwrap_err();

    assert!(matches!(err.validation_kind(), Some(ValidationKind::Other(_))));
    Ok(())
}

#[tokio::test]
async fn hosted_guest_is_seated_and_bills_to_host() -> Result<(), AppError> {
    let engine = memory_engine(EngineConfig::default()).await?;
    let ctx = engine.ctx(&alice()).await?;
    let guest = guest_of("Gus", &bob());
    let guest_id = guest.id.clone();
    let order = vec![alice().id, guest_id.clone(), bob().id];

    let sheet = engine
        .state
        .sheet_service()
        .create_sheet(&ctx, october(), order, vec![guest])
        .await?;

    let stored = sheet.guest(&guest_id).expect("guest snapshot").clone();
    assert_eq!(stored.display_name, "Gus");
    assert_eq!(stored.host_member_id, bob().id);
    assert_eq!(resolve_billing_target(&Player::Guest(stored))?, bob().id);
    assert_eq!(sheet.cell(&guest_id, ScoreField::Chance)?, ScoreValue::Empty);
    Ok(())
}

#[tokio::test]
async fn roster_changes_after_creation_do_not_touch_the_sheet() -> Result<(), AppError> {
    let engine = memory_engine(EngineConfig::default()).await?;
    let ctx = engine.ctx(&alice()).await?;
    let service = engine.state.sheet_service();
    let sheet = service
        .create_sheet(&ctx, october(), ids(&roster()), Vec::new())
        .await?;

    engine.members.remove(&carol().id);

    let reloaded = service.find_sheet(&sheet.id).await?;
    assert_eq!(reloaded.player_order, sheet.player_order);
    Ok(())
}
