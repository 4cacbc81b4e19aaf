//! Sheet lifecycle: creation, optimistic cell edits, reorder, remote merge
//! and deletion.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::config::engine::EngineConfig;
use crate::domain::entry::parse_entry;
use crate::domain::rules::MIN_PLAYERS;
use crate::domain::{
    apply_edit, build_view, merge_remote, CellEdit, GuestDraft, GuestPlayer, MergeOutcome, Period,
    PlayerId, ScoreField, ScoreSheet, ScoreValue, SheetId, SheetView, SortMode,
};
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};
use crate::realtime::{SheetFeedHub, SheetSubscription};
use crate::repos::sheets::{require_sheet, SheetRepo};
use crate::services::context::SessionContext;

/// Await `fut`, failing with an infra timeout once `deadline` elapses.
async fn within_deadline<T, F>(
    deadline: Option<Duration>,
    what: &str,
    fut: F,
) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    match deadline {
        Some(limit) => tokio::time::timeout(limit, fut).await.map_err(|_| {
            DomainError::infra(
                InfraErrorKind::Timeout,
                format!("{what} did not complete within {}ms", limit.as_millis()),
            )
        })?,
        None => fut.await,
    }
}

/// Entry point for sheet operations. Cheap to clone.
#[derive(Clone)]
pub struct SheetService {
    repo: Arc<dyn SheetRepo>,
    hub: Arc<SheetFeedHub>,
    write_deadline: Option<Duration>,
}

impl SheetService {
    pub fn new(repo: Arc<dyn SheetRepo>, hub: Arc<SheetFeedHub>, config: &EngineConfig) -> Self {
        Self {
            repo,
            hub,
            write_deadline: config.write_deadline,
        }
    }

    /// Create a sheet seating `ordered_ids` (members and guest draft ids) in
    /// that order, with every column empty.
    pub async fn create_sheet(
        &self,
        ctx: &SessionContext,
        period: Period,
        ordered_ids: Vec<PlayerId>,
        guest_drafts: Vec<GuestDraft>,
    ) -> Result<ScoreSheet, DomainError> {
        let period = Period::new(period.year, period.month)?;
        let guests = validate_roster(ctx, &ordered_ids, guest_drafts)?;

        let sheet = ScoreSheet::new(
            SheetId::generate(),
            period,
            OffsetDateTime::now_utc(),
            ordered_ids,
            guests,
        );

        within_deadline(
            self.write_deadline,
            "sheet creation",
            self.repo.create_sheet(&sheet),
        )
        .await
        .inspect_err(|e| warn!(error = %e, "Sheet creation failed"))?;

        info!(
            sheet_id = %sheet.id,
            period = %sheet.period,
            players = sheet.player_order.len(),
            guests = sheet.guests.len(),
            created_by = %ctx.acting_member,
            "Created score sheet"
        );
        Ok(sheet)
    }

    /// Open a client-local copy of the sheet, subscribed to its feed.
    pub async fn open_sheet(&self, sheet_id: &SheetId) -> Result<SheetSession, DomainError> {
        // Subscribe before loading so no commit between the two is missed.
        let subscription = self.hub.subscribe(sheet_id);
        let sheet = require_sheet(self.repo.as_ref(), sheet_id).await?;
        debug!(sheet_id = %sheet_id, "Opened sheet session");

        Ok(SheetSession {
            sheet,
            repo: Arc::clone(&self.repo),
            subscription,
            write_deadline: self.write_deadline,
        })
    }

    pub async fn find_sheet(&self, sheet_id: &SheetId) -> Result<ScoreSheet, DomainError> {
        require_sheet(self.repo.as_ref(), sheet_id).await
    }

    /// Remove the sheet with all its cells and end every open subscription.
    pub async fn delete_sheet(
        &self,
        ctx: &SessionContext,
        sheet_id: &SheetId,
    ) -> Result<(), DomainError> {
        self.repo.delete_sheet(sheet_id).await?;
        self.hub.close(sheet_id);
        info!(sheet_id = %sheet_id, deleted_by = %ctx.acting_member, "Deleted score sheet");
        Ok(())
    }
}

/// Check seating and guests; returns the frozen guest snapshots.
fn validate_roster(
    ctx: &SessionContext,
    ordered_ids: &[PlayerId],
    guest_drafts: Vec<GuestDraft>,
) -> Result<Vec<GuestPlayer>, DomainError> {
    if ordered_ids.len() < MIN_PLAYERS {
        return Err(DomainError::validation(
            ValidationKind::TooFewPlayers,
            format!(
                "a sheet needs at least {MIN_PLAYERS} players, got {}",
                ordered_ids.len()
            ),
        ));
    }

    let mut seen = HashSet::new();
    for pid in ordered_ids {
        if !seen.insert(pid) {
            return Err(DomainError::validation(
                ValidationKind::DuplicatePlayer,
                format!("player {pid} is seated twice"),
            ));
        }
    }

    let mut guests = Vec::with_capacity(guest_drafts.len());
    for draft in guest_drafts {
        let host = match &draft.host_member_id {
            Some(host) if !host.is_blank() => host.clone(),
            _ => {
                return Err(DomainError::validation(
                    ValidationKind::GuestMissingHost,
                    format!("guest '{}' has no host member", draft.display_name),
                ))
            }
        };
        if !ctx.is_member(&host) {
            return Err(DomainError::validation(
                ValidationKind::UnknownHost,
                format!(
                    "host {host} of guest '{}' is not a roster member",
                    draft.display_name
                ),
            ));
        }
        if draft.id.is_blank() || ctx.is_member(&draft.id) {
            return Err(DomainError::validation(
                ValidationKind::DuplicatePlayer,
                format!("guest '{}' needs an id of its own", draft.display_name),
            ));
        }
        if !seen.contains(&draft.id) {
            return Err(DomainError::validation_other(format!(
                "guest '{}' is not seated on the sheet",
                draft.display_name
            )));
        }
        guests.push(draft.into_guest(host));
    }

    for pid in ordered_ids {
        if !ctx.is_member(pid) && !guests.iter().any(|g| &g.id == pid) {
            return Err(DomainError::validation(
                ValidationKind::UnknownPlayer,
                format!("player {pid} is neither a roster member nor a guest"),
            ));
        }
    }

    Ok(guests)
}

/// One participant's optimistic copy of a sheet.
///
/// Edits update the local copy first and then write exactly the touched
/// cell. A failed write is reported but the local value stays; the next
/// remote snapshot decides what the cell finally holds.
pub struct SheetSession {
    sheet: ScoreSheet,
    repo: Arc<dyn SheetRepo>,
    subscription: SheetSubscription,
    write_deadline: Option<Duration>,
}

impl SheetSession {
    pub fn sheet(&self) -> &ScoreSheet {
        &self.sheet
    }

    pub fn sheet_id(&self) -> &SheetId {
        &self.sheet.id
    }

    pub async fn set_cell(
        &mut self,
        player: &PlayerId,
        field: ScoreField,
        value: ScoreValue,
    ) -> Result<ScoreValue, DomainError> {
        self.edit(player, field, CellEdit::Set(value)).await
    }

    /// Free-text entry: blank clears, `-` strokes, digits set a value.
    pub async fn enter_text(
        &mut self,
        player: &PlayerId,
        field: ScoreField,
        raw: &str,
    ) -> Result<ScoreValue, DomainError> {
        let value = parse_entry(field, raw)?;
        self.edit(player, field, CellEdit::Set(value)).await
    }

    pub async fn toggle_stroke(
        &mut self,
        player: &PlayerId,
        field: ScoreField,
    ) -> Result<ScoreValue, DomainError> {
        self.edit(player, field, CellEdit::ToggleStroke).await
    }

    pub async fn toggle_fixed(
        &mut self,
        player: &PlayerId,
        field: ScoreField,
    ) -> Result<ScoreValue, DomainError> {
        self.edit(player, field, CellEdit::ToggleFixed).await
    }

    pub async fn enter_dice_count(
        &mut self,
        player: &PlayerId,
        field: ScoreField,
        dice: u8,
    ) -> Result<ScoreValue, DomainError> {
        self.edit(player, field, CellEdit::DiceCount(dice)).await
    }

    pub async fn clear_cell(
        &mut self,
        player: &PlayerId,
        field: ScoreField,
    ) -> Result<ScoreValue, DomainError> {
        self.edit(player, field, CellEdit::Clear).await
    }

    async fn edit(
        &mut self,
        player: &PlayerId,
        field: ScoreField,
        edit: CellEdit,
    ) -> Result<ScoreValue, DomainError> {
        let current = self.sheet.cell(player, field)?;
        let next = apply_edit(current, field, edit)?;
        self.sheet.put_cell(player, field, next)?;

        let write = self.repo.write_cell(&self.sheet.id, player, field, next);
        let result = if current.is_empty() {
            within_deadline(self.write_deadline, "first write of cell", write).await
        } else {
            write.await
        };

        if let Err(e) = result {
            // Optimistic value stays in place; see SheetSession docs.
            warn!(
                sheet_id = %self.sheet.id,
                player_id = %player,
                field = %field,
                error = %e,
                "Cell write failed; local value kept"
            );
            return Err(e);
        }

        debug!(sheet_id = %self.sheet.id, player_id = %player, field = %field, "Cell written");
        Ok(next)
    }

    /// Replace the seating order with a permutation of the current one.
    /// `basis` is the sort mode the caller was displaying; only a reorder of
    /// the manual order is accepted.
    pub async fn reorder_players(
        &mut self,
        basis: SortMode,
        new_order: Vec<PlayerId>,
    ) -> Result<(), DomainError> {
        if !basis.allows_reorder() {
            return Err(DomainError::validation(
                ValidationKind::ReorderRequiresManual,
                format!("players can only be reordered in manual mode, not {basis}"),
            ));
        }
        self.sheet.set_order(new_order)?;

        if let Err(e) = self
            .repo
            .replace_order(&self.sheet.id, &self.sheet.player_order)
            .await
        {
            warn!(sheet_id = %self.sheet.id, error = %e, "Reorder write failed; local order kept");
            return Err(e);
        }
        info!(sheet_id = %self.sheet.id, "Reordered players");
        Ok(())
    }

    /// Adopt a committed snapshot; the remote value wins for every cell.
    pub fn apply_remote(&mut self, snapshot: ScoreSheet) -> MergeOutcome {
        if snapshot.id != self.sheet.id {
            debug!(
                sheet_id = %self.sheet.id,
                other = %snapshot.id,
                "Ignoring snapshot of another sheet"
            );
            return MergeOutcome::default();
        }

        let outcome = merge_remote(&mut self.sheet, snapshot);
        debug!(
            sheet_id = %self.sheet.id,
            changed_cells = outcome.cell_changes.len(),
            order_changed = outcome.order_changed,
            "Merged remote snapshot"
        );
        outcome
    }

    /// Wait for the next remote snapshot and merge it. `None` once the
    /// sheet has been deleted.
    pub async fn next_remote(&mut self) -> Option<MergeOutcome> {
        let snapshot = self.subscription.next().await?;
        Some(self.apply_remote(snapshot))
    }

    /// Merge every snapshot that is already waiting, without blocking.
    pub fn drain_remote(&mut self) -> Vec<MergeOutcome> {
        let mut outcomes = Vec::new();
        while let Some(snapshot) = self.subscription.try_next() {
            outcomes.push(self.apply_remote(snapshot));
        }
        outcomes
    }

    /// Re-read the committed sheet and merge it, e.g. after a failed write.
    pub async fn refresh(&mut self) -> Result<MergeOutcome, DomainError> {
        let snapshot = require_sheet(self.repo.as_ref(), &self.sheet.id).await?;
        Ok(self.apply_remote(snapshot))
    }

    /// Resolved, sorted rows with their summaries for one render.
    pub fn view(&self, ctx: &SessionContext, sort_mode: SortMode) -> SheetView {
        build_view(&self.sheet, &ctx.members, sort_mode)
    }
}
