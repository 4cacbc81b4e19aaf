//! Render-ready view of a sheet: resolved players, raw cells and summaries.

use serde::Serialize;

use crate::domain::derivation::{summarize_sheet, PlayerSummary};
use crate::domain::player::{Member, Player};
use crate::domain::roster::resolve_players;
use crate::domain::scores::KniffelScores;
use crate::domain::sheet::{Period, ScoreSheet, SheetId};
use crate::domain::sort::{sort_players, SortMode};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRow {
    pub player: Player,
    pub scores: KniffelScores,
    pub summary: PlayerSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetView {
    pub sheet_id: SheetId,
    pub period: Period,
    pub sort_mode: SortMode,
    pub rows: Vec<PlayerRow>,
}

impl SheetView {
    pub fn player_ids(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.player.id().as_str()).collect()
    }
}

/// Build the view for one render pass.
pub fn build_view(sheet: &ScoreSheet, members: &[Member], mode: SortMode) -> SheetView {
    let summaries = summarize_sheet(sheet);
    let players = resolve_players(&sheet.player_order, members, &sheet.guests);
    let players = sort_players(players, &summaries, mode);

    let rows = players
        .into_iter()
        .map(|player| {
            let scores = sheet.scores_for(player.id()).copied().unwrap_or_default();
            let summary = summaries.get(player.id()).copied().unwrap_or_default();
            PlayerRow {
                player,
                scores,
                summary,
            }
        })
        .collect();

    SheetView {
        sheet_id: sheet.id.clone(),
        period: sheet.period,
        sort_mode: mode,
        rows,
    }
}
