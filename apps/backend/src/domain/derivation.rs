//! Derived figures: section sums, bonus, totals and cross-player highlights.
//!
//! Nothing here is persisted; everything is recomputed from raw cells.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::fields::ScoreField;
use crate::domain::player::PlayerId;
use crate::domain::rules::{BONUS_POINTS, BONUS_THRESHOLD, PAR_DICE_PER_FACE};
use crate::domain::scores::KniffelScores;
use crate::domain::sheet::ScoreSheet;

/// Chance-field rank among all players with a filled chance cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanceRank {
    Highest,
    Lowest,
}

/// Everything a scoresheet column shows below the raw cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub upper_sum: u32,
    pub bonus: u32,
    pub lower_sum: u32,
    pub total: u32,
    /// Top combination holds a positive number.
    pub top_combination: bool,
    pub chance_rank: Option<ChanceRank>,
}

pub fn upper_sum(scores: &KniffelScores) -> u32 {
    ScoreField::UPPER
        .iter()
        .map(|&f| scores.get(f).contribution())
        .sum()
}

pub fn bonus(upper_sum: u32) -> u32 {
    if upper_sum >= BONUS_THRESHOLD {
        BONUS_POINTS
    } else {
        0
    }
}

pub fn lower_sum(scores: &KniffelScores) -> u32 {
    ScoreField::LOWER
        .iter()
        .map(|&f| scores.get(f).contribution())
        .sum()
}

pub fn total(scores: &KniffelScores) -> u32 {
    let upper = upper_sum(scores);
    upper + bonus(upper) + lower_sum(scores)
}

/// Per-player figures without the cross-player chance rank.
pub fn summarize(scores: &KniffelScores) -> PlayerSummary {
    let upper = upper_sum(scores);
    let bonus = bonus(upper);
    let lower = lower_sum(scores);
    PlayerSummary {
        upper_sum: upper,
        bonus,
        lower_sum: lower,
        total: upper + bonus + lower,
        top_combination: top_combination_highlight(scores),
        chance_rank: None,
    }
}

pub fn top_combination_highlight(scores: &KniffelScores) -> bool {
    matches!(scores.get(ScoreField::Kniffel).numeric(), Some(v) if v > 0)
}

/// Distance from the bonus par line (three dice of every face) over the
/// upper cells already played. Positive means ahead of par.
pub fn bonus_progress(scores: &KniffelScores) -> i32 {
    ScoreField::UPPER
        .iter()
        .filter_map(|&field| {
            let value = scores.get(field);
            let face = field.face()?;
            if value.is_empty() {
                return None;
            }
            let par = i32::from(face) * i32::from(PAR_DICE_PER_FACE);
            Some(value.contribution() as i32 - par)
        })
        .sum()
}

/// Every cell is either a number or a stroke.
pub fn is_complete(scores: &KniffelScores) -> bool {
    scores.iter().all(|(_, v)| v.is_filled())
}

/// Chance ranks across players.
///
/// Needs at least two filled chance cells. The max check runs first, so when
/// all filled values are equal everyone is `Highest`.
pub fn chance_ranks<'a, I>(columns: I) -> HashMap<PlayerId, ChanceRank>
where
    I: IntoIterator<Item = (&'a PlayerId, &'a KniffelScores)>,
{
    let filled: Vec<(&PlayerId, u16)> = columns
        .into_iter()
        .filter_map(|(pid, scores)| scores.get(ScoreField::Chance).numeric().map(|v| (pid, v)))
        .collect();

    if filled.len() < 2 {
        return HashMap::new();
    }

    let max = filled.iter().map(|(_, v)| *v).max().unwrap_or_default();
    let min = filled.iter().map(|(_, v)| *v).min().unwrap_or_default();

    filled
        .into_iter()
        .filter_map(|(pid, v)| {
            if v == max {
                Some((pid.clone(), ChanceRank::Highest))
            } else if v == min {
                Some((pid.clone(), ChanceRank::Lowest))
            } else {
                None
            }
        })
        .collect()
}

/// Summaries for every seated player of a sheet, highlights included.
pub fn summarize_sheet(sheet: &ScoreSheet) -> HashMap<PlayerId, PlayerSummary> {
    let columns: Vec<(&PlayerId, &KniffelScores)> = sheet
        .player_order
        .iter()
        .filter_map(|pid| sheet.scores.get(pid).map(|s| (pid, s)))
        .collect();

    let ranks = chance_ranks(columns.iter().copied());

    columns
        .into_iter()
        .map(|(pid, scores)| {
            let mut summary = summarize(scores);
            summary.chance_rank = ranks.get(pid).copied();
            (pid.clone(), summary)
        })
        .collect()
}
