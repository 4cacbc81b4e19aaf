//! Display-only ordering of resolved players. Never touches `player_order`.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::derivation::PlayerSummary;
use crate::domain::player::{Player, PlayerId};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Persisted seating order.
    #[default]
    Manual,
    Alphabetical,
    ScoreHigh,
    ScoreLow,
}

impl SortMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortMode::Manual => "manual",
            SortMode::Alphabetical => "alphabetical",
            SortMode::ScoreHigh => "score_high",
            SortMode::ScoreLow => "score_low",
        }
    }

    /// Drag-to-reorder only makes sense on top of the manual order.
    pub const fn allows_reorder(self) -> bool {
        matches!(self, SortMode::Manual)
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(SortMode::Manual),
            "alphabetical" => Ok(SortMode::Alphabetical),
            "score_high" => Ok(SortMode::ScoreHigh),
            "score_low" => Ok(SortMode::ScoreLow),
            other => Err(DomainError::validation_other(format!(
                "unknown sort mode '{other}'"
            ))),
        }
    }
}

/// Reorder `players` (given in manual order) for display.
///
/// The sort is stable, so ties keep their manual seating.
pub fn sort_players(
    mut players: Vec<Player>,
    summaries: &HashMap<PlayerId, PlayerSummary>,
    mode: SortMode,
) -> Vec<Player> {
    let total = |p: &Player| summaries.get(p.id()).map(|s| s.total).unwrap_or_default();

    match mode {
        SortMode::Manual => {}
        SortMode::Alphabetical => players.sort_by(|a, b| compare_names(a.display_name(), b.display_name())),
        SortMode::ScoreHigh => players.sort_by(|a, b| total(b).cmp(&total(a))),
        SortMode::ScoreLow => players.sort_by(|a, b| total(a).cmp(&total(b))),
    }
    players
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
