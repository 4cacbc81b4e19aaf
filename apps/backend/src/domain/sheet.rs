use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use ulid::Ulid;

use crate::domain::fields::ScoreField;
use crate::domain::player::{GuestPlayer, PlayerId};
use crate::domain::score_value::ScoreValue;
use crate::domain::scores::KniffelScores;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetId(String);

impl SheetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SheetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Session period key of a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u8,
}

impl Period {
    pub fn new(year: i32, month: u8) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) || year <= 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidPeriod,
                format!("invalid period {year}-{month:02}"),
            ));
        }
        Ok(Self { year, month })
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// One scoresheet for one play session.
///
/// `player_order` is the single source of truth for seating; every id in it
/// has an entry in `scores`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSheet {
    pub id: SheetId,
    pub period: Period,
    pub created_at: OffsetDateTime,
    pub player_order: Vec<PlayerId>,
    pub guests: Vec<GuestPlayer>,
    pub scores: HashMap<PlayerId, KniffelScores>,
}

impl ScoreSheet {
    /// Fresh sheet with all-empty columns for every seated player.
    pub fn new(
        id: SheetId,
        period: Period,
        created_at: OffsetDateTime,
        player_order: Vec<PlayerId>,
        guests: Vec<GuestPlayer>,
    ) -> Self {
        let scores = player_order
            .iter()
            .map(|pid| (pid.clone(), KniffelScores::default()))
            .collect();
        Self {
            id,
            period,
            created_at,
            player_order,
            guests,
            scores,
        }
    }

    /// Restore the column invariant after loading a stored document.
    pub fn ensure_columns(&mut self) {
        for pid in &self.player_order {
            self.scores.entry(pid.clone()).or_default();
        }
    }

    pub fn is_seated(&self, player: &PlayerId) -> bool {
        self.player_order.contains(player)
    }

    pub fn guest(&self, id: &PlayerId) -> Option<&GuestPlayer> {
        self.guests.iter().find(|g| &g.id == id)
    }

    pub fn scores_for(&self, player: &PlayerId) -> Option<&KniffelScores> {
        self.scores.get(player)
    }

    pub fn cell(&self, player: &PlayerId, field: ScoreField) -> Result<ScoreValue, DomainError> {
        self.require_seated(player)?;
        Ok(self
            .scores
            .get(player)
            .map(|s| s.get(field))
            .unwrap_or_default())
    }

    /// Overwrite a single cell, returning the previous value.
    pub fn put_cell(
        &mut self,
        player: &PlayerId,
        field: ScoreField,
        value: ScoreValue,
    ) -> Result<ScoreValue, DomainError> {
        self.require_seated(player)?;
        Ok(self.scores.entry(player.clone()).or_default().set(field, value))
    }

    /// Reject anything that is not a permutation of the current seating.
    pub fn check_permutation(&self, new_order: &[PlayerId]) -> Result<(), DomainError> {
        let current: HashSet<&PlayerId> = self.player_order.iter().collect();
        let proposed: HashSet<&PlayerId> = new_order.iter().collect();

        if new_order.len() != self.player_order.len()
            || proposed.len() != new_order.len()
            || proposed != current
        {
            return Err(DomainError::validation(
                ValidationKind::NotAPermutation,
                format!(
                    "new order must be a permutation of the {} seated players",
                    self.player_order.len()
                ),
            ));
        }
        Ok(())
    }

    /// Replace the seating order atomically.
    pub fn set_order(&mut self, new_order: Vec<PlayerId>) -> Result<(), DomainError> {
        self.check_permutation(&new_order)?;
        self.player_order = new_order;
        Ok(())
    }

    fn require_seated(&self, player: &PlayerId) -> Result<(), DomainError> {
        if !self.is_seated(player) {
            return Err(DomainError::validation(
                ValidationKind::PlayerNotOnSheet,
                format!("player {player} is not seated on sheet {}", self.id),
            ));
        }
        Ok(())
    }
}
