//! Reconcile a committed remote snapshot into a client's local copy.
//!
//! Conflict policy is last-write-wins per cell: whatever the persistence
//! layer committed replaces the local value, with no conflict signal.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::fields::ScoreField;
use crate::domain::player::PlayerId;
use crate::domain::score_value::ScoreValue;
use crate::domain::sheet::ScoreSheet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellChange {
    pub player_id: PlayerId,
    pub field: ScoreField,
    pub before: ScoreValue,
    pub after: ScoreValue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    pub cell_changes: Vec<CellChange>,
    pub order_changed: bool,
}

impl MergeOutcome {
    pub fn is_noop(&self) -> bool {
        self.cell_changes.is_empty() && !self.order_changed
    }
}

/// Cells that differ between `local` and `remote`, walking the remote
/// seating order first, then any local-only columns, each in field order.
pub fn diff_cells(local: &ScoreSheet, remote: &ScoreSheet) -> Vec<CellChange> {
    let mut players: Vec<&PlayerId> = Vec::new();
    let mut seen: HashSet<&PlayerId> = HashSet::new();
    let mut stray: Vec<&PlayerId> = local
        .scores
        .keys()
        .chain(remote.scores.keys())
        .filter(|pid| !remote.player_order.contains(*pid) && !local.player_order.contains(*pid))
        .collect();
    stray.sort();
    for pid in remote
        .player_order
        .iter()
        .chain(local.player_order.iter())
        .chain(stray)
    {
        if seen.insert(pid) {
            players.push(pid);
        }
    }

    let mut changes = Vec::new();
    for pid in players {
        let before = local.scores.get(pid).copied().unwrap_or_default();
        let after = remote.scores.get(pid).copied().unwrap_or_default();
        for field in ScoreField::ALL {
            let (b, a) = (before.get(field), after.get(field));
            if b != a {
                changes.push(CellChange {
                    player_id: pid.clone(),
                    field,
                    before: b,
                    after: a,
                });
            }
        }
    }
    changes
}

/// Adopt `remote` as the new local state and report what changed.
pub fn merge_remote(local: &mut ScoreSheet, mut remote: ScoreSheet) -> MergeOutcome {
    remote.ensure_columns();
    let outcome = MergeOutcome {
        cell_changes: diff_cells(local, &remote),
        order_changed: local.player_order != remote.player_order,
    };
    *local = remote;
    outcome
}
