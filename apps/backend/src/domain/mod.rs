//! Domain layer: pure scoresheet types and rules.

pub mod derivation;
pub mod entry;
pub mod fields;
pub mod merge;
pub mod player;
pub mod roster;
pub mod rules;
pub mod score_value;
pub mod scores;
pub mod sheet;
pub mod sort;
pub mod view;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_highlights;

// Re-exports for ergonomics
pub use derivation::{summarize, summarize_sheet, ChanceRank, PlayerSummary};
pub use entry::{apply_edit, CellEdit};
pub use fields::{EntryDiscipline, ScoreField, Section};
pub use merge::{merge_remote, CellChange, MergeOutcome};
pub use player::{resolve_billing_target, GuestDraft, GuestPlayer, Member, Player, PlayerId};
pub use roster::resolve_players;
pub use score_value::ScoreValue;
pub use scores::KniffelScores;
pub use sheet::{Period, ScoreSheet, SheetId};
pub use sort::SortMode;
pub use view::{build_view, PlayerRow, SheetView};
