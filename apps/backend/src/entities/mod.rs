pub mod members;
pub mod score_cells;
pub mod score_sheets;

pub use members::Entity as Members;
pub use members::Model as MemberRow;
pub use score_cells::Entity as ScoreCells;
pub use score_cells::Model as ScoreCell;
pub use score_sheets::Entity as ScoreSheets;
pub use score_sheets::Model as ScoreSheetRow;
