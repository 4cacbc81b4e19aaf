//! Collaborator traits the engine talks to, plus their domain records.

pub mod members;
pub mod penalties;
pub mod sheets;

pub use members::MemberRepo;
pub use penalties::{GuestMetadata, PenaltyLedger, PenaltyReceipt, PenaltyRequest};
pub use sheets::SheetRepo;
