//! Adapters for external collaborators.

pub mod members_memory;
pub mod members_sea;
pub mod penalties_http;
pub mod penalties_memory;
pub mod sheets_memory;
pub mod sheets_sea;

pub use members_memory::MemberRepoMemory;
pub use members_sea::MemberRepoSea;
pub use penalties_http::HttpPenaltyLedger;
pub use penalties_memory::RecordingPenaltyLedger;
pub use sheets_memory::SheetRepoMemory;
pub use sheets_sea::SheetRepoSea;
