//! Engine services: sheet lifecycle and the penalty trigger.

pub mod context;
pub mod penalties;
pub mod sheets;

pub use context::SessionContext;
pub use penalties::PenaltyService;
pub use sheets::{SheetService, SheetSession};
