//! Multiplayer scoring engine for Kniffel scoresheets.
//!
//! `domain` holds the pure model and every derived figure; `services` runs
//! the sheet lifecycle against the collaborator traits in `repos`, with
//! sea-orm, HTTP and in-memory implementations under `adapters`.

#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod infra;
pub mod realtime;
pub mod repos;
pub mod services;
pub mod telemetry;

// Re-exports for public API
pub use config::db::{db_url, DbOwner, DbProfile};
pub use config::engine::EngineConfig;
pub use error::AppError;
pub use errors::domain::DomainError;
pub use infra::db::{bootstrap_db, connect_db, connect_url};
pub use infra::state::{build_state, EngineState, StateBuilder};
pub use realtime::{SheetFeedHub, SheetSubscription};
pub use services::{PenaltyService, SessionContext, SheetService, SheetSession};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
