use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use crate::adapters::{
    HttpPenaltyLedger, MemberRepoMemory, MemberRepoSea, RecordingPenaltyLedger, SheetRepoMemory,
    SheetRepoSea,
};
use crate::config::db::{DbOwner, DbProfile};
use crate::config::engine::EngineConfig;
use crate::domain::PlayerId;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::infra::db::bootstrap_db;
use crate::realtime::{PublishingSheetRepo, SheetFeedHub};
use crate::repos::{MemberRepo, PenaltyLedger, SheetRepo};
use crate::services::{PenaltyService, SessionContext, SheetService};

/// Everything a host process needs to run the engine.
#[derive(Clone)]
pub struct EngineState {
    config: EngineConfig,
    db: Option<DatabaseConnection>,
    sheets: Arc<dyn SheetRepo>,
    members: Arc<dyn MemberRepo>,
    ledger: Arc<dyn PenaltyLedger>,
    hub: Arc<SheetFeedHub>,
}

impl EngineState {
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn hub(&self) -> Arc<SheetFeedHub> {
        Arc::clone(&self.hub)
    }

    pub fn members(&self) -> Arc<dyn MemberRepo> {
        Arc::clone(&self.members)
    }

    pub fn sheet_service(&self) -> SheetService {
        SheetService::new(Arc::clone(&self.sheets), Arc::clone(&self.hub), &self.config)
    }

    pub fn penalty_service(&self) -> PenaltyService {
        PenaltyService::new(Arc::clone(&self.ledger))
    }

    /// Roster snapshot for `acting_member`, read from the member collaborator.
    pub async fn session_context(
        &self,
        acting_member: impl Into<PlayerId>,
    ) -> Result<SessionContext, DomainError> {
        SessionContext::load(acting_member, self.members.as_ref()).await
    }
}

/// Builder for EngineState (used in both tests and embedding hosts).
///
/// Collaborators not supplied explicitly come from the database when one is
/// configured, otherwise from in-memory adapters.
#[derive(Default)]
pub struct StateBuilder {
    config: Option<EngineConfig>,
    db_profile: Option<DbProfile>,
    db: Option<DatabaseConnection>,
    sheets: Option<Arc<dyn SheetRepo>>,
    members: Option<Arc<dyn MemberRepo>>,
    ledger: Option<Arc<dyn PenaltyLedger>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Connect (and migrate) using the environment for `profile`.
    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = Some(profile);
        self
    }

    /// Use an already-migrated connection.
    pub fn with_connection(mut self, db: DatabaseConnection) -> Self {
        self.db = Some(db);
        self
    }

    pub fn with_sheet_repo(mut self, repo: Arc<dyn SheetRepo>) -> Self {
        self.sheets = Some(repo);
        self
    }

    pub fn with_member_repo(mut self, repo: Arc<dyn MemberRepo>) -> Self {
        self.members = Some(repo);
        self
    }

    pub fn with_ledger(mut self, ledger: Arc<dyn PenaltyLedger>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    pub async fn build(self) -> Result<EngineState, AppError> {
        let config = match self.config {
            Some(config) => config,
            None => EngineConfig::from_env()?,
        };

        let db = match (self.db, self.db_profile) {
            (Some(conn), _) => Some(conn),
            // single entrypoint: connect + migrate
            (None, Some(profile)) => Some(bootstrap_db(profile, DbOwner::App).await?),
            (None, None) => None,
        };

        let hub = Arc::new(SheetFeedHub::new(config.feed_capacity));

        let store: Arc<dyn SheetRepo> = match (self.sheets, &db) {
            (Some(repo), _) => repo,
            (None, Some(conn)) => Arc::new(SheetRepoSea::new(conn.clone())),
            (None, None) => Arc::new(SheetRepoMemory::new()),
        };
        let sheets: Arc<dyn SheetRepo> = Arc::new(PublishingSheetRepo::new(store, Arc::clone(&hub)));

        let members: Arc<dyn MemberRepo> = match (self.members, &db) {
            (Some(repo), _) => repo,
            (None, Some(conn)) => Arc::new(MemberRepoSea::new(conn.clone())),
            (None, None) => Arc::new(MemberRepoMemory::default()),
        };

        let ledger: Arc<dyn PenaltyLedger> = match (self.ledger, &config.billing_url) {
            (Some(ledger), _) => ledger,
            (None, Some(url)) => Arc::new(HttpPenaltyLedger::new(url.clone(), config.billing_timeout)?),
            (None, None) => {
                warn!("KNIFFEL_BILLING_URL not set; penalties are only recorded in memory");
                Arc::new(RecordingPenaltyLedger::new())
            }
        };

        info!(
            persistent = db.is_some(),
            feed_capacity = config.feed_capacity,
            write_deadline_ms = config.write_deadline.map(|d| d.as_millis() as u64),
            "Engine state ready"
        );

        Ok(EngineState {
            config,
            db,
            sheets,
            members,
            ledger,
            hub,
        })
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
