//! Billing collaborator seam: the single "issue a penalty" call.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::PlayerId;
use crate::errors::domain::DomainError;

/// Extra context attached when the infraction was committed by a guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestMetadata {
    pub guest_name: String,
    pub guest_attributed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyRequest {
    /// Member who pays: the player themselves, or a guest's host.
    pub payer_id: PlayerId,
    pub amount: u32,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest: Option<GuestMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyReceipt {
    /// Ledger-assigned reference for the created penalty record.
    pub reference: String,
    pub payer_id: PlayerId,
    pub amount: u32,
}

#[async_trait]
pub trait PenaltyLedger: Send + Sync {
    async fn create_penalty(&self, request: &PenaltyRequest) -> Result<PenaltyReceipt, DomainError>;
}
