//! Penalty trigger: bill a rule infraction to the responsible member.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::domain::roster::resolve_one;
use crate::domain::rules::PENALTY_AMOUNT;
use crate::domain::{resolve_billing_target, Player, PlayerId, ScoreSheet};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::penalties::{GuestMetadata, PenaltyLedger, PenaltyReceipt, PenaltyRequest};
use crate::services::context::SessionContext;

#[derive(Clone)]
pub struct PenaltyService {
    ledger: Arc<dyn PenaltyLedger>,
}

impl PenaltyService {
    pub fn new(ledger: Arc<dyn PenaltyLedger>) -> Self {
        Self { ledger }
    }

    /// Build the ledger request for `player`: members pay for themselves,
    /// guests are billed to their host with their name attached.
    pub fn build_request(&self, player: &Player, reason: &str) -> Result<PenaltyRequest, DomainError> {
        let payer_id = resolve_billing_target(player)?;
        let guest = match player {
            Player::Member(_) => None,
            Player::Guest(guest) => Some(GuestMetadata {
                guest_name: guest.display_name.clone(),
                guest_attributed: true,
            }),
        };
        Ok(PenaltyRequest {
            payer_id,
            amount: PENALTY_AMOUNT,
            reason: reason.to_string(),
            guest,
        })
    }

    /// Issue a penalty and wait for the ledger's answer.
    ///
    /// Failure never touches the sheet; callers surface it as a warning.
    pub async fn issue_penalty(
        &self,
        ctx: &SessionContext,
        player: &Player,
        reason: &str,
    ) -> Result<PenaltyReceipt, DomainError> {
        let request = self.build_request(player, reason)?;
        send(self.ledger.as_ref(), &ctx.acting_member, request).await
    }

    /// Resolve a seated player against the roster and the sheet's guests,
    /// then issue the penalty.
    pub async fn issue_for_seat(
        &self,
        ctx: &SessionContext,
        sheet: &ScoreSheet,
        player_id: &PlayerId,
        reason: &str,
    ) -> Result<PenaltyReceipt, DomainError> {
        let player = resolve_one(player_id, &ctx.members, &sheet.guests).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::UnknownPlayer,
                format!("player {player_id} is neither a roster member nor a guest"),
            )
        })?;
        self.issue_penalty(ctx, &player, reason).await
    }

    /// Fire-and-forget: the request runs on its own task so score entry is
    /// never blocked; await the handle to surface the outcome.
    pub fn issue_penalty_detached(
        &self,
        ctx: &SessionContext,
        player: &Player,
        reason: &str,
    ) -> JoinHandle<Result<PenaltyReceipt, DomainError>> {
        let prepared = self.build_request(player, reason);
        let ledger = Arc::clone(&self.ledger);
        let issued_by = ctx.acting_member.clone();

        tokio::spawn(async move {
            let request = prepared?;
            send(ledger.as_ref(), &issued_by, request).await
        })
    }
}

async fn send(
    ledger: &dyn PenaltyLedger,
    issued_by: &PlayerId,
    request: PenaltyRequest,
) -> Result<PenaltyReceipt, DomainError> {
    match ledger.create_penalty(&request).await {
        Ok(receipt) => {
            info!(
                payer_id = %request.payer_id,
                amount = request.amount,
                reason = %request.reason,
                guest = request.guest.is_some(),
                issued_by = %issued_by,
                reference = %receipt.reference,
                "Penalty issued"
            );
            Ok(receipt)
        }
        Err(e) => {
            warn!(
                payer_id = %request.payer_id,
                reason = %request.reason,
                issued_by = %issued_by,
                error = %e,
                "Penalty could not be issued"
            );
            Err(match e {
                DomainError::Billing(_) => e,
                other => DomainError::billing(other.to_string()),
            })
        }
    }
}
