//! Recording ledger: keeps every request in memory and can be told to fail.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::errors::domain::DomainError;
use crate::repos::penalties::{PenaltyLedger, PenaltyReceipt, PenaltyRequest};

#[derive(Debug, Default)]
pub struct RecordingPenaltyLedger {
    requests: Mutex<Vec<PenaltyRequest>>,
    failure: Mutex<Option<String>>,
    next_ref: AtomicU64,
}

impl RecordingPenaltyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every subsequent request with `reason`; `None` accepts again.
    pub fn fail_with(&self, reason: Option<&str>) {
        *self.failure.lock() = reason.map(str::to_string);
    }

    /// Accepted requests, in arrival order.
    pub fn requests(&self) -> Vec<PenaltyRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl PenaltyLedger for RecordingPenaltyLedger {
    async fn create_penalty(&self, request: &PenaltyRequest) -> Result<PenaltyReceipt, DomainError> {
        let failure = self.failure.lock().clone();
        if let Some(reason) = failure {
            return Err(DomainError::billing(reason));
        }
        self.requests.lock().push(request.clone());
        let n = self.next_ref.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(PenaltyReceipt {
            reference: format!("pen-{n}"),
            payer_id: request.payer_id.clone(),
            amount: request.amount,
        })
    }
}
