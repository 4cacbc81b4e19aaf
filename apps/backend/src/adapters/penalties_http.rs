//! HTTP client for the external billing service.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::repos::penalties::{PenaltyLedger, PenaltyReceipt, PenaltyRequest};

/// Posts penalty requests as JSON to `{base_url}/penalties`.
#[derive(Debug, Clone)]
pub struct HttpPenaltyLedger {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpPenaltyLedger {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::config(format!("billing client could not be built: {e}")))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/penalties", self.base_url)
    }
}

#[async_trait]
impl PenaltyLedger for HttpPenaltyLedger {
    async fn create_penalty(&self, request: &PenaltyRequest) -> Result<PenaltyReceipt, DomainError> {
        let url = self.endpoint();
        debug!(%url, payer_id = %request.payer_id, "Posting penalty");

        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!(%url, error = %e, "Billing request failed");
                DomainError::billing(format!("billing service unreachable or rejected the request: {e}"))
            })?;

        response.json::<PenaltyReceipt>().await.map_err(|e| {
            warn!(%url, error = %e, "Billing response could not be decoded");
            DomainError::billing(format!("billing service returned an unreadable receipt: {e}"))
        })
    }
}
