use std::sync::Arc;

use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::broadcast::Receiver;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};
use tracing::warn;

use crate::domain::{ScoreSheet, SheetId};

/// Lazy sequence of committed snapshots of one sheet.
///
/// Snapshots are whole documents, so a subscriber that falls behind only
/// needs the newest one: lagged frames are skipped with a warning. The
/// sequence ends once the sheet's feed is closed.
#[derive(Debug)]
pub struct SheetSubscription {
    sheet_id: SheetId,
    rx: Receiver<Arc<ScoreSheet>>,
}

impl SheetSubscription {
    pub(crate) fn new(sheet_id: SheetId, rx: Receiver<Arc<ScoreSheet>>) -> Self {
        Self { sheet_id, rx }
    }

    pub fn sheet_id(&self) -> &SheetId {
        &self.sheet_id
    }

    pub async fn next(&mut self) -> Option<ScoreSheet> {
        loop {
            match self.rx.recv().await {
                Ok(snapshot) => return Some(Arc::unwrap_or_clone(snapshot)),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(sheet_id = %self.sheet_id, skipped, "Sheet subscriber lagged; skipping stale snapshots");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next snapshot if one is already buffered.
    pub fn try_next(&mut self) -> Option<ScoreSheet> {
        loop {
            match self.rx.try_recv() {
                Ok(snapshot) => return Some(Arc::unwrap_or_clone(snapshot)),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(sheet_id = %self.sheet_id, skipped, "Sheet subscriber lagged; skipping stale snapshots");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }

    pub fn into_stream(self) -> impl Stream<Item = ScoreSheet> {
        let sheet_id = self.sheet_id;
        BroadcastStream::new(self.rx).filter_map(move |item| match item {
            Ok(snapshot) => Some(Arc::unwrap_or_clone(snapshot)),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                warn!(sheet_id = %sheet_id, skipped, "Sheet subscriber lagged; skipping stale snapshots");
                None
            }
        })
    }
}
