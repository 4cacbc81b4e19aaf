use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::{ScoreSheet, SheetId};
use crate::realtime::subscription::SheetSubscription;

/// One broadcast channel per open sheet, carrying full-document snapshots.
#[derive(Debug)]
pub struct SheetFeedHub {
    feeds: DashMap<SheetId, broadcast::Sender<Arc<ScoreSheet>>>,
    capacity: usize,
}

impl SheetFeedHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            feeds: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn subscribe(&self, sheet_id: &SheetId) -> SheetSubscription {
        let rx = self
            .feeds
            .entry(sheet_id.clone())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe();
        SheetSubscription::new(sheet_id.clone(), rx)
    }

    /// Fan a committed snapshot out to every subscriber of its sheet.
    /// Returns the number of subscribers reached.
    pub fn publish(&self, snapshot: ScoreSheet) -> usize {
        let sheet_id = snapshot.id.clone();
        let delivered = match self.feeds.get(&sheet_id) {
            Some(tx) => tx.send(Arc::new(snapshot)).unwrap_or(0),
            None => 0,
        };

        if delivered == 0 {
            // Last subscriber went away; drop the channel until someone reopens.
            self.feeds
                .remove_if(&sheet_id, |_, tx| tx.receiver_count() == 0);
        }
        debug!(sheet_id = %sheet_id, delivered, "Published sheet snapshot");
        delivered
    }

    /// End every subscription to `sheet_id`.
    pub fn close(&self, sheet_id: &SheetId) {
        if self.feeds.remove(sheet_id).is_some() {
            debug!(sheet_id = %sheet_id, "Closed sheet feed");
        }
    }

    pub fn subscriber_count(&self, sheet_id: &SheetId) -> usize {
        self.feeds
            .get(sheet_id)
            .map(|tx| tx.receiver_count())
            .unwrap_or(0)
    }
}

impl Default for SheetFeedHub {
    fn default() -> Self {
        Self::new(crate::config::engine::DEFAULT_FEED_CAPACITY)
    }
}
