// Refresh sequencing - Last call wins when dashboard refreshes overlap
use crate::domain::dashboard::Dashboard;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
pub struct Published {
    pub ticket: u64,
    pub dashboard: Arc<Dashboard>,
}

/// Hands out increasing tickets and only publishes a result whose ticket is
/// newer than the one currently shown.
#[derive(Debug, Default)]
pub struct RefreshSequencer {
    issued: AtomicU64,
    latest: RwLock<Option<Published>>,
}

impl RefreshSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Returns false when a newer result is already published.
    pub async fn publish(&self, ticket: u64, dashboard: Arc<Dashboard>) -> bool {
        let mut latest = self.latest.write().await;
        if let Some(current) = latest.as_ref() {
            if current.ticket >= ticket {
                tracing::debug!(
                    "Dropping superseded refresh {} (showing {})",
                    ticket,
                    current.ticket
                );
                return false;
            }
        }
        *latest = Some(Published { ticket, dashboard });
        true
    }

    pub async fn latest(&self) -> Option<Published> {
        self.latest.read().await.clone()
    }
}
