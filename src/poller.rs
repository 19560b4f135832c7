use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use tokio::{sync::RwLock, sync::broadcast, task::JoinHandle, time::Instant};

use crate::{
    client::StorefrontClient,
    error::{AppError, AppResult},
    models::{Order, Statistics},
    state::AppState,
};

/// How many orders the dashboard shows alongside the statistics.
pub const RECENT_ORDERS: usize = 5;

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub statistics: Statistics,
    pub recent_orders: Vec<Order>,
    pub refreshed_at: DateTime<Utc>,
}

#[derive(Default)]
struct CacheInner {
    snapshot: Option<Snapshot>,
    // Backend token of the last session that viewed the dashboard; the
    // poller refreshes with it until it is rejected or logged out.
    poll_token: Option<String>,
    last_view: Option<Instant>,
    failures: u32,
}

/// Shared statistics snapshot kept warm by the background poller.
#[derive(Clone, Default)]
pub struct StatsCache {
    inner: Arc<RwLock<CacheInner>>,
}

impl StatsCache {
    /// Record a dashboard view: refresh the view instant and adopt the
    /// viewer's backend token as the poll credential.
    pub async fn touch(&self, backend_token: &str) {
        let mut inner = self.inner.write().await;
        inner.last_view = Some(Instant::now());
        inner.poll_token = Some(backend_token.to_string());
    }

    pub async fn snapshot(&self) -> Option<Snapshot> {
        self.inner.read().await.snapshot.clone()
    }

    pub async fn store(&self, snapshot: Snapshot) {
        let mut inner = self.inner.write().await;
        inner.snapshot = Some(snapshot);
        inner.failures = 0;
    }

    pub async fn record_failure(&self) -> u32 {
        let mut inner = self.inner.write().await;
        inner.failures += 1;
        inner.failures
    }

    pub async fn failures(&self) -> u32 {
        self.inner.read().await.failures
    }

    pub async fn credential(&self) -> Option<String> {
        self.inner.read().await.poll_token.clone()
    }

    pub async fn drop_credential(&self) {
        self.inner.write().await.poll_token = None;
    }

    /// Release the poll credential if it belongs to the session logging out.
    pub async fn drop_credential_if(&self, backend_token: &str) {
        let mut inner = self.inner.write().await;
        if inner.poll_token.as_deref() == Some(backend_token) {
            inner.poll_token = None;
        }
    }

    pub async fn viewed_within(&self, window: Duration) -> bool {
        self.inner
            .read()
            .await
            .last_view
            .is_some_and(|at| at.elapsed() <= window)
    }
}

/// Delay before the next refresh: the fixed interval, doubled per
/// consecutive failure, capped at `max`.
pub fn backoff_delay(interval: Duration, failures: u32, max: Duration) -> Duration {
    let factor = 2u32.saturating_pow(failures.min(16));
    interval.saturating_mul(factor).min(max)
}

/// Fetch statistics and the order list concurrently, the way the dashboard
/// page loads on mount.
pub async fn refresh_snapshot(client: &StorefrontClient, token: &str) -> AppResult<Snapshot> {
    let (statistics, orders) = tokio::join!(
        client.get_statistics(token),
        client.list_orders(token, None)
    );
    let statistics = statistics?;
    let mut recent_orders = orders?;
    recent_orders.truncate(RECENT_ORDERS);
    Ok(Snapshot {
        statistics,
        recent_orders,
        refreshed_at: Utc::now(),
    })
}

/// Background refresh task. Ticks on the configured interval, pauses while
/// nobody is viewing the dashboard, backs off on repeated failure and stops
/// on the shutdown broadcast.
pub fn spawn(state: AppState, mut shutdown: broadcast::Receiver<()>) -> JoinHandle<()> {
    let interval = Duration::from_secs(state.config.poll_interval_secs);
    let pause_after = Duration::from_secs(state.config.poll_pause_after_secs);
    let max_backoff = Duration::from_secs(state.config.poll_max_backoff_secs);

    tokio::spawn(async move {
        loop {
            let delay = backoff_delay(interval, state.stats.failures().await, max_backoff);
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = shutdown.recv() => {
                    tracing::debug!("statistics poller stopping");
                    return;
                }
            }

            if !state.stats.viewed_within(pause_after).await {
                continue;
            }
            let Some(token) = state.stats.credential().await else {
                continue;
            };

            match refresh_snapshot(&state.client, &token).await {
                Ok(snapshot) => state.stats.store(snapshot).await,
                Err(AppError::Unauthorized(_)) => {
                    tracing::warn!("poll credential rejected, pausing until next login");
                    state.stats.drop_credential().await;
                }
                Err(err) => {
                    let failures = state.stats.record_failure().await;
                    tracing::warn!(error = %err, failures, "statistics refresh failed");
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_per_failure_and_caps() {
        let interval = Duration::from_secs(30);
        let max = Duration::from_secs(480);

        assert_eq!(backoff_delay(interval, 0, max), Duration::from_secs(30));
        assert_eq!(backoff_delay(interval, 1, max), Duration::from_secs(60));
        assert_eq!(backoff_delay(interval, 2, max), Duration::from_secs(120));
        assert_eq!(backoff_delay(interval, 3, max), Duration::from_secs(240));
        assert_eq!(backoff_delay(interval, 4, max), Duration::from_secs(480));
        // stays at the cap, no overflow for large counts
        assert_eq!(backoff_delay(interval, 60, max), Duration::from_secs(480));
    }

    #[tokio::test]
    async fn success_resets_the_failure_counter() {
        let cache = StatsCache::default();
        cache.record_failure().await;
        cache.record_failure().await;
        assert_eq!(cache.failures().await, 2);

        cache
            .store(Snapshot {
                statistics: Statistics::default(),
                recent_orders: vec![],
                refreshed_at: Utc::now(),
            })
            .await;
        assert_eq!(cache.failures().await, 0);
        assert!(cache.snapshot().await.is_some());
    }

    #[tokio::test]
    async fn view_tracking_gates_the_poll() {
        let cache = StatsCache::default();
        assert!(!cache.viewed_within(Duration::from_secs(90)).await);

        cache.touch("backend-token").await;
        assert!(cache.viewed_within(Duration::from_secs(90)).await);
        assert_eq!(cache.credential().await.as_deref(), Some("backend-token"));

        cache.drop_credential_if("other-token").await;
        assert!(cache.credential().await.is_some());
        cache.drop_credential_if("backend-token").await;
        assert!(cache.credential().await.is_none());
    }
}
