use crate::{
    client::StorefrontClient, config::AppConfig, guard::MutationGuard, poller::StatsCache,
    session::SessionStore,
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub client: StorefrontClient,
    pub sessions: SessionStore,
    pub guard: MutationGuard,
    pub stats: StatsCache,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let client = StorefrontClient::new(&config.backend_url);
        let sessions = SessionStore::new(config.session_ttl_secs, config.session_revalidate_secs);
        Self {
            client,
            sessions,
            guard: MutationGuard::default(),
            stats: StatsCache::default(),
            config,
        }
    }
}
