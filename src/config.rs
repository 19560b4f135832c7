use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_url: String,
    pub host: String,
    pub port: u16,
    pub allowed_origin: Option<String>,
    pub poll_interval_secs: u64,
    pub poll_pause_after_secs: u64,
    pub poll_max_backoff_secs: u64,
    pub session_ttl_secs: i64,
    pub session_revalidate_secs: i64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let backend_url = env::var("BACKEND_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let allowed_origin = env::var("ALLOWED_ORIGIN").ok().filter(|o| !o.is_empty());
        Ok(Self {
            backend_url,
            host,
            port,
            allowed_origin,
            poll_interval_secs: env_u64("STATS_POLL_INTERVAL_SECS", 30),
            poll_pause_after_secs: env_u64("STATS_POLL_PAUSE_AFTER_SECS", 90),
            poll_max_backoff_secs: env_u64("STATS_POLL_MAX_BACKOFF_SECS", 480),
            session_ttl_secs: env_u64("SESSION_TTL_SECS", 86_400) as i64,
            session_revalidate_secs: env_u64("SESSION_REVALIDATE_SECS", 300) as i64,
        })
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}
