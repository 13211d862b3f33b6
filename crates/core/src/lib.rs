pub mod domain;
pub mod ingest;
pub mod notify;
pub mod pipeline;
pub mod time;

pub mod config {
    use anyhow::Context;
    use std::time::Duration;

    const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
    const DEFAULT_LOG_LEVEL: &str = "debug";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub ipo_source_url: Option<String>,
        pub gmp_data_url: Option<String>,
        pub ntfy_topic: Option<String>,
        pub sentry_dsn: Option<String>,
        pub log_level: Option<String>,
        pub http_timeout_secs: u64,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let http_timeout_secs = std::env::var("NOTIFY_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);

            Ok(Self {
                ipo_source_url: std::env::var("IPO_SOURCE_URL").ok(),
                gmp_data_url: std::env::var("GMP_DATA_URL").ok(),
                ntfy_topic: std::env::var("NTFY_TOPIC").ok(),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
                // Deployments use the lowercase name; LOG_LEVEL is accepted too.
                log_level: std::env::var("log_level")
                    .or_else(|_| std::env::var("LOG_LEVEL"))
                    .ok(),
                http_timeout_secs,
            })
        }

        pub fn require_ipo_source_url(&self) -> anyhow::Result<&str> {
            self.ipo_source_url
                .as_deref()
                .context("IPO_SOURCE_URL is required")
        }

        pub fn require_gmp_data_url(&self) -> anyhow::Result<&str> {
            self.gmp_data_url
                .as_deref()
                .context("GMP_DATA_URL is required")
        }

        pub fn require_ntfy_topic(&self) -> anyhow::Result<&str> {
            self.ntfy_topic.as_deref().context("NTFY_TOPIC is required")
        }

        pub fn log_level(&self) -> &str {
            self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
        }

        pub fn http_timeout(&self) -> Duration {
            Duration::from_secs(self.http_timeout_secs)
        }
    }

}
