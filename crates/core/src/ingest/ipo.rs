use crate::config::Settings;
use crate::ingest::types::{IpoListEnvelope, IpoRecord};
use anyhow::{Context, Result};
use reqwest::StatusCode;
use std::fmt;
use std::time::Duration;

pub const MAX_ATTEMPTS: u32 = 3;

// Fixed delay between attempts; the retry budget is small enough that
// backoff growth buys nothing against this source.
const RETRY_DELAY: Duration = Duration::from_secs(1);

// Terminal fetch failure after the retry budget is spent; carried inside
// anyhow::Error and recovered by downcast_ref at the run boundary.
#[derive(Debug, Clone)]
pub struct FetchError {
    pub attempts: u32,
    pub detail: String,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed fetching IPO list after {} attempts: {}",
            self.attempts, self.detail
        )
    }
}

impl std::error::Error for FetchError {}

#[async_trait::async_trait]
pub trait IpoSource: Send + Sync {
    async fn fetch_once(&self) -> Result<Vec<IpoRecord>>;
}

#[derive(Debug, Clone)]
pub struct HttpIpoSource {
    http: reqwest::Client,
    url: String,
}

impl HttpIpoSource {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let url = settings.require_ipo_source_url()?.to_string();
        let http = reqwest::Client::builder()
            .timeout(settings.http_timeout())
            .build()
            .context("failed to build IPO source http client")?;

        Ok(Self { http, url })
    }
}

#[async_trait::async_trait]
impl IpoSource for HttpIpoSource {
    async fn fetch_once(&self) -> Result<Vec<IpoRecord>> {
        let res = self
            .http
            .get(&self.url)
            .send()
            .await
            .context("IPO source request failed")?;

        let status = res.status();
        if status != StatusCode::OK {
            anyhow::bail!("IPO source HTTP {status}");
        }

        let text = res
            .text()
            .await
            .context("failed to read IPO source response")?;
        let envelope = serde_json::from_str::<IpoListEnvelope>(&text)
            .context("IPO source response is not the expected JSON envelope")?;

        Ok(envelope.data.items)
    }
}

pub async fn fetch_ipo_list(source: &dyn IpoSource) -> Result<Vec<IpoRecord>> {
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        match source.fetch_once().await {
            Ok(items) => {
                tracing::info!(count = items.len(), "fetched IPO list");
                return Ok(items);
            }
            Err(err) => {
                if attempt >= MAX_ATTEMPTS {
                    return Err(FetchError {
                        attempts: attempt,
                        detail: format!("{err:#}"),
                    }
                    .into());
                }
                tracing::warn!(
                    attempt,
                    delay_secs = RETRY_DELAY.as_secs(),
                    error = %err,
                    "IPO fetch attempt failed; retrying"
                );
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }
    }
}
