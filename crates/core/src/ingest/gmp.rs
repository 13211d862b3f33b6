use crate::config::Settings;
use crate::ingest::types::{GmpReport, GmpRow};
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::StatusCode;

// GMP data is supplementary, so every failure stage degrades to a sentinel
// line in the notification body instead of failing the run.
const GMP_REQUEST_FAILED: &str = "GMP data unavailable: request failed";
const GMP_BAD_STATUS: &str = "GMP data unavailable: source returned an error";
const GMP_BAD_BODY: &str = "GMP data unavailable: unexpected response format";
const GMP_EMPTY_TABLE: &str = "No GMP data published yet";
const GMP_NO_USABLE_ROWS: &str = "No GMP entries with usable data";

#[async_trait::async_trait]
pub trait GmpSource: Send + Sync {
    // Always a renderable text block, never an error.
    async fn fetch_block(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct HttpGmpSource {
    http: reqwest::Client,
    url: String,
}

impl HttpGmpSource {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let url = settings.require_gmp_data_url()?.to_string();
        let http = reqwest::Client::builder()
            .timeout(settings.http_timeout())
            .build()
            .context("failed to build GMP http client")?;

        Ok(Self { http, url })
    }
}

#[async_trait::async_trait]
impl GmpSource for HttpGmpSource {
    async fn fetch_block(&self) -> String {
        // Single attempt, no retry.
        let res = match self
            .http
            .get(&self.url)
            .headers(browser_headers())
            .send()
            .await
        {
            Ok(res) => res,
            Err(err) => {
                tracing::warn!(error = %err, "GMP request failed");
                return GMP_REQUEST_FAILED.to_string();
            }
        };

        let status = res.status();
        if status != StatusCode::OK {
            tracing::warn!(http_status = %status, "GMP source returned non-200");
            return GMP_BAD_STATUS.to_string();
        }

        match res.text().await {
            Ok(text) => render_gmp_body(&text),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read GMP response body");
                return GMP_REQUEST_FAILED.to_string();
            }
        }
    }
}

// The source rejects obvious non-browser clients, so impersonate one.
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
        ),
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(
        REFERER,
        HeaderValue::from_static("https://www.investorgain.com/"),
    );
    headers
}

fn render_gmp_body(text: &str) -> String {
    let report = match serde_json::from_str::<GmpReport>(text) {
        Ok(report) => report,
        Err(err) => {
            tracing::warn!(error = %err, "GMP response body is not the expected JSON table");
            return GMP_BAD_BODY.to_string();
        }
    };

    if report.report_table_data.is_empty() {
        return GMP_EMPTY_TABLE.to_string();
    }

    let lines: Vec<String> = report.report_table_data.iter().filter_map(render_row).collect();
    if lines.is_empty() {
        GMP_NO_USABLE_ROWS.to_string()
    } else {
        lines.join("\n")
    }
}

fn render_row(row: &GmpRow) -> Option<String> {
    let name = row.ipo_name.trim();
    let percent = row.gmp_percent.trim();
    if name.is_empty() || percent.is_empty() {
        return None;
    }

    // The closing date sometimes embeds markup after the date text.
    let close = row.close.split('<').next().unwrap_or("").trim();
    Some(format!("- {name} (Closing on {close}) - GMP: {percent}%"))
}
