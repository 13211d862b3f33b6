use anyhow::Result;
use chrono::NaiveDate;
use closingbell_core::config::Settings;
use closingbell_core::ingest::gmp::HttpGmpSource;
use closingbell_core::ingest::ipo::{FetchError, HttpIpoSource};
use closingbell_core::notify::ntfy::NtfyDispatcher;
use closingbell_core::pipeline::{self, RunSummary};
use serde::Serialize;
use serde_json::json;

// Serverless-style invocation response; the body is a serialized JSON object.
#[derive(Debug, Serialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

// The single catch-all boundary: everything the pipeline raises is
// translated here into the structured failure response. The event payload
// is opaque and unused beyond logging.
pub async fn handle(
    event: serde_json::Value,
    settings: &Settings,
    market_date: NaiveDate,
    dry_run: bool,
) -> InvocationResponse {
    tracing::debug!(%event, %market_date, dry_run, "invocation started");

    match run_once(settings, market_date, dry_run).await {
        Ok(summary) => InvocationResponse {
            status_code: 200,
            body: json!({
                "message": "Sent IPO list to ntfy",
                "count": summary.closing_count,
            })
            .to_string(),
        },
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            if let Some(fetch) = err.downcast_ref::<FetchError>() {
                tracing::error!(attempts = fetch.attempts, error = %err, "notifier run failed");
            } else {
                tracing::error!(error = %err, "notifier run failed");
            }

            InvocationResponse {
                status_code: 500,
                body: json!({"error": format!("{err:#}")}).to_string(),
            }
        }
    }
}

async fn run_once(
    settings: &Settings,
    market_date: NaiveDate,
    dry_run: bool,
) -> Result<RunSummary> {
    // Client construction front-loads the required-variable checks, so a
    // missing URL or topic fails before any fetch.
    let ipo = HttpIpoSource::from_settings(settings)?;
    let gmp = HttpGmpSource::from_settings(settings)?;
    let dispatcher = NtfyDispatcher::from_settings(settings)?;

    pipeline::run(&ipo, &gmp, &dispatcher, market_date, dry_run).await
}
