use crate::domain::briefing::{classify, priority_for, Priority};
use crate::ingest::gmp::GmpSource;
use crate::ingest::ipo::{fetch_ipo_list, IpoSource};
use crate::notify::ntfy::{compose_body, Notification, NtfyDispatcher};
use crate::time::market_date::format_market_date;
use anyhow::Result;
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub title: String,
    pub closing_count: usize,
    pub priority: Priority,
}

// One full notifier run. The IPO fetch and the publish are the only fatal
// steps; the GMP block degrades to a sentinel line instead.
pub async fn run(
    ipo: &dyn IpoSource,
    gmp: &dyn GmpSource,
    dispatcher: &NtfyDispatcher,
    market_date: NaiveDate,
    dry_run: bool,
) -> Result<RunSummary> {
    let records = fetch_ipo_list(ipo).await?;

    let today = format_market_date(market_date);
    tracing::debug!(%today, "resolved market date key");

    let classification = classify(&records, &today);
    let priority = priority_for(&classification.title, &classification.details);
    tracing::info!(
        title = %classification.title,
        closing = classification.closing_today.len(),
        level = priority.level(),
        "classified IPO list"
    );

    let gmp_block = gmp.fetch_block().await;

    let notification = Notification {
        title: classification.title.clone(),
        body: compose_body(&classification.details, &gmp_block),
        priority,
    };

    if dry_run {
        tracing::info!(dry_run = true, "skipping ntfy publish");
    } else {
        dispatcher.dispatch(&notification).await?;
    }

    Ok(RunSummary {
        title: classification.title,
        closing_count: classification.closing_today.len(),
        priority,
    })
}
