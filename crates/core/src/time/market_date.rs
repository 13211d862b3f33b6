use anyhow::Context;
use chrono::{DateTime, Datelike, NaiveDate, Utc};

const IST_OFFSET_SECS: i32 = 5 * 3600 + 1800;

// Short-month table matching the issue-date strings published by the IPO feed.
const SHORT_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// Renders a date as "5 Mar 2025" with day and year unpadded. This string is
// the classification key matched against issue_end_date fields.
pub fn format_market_date(date: NaiveDate) -> String {
    let month = SHORT_MONTHS[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

// The feed covers Indian listings, so without an override "today" is the
// current IST calendar date.
pub fn resolve_market_date(
    date_arg: Option<&str>,
    now_utc: DateTime<Utc>,
) -> anyhow::Result<NaiveDate> {
    if let Some(s) = date_arg {
        return Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?);
    }

    let ist = chrono::FixedOffset::east_opt(IST_OFFSET_SECS).context("invalid IST offset")?;
    Ok(now_utc.with_timezone(&ist).date_naive())
}
