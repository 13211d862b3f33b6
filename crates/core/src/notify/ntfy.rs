use crate::config::Settings;
use crate::domain::briefing::Priority;
use anyhow::{Context, Result};
use std::time::Duration;

pub const NTFY_BASE_URL: &str = "https://ntfy.sh";

const EMPTY_DETAILS_FALLBACK: &str = "No mainline IPOs today";
const GMP_SECTION_HEADER: &str = "GMP data:";
const DASHBOARD_ACTION: &str =
    "view, Open IPO dashboard, https://www.investorgain.com/report/live-ipo-gmp/331/";

#[derive(Debug, Clone)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub priority: Priority,
}

pub fn compose_body(details: &str, gmp_block: &str) -> String {
    let details = if details.is_empty() {
        EMPTY_DETAILS_FALLBACK
    } else {
        details
    };
    format!("{details}\n\n{GMP_SECTION_HEADER}\n{gmp_block}")
}

#[derive(Debug, Clone)]
pub struct NtfyDispatcher {
    http: reqwest::Client,
    topic_url: String,
}

impl NtfyDispatcher {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(settings.require_ntfy_topic()?, settings.http_timeout())
    }

    pub fn new(topic: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build ntfy http client")?;

        Ok(Self {
            http,
            topic_url: format!("{NTFY_BASE_URL}/{topic}"),
        })
    }

    // Only a transport failure is an error; whatever status ntfy answers
    // with, the publish counts as done and the response body is discarded.
    pub async fn dispatch(&self, notification: &Notification) -> Result<()> {
        let mut req = self.http.post(&self.topic_url);
        for (name, value) in notification_headers(notification) {
            req = req.header(name, value);
        }

        let res = req
            .body(notification.body.clone())
            .send()
            .await
            .context("ntfy publish request failed")?;

        tracing::info!(
            http_status = %res.status(),
            title = %notification.title,
            "published notification"
        );
        Ok(())
    }
}

fn notification_headers(notification: &Notification) -> Vec<(&'static str, String)> {
    vec![
        ("Content-Type", "text/plain".to_string()),
        ("Title", notification.title.clone()),
        ("Tags", notification.priority.tag().to_string()),
        ("Priority", notification.priority.level().to_string()),
        ("Markdown", "yes".to_string()),
        ("Actions", DASHBOARD_ACTION.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_merges_details_and_gmp_sections() {
        let body = compose_body(
            "Acme Ltd - 3 Mar 2025-5 Mar 2025\n",
            "- Acme Ltd (Closing on 5 Mar 2025) - GMP: 12.5%",
        );
        assert_eq!(
            body,
            "Acme Ltd - 3 Mar 2025-5 Mar 2025\n\n\nGMP data:\n\
             - Acme Ltd (Closing on 5 Mar 2025) - GMP: 12.5%"
        );
    }

    #[test]
    fn empty_details_use_fallback_line() {
        let body = compose_body("", "No GMP data published yet");
        assert_eq!(
            body,
            "No mainline IPOs today\n\nGMP data:\nNo GMP data published yet"
        );
    }

    #[test]
    fn headers_encode_priority_and_metadata() {
        let notification = Notification {
            title: "Acme Ltd close today".to_string(),
            body: String::new(),
            priority: Priority::High,
        };

        let headers = notification_headers(&notification);
        let get = |name: &str| {
            headers
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v.as_str())
                .unwrap()
        };

        assert_eq!(get("Content-Type"), "text/plain");
        assert_eq!(get("Title"), "Acme Ltd close today");
        assert_eq!(get("Tags"), "rotating_light");
        assert_eq!(get("Priority"), "5");
        assert_eq!(get("Markdown"), "yes");
        assert!(get("Actions").starts_with("view, "));
    }

    #[test]
    fn topic_is_appended_to_base_url() {
        let dispatcher = NtfyDispatcher::new("myipoalerts", Duration::from_secs(10)).unwrap();
        assert_eq!(dispatcher.topic_url, "https://ntfy.sh/myipoalerts");
    }
}
