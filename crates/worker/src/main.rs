use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod handler;

#[derive(Debug, Parser)]
#[command(name = "closingbell_worker")]
struct Args {
    /// Market date override (YYYY-MM-DD). Defaults to today's IST date.
    #[arg(long)]
    date: Option<String>,

    /// Do everything except publishing to ntfy.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = closingbell_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::new(settings.log_level()))
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let market_date = closingbell_core::time::market_date::resolve_market_date(
        args.date.as_deref(),
        chrono::Utc::now(),
    )?;

    let response =
        handler::handle(serde_json::json!({}), &settings, market_date, args.dry_run).await;

    println!(
        "{}",
        serde_json::to_string(&response).context("serialize invocation response failed")?
    );

    if response.status_code != 200 {
        std::process::exit(1);
    }
    Ok(())
}

fn init_sentry(settings: &closingbell_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
