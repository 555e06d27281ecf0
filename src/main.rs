//! MonSON — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.

use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use monson::aggregator::Aggregator;
use monson::api::{self, AppState};
use monson::config::AppConfig;
use monson::ingest::adapters::{NewsApiAdapter, OfficialMockAdapter, RssAdapter, TwitterAdapter};
use monson::ingest::types::SourceAdapter;
use monson::ingest::{self, PassConfig};
use monson::metrics::Metrics;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("monson=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = AppConfig::from_env();
    let feeds = ingest::config::load_feeds_default().unwrap_or_else(|e| {
        tracing::warn!("feed config: {e:#}");
        Vec::new()
    });

    // Registration order doubles as the tie-break order for events with
    // equal timestamps.
    let adapters: Vec<Box<dyn SourceAdapter>> = vec![
        Box::new(OfficialMockAdapter),
        Box::new(TwitterAdapter::new(cfg.twitter_bearer_token.clone())),
        Box::new(NewsApiAdapter::new(cfg.news_api_key.clone())),
        Box::new(RssAdapter::new(feeds)),
    ];

    let aggregator = Arc::new(Aggregator::new(
        adapters,
        cfg.cache_ttl,
        PassConfig {
            headline_max_chars: cfg.headline_max_chars,
            max_events: cfg.max_events,
        },
    ));

    let metrics = Metrics::init(aggregator.cache_ttl_secs());
    let router = api::create_router(AppState { aggregator }).merge(metrics.router());

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], cfg.port));
    tracing::info!(%addr, "Servidor MonSON escuchando");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
