use anyhow::Context;
use quant_engine::config::Config;
use quant_engine::services::{AlwaysOpen, CsvTradeLog, ExchangeHours, MarketHoursGate};
use quant_engine::sources::{
    CandleSource, FallbackCandleSource, HttpCandleSource, SyntheticCandleSource,
};
use quant_engine::{app, AppState};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quant_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());
    info!("Starting Quant Engine on {}:{}", config.host, config.port);

    let scoring = config
        .scoring_config()
        .context("invalid scoring configuration")?;
    info!(
        "Scoring preset '{}' (window {}, risk/reward {})",
        scoring.name, scoring.window, scoring.risk_reward
    );

    // Candle source
    if config.data_url.is_none() {
        warn!("DATA_URL not set, the HTTP candle source will report data unavailable");
    }
    let http = HttpCandleSource::new(config.data_url.clone(), config.fetch_timeout())
        .context("failed to build HTTP client")?;
    let source: Arc<dyn CandleSource> = if config.mock_fallback {
        info!(
            "Synthetic fallback enabled around base price {}",
            config.mock_base_price
        );
        Arc::new(FallbackCandleSource::new(
            Box::new(http),
            Box::new(SyntheticCandleSource::new(
                config.mock_base_price,
                scoring.window.max(30),
            )),
        ))
    } else {
        Arc::new(http)
    };

    // Market hours gate
    let gate: Arc<dyn MarketHoursGate> = if config.market_hours.enabled {
        let hours = ExchangeHours::from_config(&config.market_hours)
            .context("invalid market hours configuration")?;
        Arc::new(hours)
    } else {
        info!("Market hours gate disabled");
        Arc::new(AlwaysOpen)
    };

    // Trade log
    let trade_log = CsvTradeLog::open(&config.log_file)
        .with_context(|| format!("failed to open trade log {}", config.log_file))?;
    info!("Logging actionable signals to {}", trade_log.path().display());

    let state = AppState {
        config: config.clone(),
        scoring: Arc::new(scoring),
        source,
        gate,
        trade_log: Arc::new(trade_log),
    };

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Quant Engine listening on {}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
