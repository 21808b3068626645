use chrono::NaiveDate;
use std::env;
use std::time::Duration;

use crate::error::EngineError;
use crate::services::signals::ScoringConfig;

/// Exchange session configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketHoursConfig {
    /// Whether closed sessions block analysis.
    pub enabled: bool,
    /// Exchange time zone as minutes east of UTC (IST = 330).
    pub utc_offset_minutes: i32,
    pub open_hour: u32,
    pub open_minute: u32,
    pub close_hour: u32,
    pub close_minute: u32,
    /// Full-day closures in exchange-local dates.
    pub holidays: Vec<NaiveDate>,
}

impl Default for MarketHoursConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            utc_offset_minutes: 330,
            open_hour: 9,
            open_minute: 15,
            close_hour: 15,
            close_minute: 30,
            holidays: Vec::new(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Candle endpoint. Without it the HTTP source is always unavailable.
    pub data_url: Option<String>,
    /// Trade log CSV path.
    pub log_file: String,
    /// Serve synthetic candles when the HTTP source fails.
    pub mock_fallback: bool,
    /// Base price for synthetic candles.
    pub mock_base_price: f64,
    /// Scoring preset name (canonical, classic, bias).
    pub scoring_preset: String,
    /// Target distance as a multiple of entry-to-stop distance.
    pub risk_reward: f64,
    /// Candle fetch timeout (seconds).
    pub fetch_timeout_secs: u64,
    pub market_hours: MarketHoursConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str, default: bool| {
            lookup(key)
                .map(|v| v == "true" || v == "1")
                .unwrap_or(default)
        };

        // Format: "2026-01-26,2026-03-03"
        let holidays = lookup("MARKET_HOLIDAYS")
            .map(|s| {
                s.split(',')
                    .filter_map(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            data_url: lookup("DATA_URL").filter(|u| !u.trim().is_empty()),
            log_file: lookup("LOG_FILE").unwrap_or_else(|| "trade_log.csv".to_string()),
            mock_fallback: flag("MOCK_FALLBACK", false),
            mock_base_price: lookup("MOCK_BASE_PRICE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(22_000.0),
            scoring_preset: lookup("SCORING_PRESET").unwrap_or_else(|| "canonical".to_string()),
            risk_reward: lookup("RISK_REWARD")
                .and_then(|v| v.parse().ok())
                .unwrap_or(1.5),
            fetch_timeout_secs: lookup("FETCH_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            market_hours: MarketHoursConfig {
                enabled: flag("MARKET_HOURS_ENABLED", true),
                holidays,
                ..MarketHoursConfig::default()
            },
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Resolve the configured preset and apply overrides.
    pub fn scoring_config(&self) -> Result<ScoringConfig, EngineError> {
        scoring_config_for(&self.scoring_preset, self.risk_reward)
    }
}

/// Resolve preset `name` with `risk_reward` applied, validated.
pub fn scoring_config_for(name: &str, risk_reward: f64) -> Result<ScoringConfig, EngineError> {
    let config = ScoringConfig::preset(name)
        .ok_or_else(|| EngineError::Configuration(format!("unknown scoring preset: {}", name)))?
        .with_risk_reward(risk_reward);
    config.validate()?;
    Ok(config)
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
