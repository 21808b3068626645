//! Exchange session gate.
//!
//! The current time is always passed in, so checks are deterministic across
//! time zones and holidays.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, Utc, Weekday};

use crate::config::MarketHoursConfig;
use crate::types::MarketStatus;

/// Decides whether the engine should run at `now_utc`.
pub trait MarketHoursGate: Send + Sync {
    fn status(&self, now_utc: DateTime<Utc>) -> MarketStatus;
}

/// Gate that never closes.
pub struct AlwaysOpen;

impl MarketHoursGate for AlwaysOpen {
    fn status(&self, _now_utc: DateTime<Utc>) -> MarketStatus {
        MarketStatus::open("Market hours check disabled")
    }
}

/// Weekday session in a fixed exchange time zone, with a holiday calendar.
pub struct ExchangeHours {
    offset: FixedOffset,
    open: NaiveTime,
    close: NaiveTime,
    holidays: Vec<NaiveDate>,
}

impl ExchangeHours {
    pub fn new(
        offset: FixedOffset,
        open: NaiveTime,
        close: NaiveTime,
        holidays: Vec<NaiveDate>,
    ) -> Self {
        Self {
            offset,
            open,
            close,
            holidays,
        }
    }

    /// Build the gate from configuration. Returns `None` when the offset or
    /// session times are out of range.
    pub fn from_config(config: &MarketHoursConfig) -> Option<Self> {
        let offset = FixedOffset::east_opt(config.utc_offset_minutes * 60)?;
        let open = NaiveTime::from_hms_opt(config.open_hour, config.open_minute, 0)?;
        let close = NaiveTime::from_hms_opt(config.close_hour, config.close_minute, 0)?;
        Some(Self::new(offset, open, close, config.holidays.clone()))
    }

    fn describe(&self, time: NaiveTime) -> String {
        time.format("%H:%M").to_string()
    }
}

impl MarketHoursGate for ExchangeHours {
    fn status(&self, now_utc: DateTime<Utc>) -> MarketStatus {
        let local = now_utc.with_timezone(&self.offset);
        let date = local.date_naive();
        let time = local.time();

        if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
            return MarketStatus::closed("Market closed: weekend");
        }
        if self.holidays.contains(&date) {
            return MarketStatus::closed(format!("Market closed: holiday ({})", date));
        }
        if time < self.open {
            return MarketStatus::closed(format!(
                "Market closed: opens at {} local time",
                self.describe(self.open)
            ));
        }
        if time >= self.close {
            return MarketStatus::closed(format!(
                "Market closed: closed at {} local time",
                self.describe(self.close)
            ));
        }

        MarketStatus::open("Market open")
    }
}
