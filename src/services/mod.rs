pub mod market_hours;
pub mod signals;
pub mod trade_log;

pub use market_hours::{AlwaysOpen, ExchangeHours, MarketHoursGate};
pub use signals::{evaluate, ScoringConfig, SignalEngine};
pub use trade_log::{CsvTradeLog, SignalLogger, TradeLogRecord};
