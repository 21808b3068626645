//! Append-only CSV log of actionable signals.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::types::Decision;

/// Header row written when the log is created.
pub const LOG_HEADER: &str = "timestamp,signal,confidence,regime,entryPrice,outcome";

/// Outcome written for every new row; resolved later outside this service.
pub const PENDING_OUTCOME: &str = "PENDING";

/// One logged signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeLogRecord {
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub timestamp: String,
    pub signal: String,
    pub confidence: f64,
    pub regime: String,
    pub entry_price: f64,
    pub outcome: String,
}

impl TradeLogRecord {
    /// Record for `decision` at `now`, with a pending outcome.
    pub fn pending(decision: &Decision, now: DateTime<Utc>) -> Self {
        Self {
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            signal: decision.signal.to_string(),
            confidence: decision.confidence,
            regime: decision.regime.to_string(),
            entry_price: decision.price,
            outcome: PENDING_OUTCOME.to_string(),
        }
    }
}

/// Storage for logged signals and the aggregate read-back.
pub trait SignalLogger: Send + Sync {
    fn append(&self, record: &TradeLogRecord) -> Result<()>;

    /// Number of logged CALL or PUT rows.
    fn total_trades(&self) -> Result<usize>;
}

/// CSV file implementation. Appends are serialized by an internal lock.
pub struct CsvTradeLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvTradeLog {
    /// Open the log at `path`, writing the header if the file is new or empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let needs_header = match fs::metadata(&path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        if needs_header {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, format!("{}\n", LOG_HEADER))?;
            info!("Created trade log at {}", path.display());
        }

        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| AppError::Internal("trade log lock poisoned".to_string()))
    }
}

impl SignalLogger for CsvTradeLog {
    fn append(&self, record: &TradeLogRecord) -> Result<()> {
        let _guard = self.guard()?;

        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;

        debug!(
            "Logged {} at {} (confidence {:.1})",
            record.signal, record.entry_price, record.confidence
        );
        Ok(())
    }

    fn total_trades(&self) -> Result<usize> {
        let _guard = self.guard()?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let mut count = 0;
        for row in reader.records() {
            let row = row?;
            if row
                .iter()
                .any(|field| field.contains("CALL") || field.contains("PUT"))
            {
                count += 1;
            }
        }
        Ok(count)
    }
}
