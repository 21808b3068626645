use serde::{Deserialize, Serialize};

/// Result of a market-hours check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStatus {
    pub open: bool,
    /// Human-readable explanation, returned to clients when closed.
    pub reason: String,
}

impl MarketStatus {
    pub fn open(reason: impl Into<String>) -> Self {
        Self {
            open: true,
            reason: reason.into(),
        }
    }

    pub fn closed(reason: impl Into<String>) -> Self {
        Self {
            open: false,
            reason: reason.into(),
        }
    }
}
