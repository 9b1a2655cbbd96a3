//! Forecast output models.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// End-of-day balance snapshot for one calendar day.
///
/// Produced fresh on every simulation call; the core never persists these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub date: NaiveDate,
    /// Balance per account id after this day's transactions.
    pub balances: HashMap<String, Decimal>,
    /// Sum over cash-eligible accounts only.
    pub total_cash: Decimal,
}
