//! Gain/loss output models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::months::MonthId;

/// Balance deltas split by account classification. Loan accounts are
/// excluded from all gain/loss math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedDelta {
    pub cash: Decimal,
    pub investment: Decimal,
    pub combined: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GainLossReport {
    pub month: MonthId,
    /// Delta versus the previous calendar month.
    pub month_over_month: ClassifiedDelta,
    /// Delta versus the January baseline of the same year.
    pub year_to_date: ClassifiedDelta,
}
