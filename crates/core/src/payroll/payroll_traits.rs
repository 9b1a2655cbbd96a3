//! Pluggable state withholding.
//!
//! New jurisdictions implement the strategy trait and are handed to the
//! engine; the engine itself never changes.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::payroll_model::FilingStatus;

/// Strategy for computing state income tax withholding on one pay event.
pub trait StateWithholdingStrategy: Send + Sync {
    fn compute(
        &self,
        gross: Decimal,
        taxable_wages: Decimal,
        filing_status: FilingStatus,
        date: NaiveDate,
    ) -> Decimal;
}

/// Default strategy: a flat percentage of taxable wages.
pub struct FlatRateStateWithholding {
    /// Percent, e.g. 4.25 for 4.25%.
    rate_percent: Decimal,
}

impl FlatRateStateWithholding {
    pub fn new(rate_percent: Decimal) -> Self {
        FlatRateStateWithholding { rate_percent }
    }
}

impl StateWithholdingStrategy for FlatRateStateWithholding {
    fn compute(
        &self,
        _gross: Decimal,
        taxable_wages: Decimal,
        _filing_status: FilingStatus,
        _date: NaiveDate,
    ) -> Decimal {
        (taxable_wages * self.rate_percent / Decimal::ONE_HUNDRED).max(Decimal::ZERO)
    }
}
