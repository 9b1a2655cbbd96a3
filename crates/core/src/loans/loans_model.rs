//! Loan domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::months::MonthId;

/// One applied monthly payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPaymentRecord {
    pub month_id: MonthId,
    pub amount: Decimal,
    pub interest_accrued: Decimal,
    pub balance_before: Decimal,
    pub balance_after: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: String,
    pub name: String,
    pub origination_date: Option<NaiveDate>,
    pub original_principal: Decimal,
    pub current_balance: Decimal,
    /// Annual percentage rate, e.g. 6.5 for 6.5%.
    pub interest_rate: Decimal,
    pub maturity_date: Option<NaiveDate>,
    #[serde(default)]
    pub payment_history: Vec<LoanPaymentRecord>,
}
