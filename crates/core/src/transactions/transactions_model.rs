//! Transaction domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categories::CategoryType;

/// Who produced a transaction. Generated transactions may be removed and
/// replaced by a regeneration run; manual transactions never are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionSource {
    Generated,
    #[default]
    Manual,
}

/// A concrete dated cash movement. Amounts are signed: positive is an
/// inflow to `account_id`, negative an outflow.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub account_id: String,
    pub transfer_account_id: Option<String>,
    pub transaction_type: CategoryType,
    pub category_id: Option<String>,
    #[serde(default)]
    pub description: String,
    pub loan_id: Option<String>,
    pub source: TransactionSource,
    /// Stable key tying a generated transaction back to the rule and date
    /// that produced it; drives deduplication and safe regeneration.
    pub source_item_id: Option<String>,
    pub generated_batch_id: Option<String>,
}

impl Transaction {
    pub fn is_generated(&self) -> bool {
        self.source == TransactionSource::Generated
    }

    /// Transfer semantics apply when the type says so or a destination
    /// account is attached.
    pub fn is_transfer(&self) -> bool {
        self.transaction_type == CategoryType::Transfer || self.transfer_account_id.is_some()
    }
}
