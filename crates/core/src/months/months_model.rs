//! Month identifier and month-scoped configuration models.
//!
//! A `MonthSnapshot` is owned exclusively by the month it represents: the
//! forecast simulator reads it, the transaction generator writes a new
//! transaction list into it, and nothing else mutates it inside the core.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::Account;
use crate::categories::Category;
use crate::errors::ValidationError;
use crate::recurring::Cadence;
use crate::transactions::Transaction;

/// Calendar month identifier, printed and parsed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthId {
    year: i32,
    month: u32,
}

impl MonthId {
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(ValidationError::InvalidMonthId(format!(
                "{:04}-{:02}",
                year, month
            )));
        }
        Ok(MonthId { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // Validity checked on construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first_day()
            .checked_add_months(chrono::Months::new(1))
            .and_then(|d| d.pred_opt())
            .unwrap_or_default()
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// True when `date` falls inside this calendar month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn prev(&self) -> MonthId {
        if self.month == 1 {
            MonthId {
                year: self.year - 1,
                month: 12,
            }
        } else {
            MonthId {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The January of this month's year, the baseline for year-to-date math.
    pub fn january(&self) -> MonthId {
        MonthId {
            year: self.year,
            month: 1,
        }
    }

    /// All months of this year from January through this month, in order.
    pub fn year_to_date(&self) -> Vec<MonthId> {
        (1..=self.month)
            .map(|month| MonthId {
                year: self.year,
                month,
            })
            .collect()
    }

    pub fn from_date(date: NaiveDate) -> MonthId {
        MonthId {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| ValidationError::InvalidMonthId(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| ValidationError::InvalidMonthId(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| ValidationError::InvalidMonthId(s.to_string()))?;
        MonthId::new(year, month)
    }
}

impl TryFrom<String> for MonthId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthId> for String {
    fn from(value: MonthId) -> Self {
        value.to_string()
    }
}

/// One destination of a paycheck deposit.
///
/// Fixed splits carry an explicit amount; at most one split should be marked
/// as the remainder, absorbing whatever is left of the paycheck.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositSplit {
    pub account_id: String,
    pub amount: Decimal,
    pub is_remainder: bool,
}

/// A cached paycheck figure produced by the payroll engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaycheckEstimate {
    pub date: NaiveDate,
    pub is_bonus: bool,
    pub net_amount: Decimal,
}

/// A user edit to a single paycheck, matched by (date, bonus flag).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaycheckOverride {
    pub date: NaiveDate,
    pub is_bonus: bool,
    pub amount: Decimal,
}

/// An ad hoc adjustment entered for one month.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneOff {
    pub id: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub account_id: String,
    pub category_id: String,
    pub one_off_type: crate::categories::CategoryType,
    #[serde(default)]
    pub description: String,
}

/// Per-month generation configuration, persisted alongside the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MonthSetup {
    pub paycheck_schedule: Option<Cadence>,
    pub paycheck_anchor_date: Option<NaiveDate>,
    #[serde(default)]
    pub paycheck_deposit_splits: Vec<DepositSplit>,
    pub paycheck_category_id: Option<String>,
    pub paycheck_default_amount: Option<Decimal>,
    /// Payroll-engine output cached for the month; preferred over the
    /// schedule-times-default fallback when present and non-empty.
    #[serde(default)]
    pub paycheck_estimates: Vec<PaycheckEstimate>,
    #[serde(default)]
    pub paycheck_overrides: Vec<PaycheckOverride>,
    /// Per-recurring-item amount overrides for this month only.
    #[serde(default)]
    pub variable_overrides: HashMap<String, Decimal>,
    #[serde(default)]
    pub one_offs: Vec<OneOff>,
    pub last_generated_at: Option<DateTime<Utc>>,
    /// Monotonic counter incremented on every generation run.
    #[serde(default)]
    pub generation_version: u64,
}

/// All data owned by a single month.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSnapshot {
    pub id: MonthId,
    pub accounts: Vec<Account>,
    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
    /// Opening balance per account id at the first of the month.
    #[serde(default)]
    pub starting_balances: HashMap<String, Decimal>,
    pub month_setup: MonthSetup,
    pub schema_version: u32,
}
