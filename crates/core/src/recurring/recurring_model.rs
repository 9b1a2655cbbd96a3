//! Recurring item domain models.
//!
//! Recurring items are declarative rules: the transaction generator consumes
//! them every month but never mutates them.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categories::CategoryType;
use crate::{errors::ValidationError, Error, Result};

/// Recurrence pattern for a recurring item or paycheck schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    #[default]
    Monthly,
    Weekly,
    Biweekly,
    Semimonthly,
}

impl Cadence {
    /// Pay periods per year for this cadence.
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Cadence::Monthly => 12,
            Cadence::Weekly => 52,
            Cadence::Biweekly => 26,
            Cadence::Semimonthly => 24,
        }
    }
}

/// Day-of-month rule for monthly cadences.
///
/// Accepted forms: a bare day number ("15"), the prefixed form ("day:15"),
/// or "last" for the final calendar day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRule {
    Day(u32),
    Last,
}

impl FromStr for DayRule {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("last") {
            return Ok(DayRule::Last);
        }
        let digits = s.strip_prefix("day:").unwrap_or(s);
        match digits.trim().parse::<u32>() {
            Ok(day) if day >= 1 => Ok(DayRule::Day(day)),
            _ => Err(ValidationError::InvalidInput(format!(
                "Unrecognized day rule '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for DayRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayRule::Day(day) => write!(f, "{}", day),
            DayRule::Last => write!(f, "last"),
        }
    }
}

/// Domain model for a recurring income/expense/transfer rule.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecurringItem {
    pub id: String,
    pub name: String,
    pub category_id: String,
    pub account_id: String,
    pub transfer_account_id: Option<String>,
    pub loan_id: Option<String>,
    pub cadence: Cadence,
    /// Unsigned magnitude; the generator applies the sign from `item_type`.
    pub default_amount: Decimal,
    /// Raw day rule text; parsed leniently at generation time.
    pub day_rule: Option<String>,
    pub item_type: CategoryType,
    pub enabled: bool,
    /// Phase reference for weekly/biweekly cadences.
    pub anchor_date: Option<NaiveDate>,
}

impl RecurringItem {
    /// Parsed day rule, or `None` when absent or unparseable (callers fall
    /// back to the anchor date's day-of-month).
    pub fn parsed_day_rule(&self) -> Option<DayRule> {
        self.day_rule.as_deref().and_then(|raw| raw.parse().ok())
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Recurring item name cannot be empty".to_string(),
            )));
        }
        if self.account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "accountId".to_string(),
            )));
        }
        if self.default_amount < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Recurring amount must be an unsigned magnitude".to_string(),
            )));
        }
        Ok(())
    }
}
