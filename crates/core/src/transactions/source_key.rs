//! Composite keys identifying what generated a transaction.
//!
//! Keys are an explicit type with structural equality rather than ad hoc
//! string interpolation; the rendered form is what gets persisted on the
//! transaction as `source_item_id`.

use std::fmt;

use chrono::NaiveDate;

/// Identifies the rule, date, and sub-split a generated transaction came
/// from. A generation run emits at most one transaction per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceKey {
    /// One deposit split of one paycheck.
    Paycheck {
        date: NaiveDate,
        is_bonus: bool,
        account_id: String,
    },
    /// One occurrence of a recurring item.
    Recurring { item_id: String, date: NaiveDate },
    /// An ad hoc adjustment.
    OneOff { adjustment_id: String },
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKey::Paycheck {
                date,
                is_bonus,
                account_id,
            } => {
                let kind = if *is_bonus { "bonus" } else { "regular" };
                write!(f, "paycheck:{}:{}:{}", date, kind, account_id)
            }
            SourceKey::Recurring { item_id, date } => {
                write!(f, "recurring:{}:{}", item_id, date)
            }
            SourceKey::OneOff { adjustment_id } => write!(f, "oneoff:{}", adjustment_id),
        }
    }
}
