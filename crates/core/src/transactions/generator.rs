//! Transaction generation for one month.
//!
//! Expands paycheck entries, recurring items, and one-off adjustments into
//! concrete transactions, then merges them with the month's existing
//! transactions according to the requested mode. Manual transactions are
//! never removed or altered; only previously generated ones are eligible
//! for replacement.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, Utc};
use log::{debug, warn};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::categories::CategoryType;
use crate::constants::CENT_PRECISION;
use crate::months::{MonthId, MonthSetup};
use crate::recurring::RecurringItem;
use crate::schedule::schedule_dates;
use crate::Result;

use super::source_key::SourceKey;
use super::transactions_model::{Transaction, TransactionSource};

/// Merge policy for a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Discard every existing transaction and start over.
    Reset,
    /// Keep manual transactions, replace all generated ones. This is how
    /// edited amounts or schedule changes propagate.
    Regenerate,
    /// Keep everything; append only transactions whose key is not already
    /// present.
    Missing,
}

/// Output of a generation run: the month's new transaction list and the
/// setup with its generation counters bumped.
#[derive(Debug, Clone)]
pub struct GeneratedMonth {
    pub transactions: Vec<Transaction>,
    pub month_setup: MonthSetup,
}

/// A paycheck to be deposited, after estimate/fallback resolution and
/// override application.
#[derive(Debug, Clone)]
struct PaycheckEntry {
    date: NaiveDate,
    is_bonus: bool,
    amount: Decimal,
}

/// Expands the month's rules into transactions and merges them with
/// `existing` per `mode`.
///
/// Running `Regenerate` twice with unchanged inputs yields the same set of
/// (date, amount, account, key) tuples; ids and batch stamps differ per run.
pub fn generate_month_transactions(
    month: MonthId,
    setup: &MonthSetup,
    recurring_items: &[RecurringItem],
    existing: &[Transaction],
    mode: GenerationMode,
) -> Result<GeneratedMonth> {
    let batch_id = Uuid::new_v4().to_string();
    let mut generated: Vec<Transaction> = Vec::new();

    for entry in resolve_paycheck_entries(month, setup) {
        if entry.amount.is_zero() {
            continue;
        }
        expand_deposit_splits(&entry, setup, &batch_id, &mut generated);
    }

    for item in recurring_items.iter().filter(|i| i.enabled) {
        expand_recurring_item(month, item, setup, &batch_id, &mut generated);
    }

    for one_off in &setup.one_offs {
        if one_off.account_id.trim().is_empty() || one_off.category_id.trim().is_empty() {
            warn!("skipping one-off '{}' without account/category", one_off.id);
            continue;
        }
        let amount = match one_off.one_off_type {
            CategoryType::Income => one_off.amount.abs(),
            CategoryType::Expense => -one_off.amount.abs(),
            CategoryType::Transfer => one_off.amount,
        };
        generated.push(Transaction {
            id: Uuid::new_v4().to_string(),
            date: one_off.date,
            amount: round_cents(amount),
            account_id: one_off.account_id.clone(),
            transfer_account_id: None,
            transaction_type: one_off.one_off_type,
            category_id: Some(one_off.category_id.clone()),
            description: one_off.description.clone(),
            loan_id: None,
            source: TransactionSource::Generated,
            source_item_id: Some(
                SourceKey::OneOff {
                    adjustment_id: one_off.id.clone(),
                }
                .to_string(),
            ),
            generated_batch_id: Some(batch_id.clone()),
        });
    }

    let generated = dedupe_by_key(generated);
    debug!(
        "generated {} transactions for {} in {:?} mode",
        generated.len(),
        month,
        mode
    );

    let transactions = merge(existing, generated, mode);

    let mut month_setup = setup.clone();
    month_setup.generation_version += 1;
    month_setup.last_generated_at = Some(Utc::now());

    Ok(GeneratedMonth {
        transactions,
        month_setup,
    })
}

/// Paycheck entries for the month: cached payroll estimates when present,
/// otherwise the schedule times the default amount; user overrides matched
/// by (date, bonus flag) replace the amount either way.
fn resolve_paycheck_entries(month: MonthId, setup: &MonthSetup) -> Vec<PaycheckEntry> {
    let mut entries: Vec<PaycheckEntry> = if !setup.paycheck_estimates.is_empty() {
        setup
            .paycheck_estimates
            .iter()
            .map(|estimate| PaycheckEntry {
                date: estimate.date,
                is_bonus: estimate.is_bonus,
                amount: estimate.net_amount,
            })
            .collect()
    } else if let Some(schedule) = setup.paycheck_schedule {
        let default_amount = setup.paycheck_default_amount.unwrap_or(Decimal::ZERO);
        schedule_dates(month, schedule, setup.paycheck_anchor_date, None)
            .into_iter()
            .map(|date| PaycheckEntry {
                date,
                is_bonus: false,
                amount: default_amount,
            })
            .collect()
    } else {
        Vec::new()
    };

    for over in &setup.paycheck_overrides {
        if let Some(entry) = entries
            .iter_mut()
            .find(|e| e.date == over.date && e.is_bonus == over.is_bonus)
        {
            entry.amount = over.amount;
        }
    }

    entries
}

/// One transaction per deposit split. Fixed splits take their configured
/// amount; the first remainder split absorbs what is left, floored at zero.
fn expand_deposit_splits(
    entry: &PaycheckEntry,
    setup: &MonthSetup,
    batch_id: &str,
    out: &mut Vec<Transaction>,
) {
    let splits = &setup.paycheck_deposit_splits;
    if splits.is_empty() {
        warn!("paycheck on {} has no deposit splits configured", entry.date);
        return;
    }

    let fixed_sum: Decimal = splits
        .iter()
        .filter(|s| !s.is_remainder)
        .map(|s| s.amount)
        .sum();

    let mut remainder_used = false;
    for split in splits {
        let amount = if split.is_remainder {
            if remainder_used {
                warn!("multiple remainder splits configured; ignoring extras");
                continue;
            }
            remainder_used = true;
            round_cents((entry.amount - fixed_sum).max(Decimal::ZERO))
        } else {
            round_cents(split.amount)
        };
        if amount.is_zero() {
            continue;
        }

        let description = if entry.is_bonus { "Bonus" } else { "Paycheck" };
        out.push(Transaction {
            id: Uuid::new_v4().to_string(),
            date: entry.date,
            amount,
            account_id: split.account_id.clone(),
            transfer_account_id: None,
            transaction_type: CategoryType::Income,
            category_id: setup.paycheck_category_id.clone(),
            description: description.to_string(),
            loan_id: None,
            source: TransactionSource::Generated,
            source_item_id: Some(
                SourceKey::Paycheck {
                    date: entry.date,
                    is_bonus: entry.is_bonus,
                    account_id: split.account_id.clone(),
                }
                .to_string(),
            ),
            generated_batch_id: Some(batch_id.to_string()),
        });
    }
}

/// One transaction per scheduled date of a recurring item, with this
/// month's amount override applied and the sign taken from the item type.
fn expand_recurring_item(
    month: MonthId,
    item: &RecurringItem,
    setup: &MonthSetup,
    batch_id: &str,
    out: &mut Vec<Transaction>,
) {
    let dates = schedule_dates(month, item.cadence, item.anchor_date, item.parsed_day_rule());
    if dates.is_empty() {
        warn!("recurring item '{}' produced no dates for {}", item.id, month);
        return;
    }

    let magnitude = setup
        .variable_overrides
        .get(&item.id)
        .copied()
        .unwrap_or(item.default_amount);
    let amount = match item.item_type {
        CategoryType::Income => magnitude,
        CategoryType::Expense => -magnitude,
        // Transfers keep the configured sign; the simulator moves the
        // absolute amount between accounts
        CategoryType::Transfer => magnitude,
    };

    for date in dates {
        out.push(Transaction {
            id: Uuid::new_v4().to_string(),
            date,
            amount: round_cents(amount),
            account_id: item.account_id.clone(),
            transfer_account_id: item.transfer_account_id.clone(),
            transaction_type: item.item_type,
            category_id: Some(item.category_id.clone()),
            description: item.name.clone(),
            loan_id: item.loan_id.clone(),
            source: TransactionSource::Generated,
            source_item_id: Some(
                SourceKey::Recurring {
                    item_id: item.id.clone(),
                    date,
                }
                .to_string(),
            ),
            generated_batch_id: Some(batch_id.to_string()),
        });
    }
}

/// Keys are unique by construction; should two transactions still collide,
/// the later one in generation order wins.
fn dedupe_by_key(generated: Vec<Transaction>) -> Vec<Transaction> {
    let mut index_by_key: HashMap<String, usize> = HashMap::new();
    let mut result: Vec<Transaction> = Vec::with_capacity(generated.len());
    for transaction in generated {
        match transaction.source_item_id.clone() {
            Some(key) => match index_by_key.get(&key) {
                Some(&index) => {
                    warn!("generated key collision on '{}'; keeping later entry", key);
                    result[index] = transaction;
                }
                None => {
                    index_by_key.insert(key, result.len());
                    result.push(transaction);
                }
            },
            None => result.push(transaction),
        }
    }
    result.sort_by(|a, b| {
        (a.date, a.source_item_id.as_deref()).cmp(&(b.date, b.source_item_id.as_deref()))
    });
    result
}

fn merge(
    existing: &[Transaction],
    generated: Vec<Transaction>,
    mode: GenerationMode,
) -> Vec<Transaction> {
    match mode {
        GenerationMode::Reset => generated,
        GenerationMode::Regenerate => {
            let mut kept: Vec<Transaction> = existing
                .iter()
                .filter(|t| !t.is_generated())
                .cloned()
                .collect();
            kept.extend(generated);
            kept
        }
        GenerationMode::Missing => {
            let known: HashSet<&str> = existing
                .iter()
                .filter_map(|t| t.source_item_id.as_deref())
                .collect();
            let mut kept: Vec<Transaction> = existing.to_vec();
            kept.extend(generated.into_iter().filter(|t| {
                t.source_item_id
                    .as_deref()
                    .map(|key| !known.contains(key))
                    .unwrap_or(true)
            }));
            kept
        }
    }
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CENT_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}
