//! Gain/loss aggregation across months.

use std::collections::HashMap;

use log::debug;
use rust_decimal::Decimal;

use crate::accounts::Account;
use crate::months::MonthId;

use super::gainloss_model::{ClassifiedDelta, GainLossReport};

/// Opening balances per account for a set of months. Snapshot balances come
/// from retained `MonthSnapshot.starting_balances`; historical balances are
/// manual backfill for months predating app adoption.
pub type MonthBalances = HashMap<MonthId, HashMap<String, Decimal>>;

/// Resolves a month's opening balances: the snapshot's own balances when
/// any entry is non-zero, else the manually recorded historical entry, else
/// all zeros.
pub fn resolve_month_balances<'a>(
    month: MonthId,
    snapshot_balances: &'a MonthBalances,
    historical_balances: &'a MonthBalances,
) -> Option<&'a HashMap<String, Decimal>> {
    if let Some(balances) = snapshot_balances.get(&month) {
        if balances.values().any(|b| !b.is_zero()) {
            return Some(balances);
        }
    }
    historical_balances.get(&month)
}

/// Month-over-month and year-to-date deltas for `month`, classified into
/// cash and investment buckets.
pub fn gain_loss_report(
    month: MonthId,
    accounts: &[Account],
    snapshot_balances: &MonthBalances,
    historical_balances: &MonthBalances,
) -> GainLossReport {
    let current = classify(month, accounts, snapshot_balances, historical_balances);
    let previous = classify(month.prev(), accounts, snapshot_balances, historical_balances);
    let january = classify(month.january(), accounts, snapshot_balances, historical_balances);

    debug!(
        "gain/loss {}: cash {} (prev {}, jan {})",
        month, current.cash, previous.cash, january.cash
    );

    GainLossReport {
        month,
        month_over_month: delta(current, previous),
        year_to_date: delta(current, january),
    }
}

/// Sums one month's resolved balances by account classification.
fn classify(
    month: MonthId,
    accounts: &[Account],
    snapshot_balances: &MonthBalances,
    historical_balances: &MonthBalances,
) -> ClassifiedDelta {
    let resolved = resolve_month_balances(month, snapshot_balances, historical_balances);

    let mut totals = ClassifiedDelta::default();
    for account in accounts {
        let balance = resolved
            .and_then(|b| b.get(&account.id))
            .copied()
            .unwrap_or(Decimal::ZERO);
        if account.is_cash_eligible() {
            totals.cash += balance;
        } else if account.is_investment() {
            totals.investment += balance;
        }
    }
    totals.combined = totals.cash + totals.investment;
    totals
}

fn delta(current: ClassifiedDelta, baseline: ClassifiedDelta) -> ClassifiedDelta {
    ClassifiedDelta {
        cash: current.cash - baseline.cash,
        investment: current.investment - baseline.investment,
        combined: current.combined - baseline.combined,
    }
}
