//! Balance-carrying day-by-day simulation.

use std::collections::HashMap;

use chrono::Duration;
use log::{debug, warn};
use rust_decimal::Decimal;

use crate::months::MonthSnapshot;

use super::forecast_model::ForecastPoint;

/// Walks every calendar day of the snapshot's month, applying that day's
/// transactions to running balances, and emits one `ForecastPoint` per day.
///
/// Transfer transactions move the absolute amount from the source account to
/// the destination; everything else adds its signed amount to the account
/// balance. A transaction against an account with no starting balance entry
/// starts that account at zero rather than aborting the simulation.
pub fn calculate_forecast(snapshot: &MonthSnapshot) -> Vec<ForecastPoint> {
    let mut balances: HashMap<String, Decimal> = snapshot.starting_balances.clone();
    for account in &snapshot.accounts {
        balances.entry(account.id.clone()).or_insert(Decimal::ZERO);
    }

    let known: HashMap<&str, &crate::accounts::Account> = snapshot
        .accounts
        .iter()
        .map(|a| (a.id.as_str(), a))
        .collect();

    let first = snapshot.id.first_day();
    let days = snapshot.id.days_in_month();
    debug!(
        "forecast {}: {} accounts, {} transactions, {} days",
        snapshot.id,
        snapshot.accounts.len(),
        snapshot.transactions.len(),
        days
    );

    let mut points = Vec::with_capacity(days as usize);
    for offset in 0..days {
        let day = first + Duration::days(i64::from(offset));

        for transaction in snapshot.transactions.iter().filter(|t| t.date == day) {
            if !known.contains_key(transaction.account_id.as_str()) {
                warn!(
                    "transaction {} references unknown account '{}'",
                    transaction.id, transaction.account_id
                );
            }
            if transaction.is_transfer() {
                let moved = transaction.amount.abs();
                *balances
                    .entry(transaction.account_id.clone())
                    .or_insert(Decimal::ZERO) -= moved;
                if let Some(destination) = &transaction.transfer_account_id {
                    *balances.entry(destination.clone()).or_insert(Decimal::ZERO) += moved;
                }
            } else {
                *balances
                    .entry(transaction.account_id.clone())
                    .or_insert(Decimal::ZERO) += transaction.amount;
            }
        }

        let total_cash = balances
            .iter()
            .filter_map(|(id, balance)| {
                known
                    .get(id.as_str())
                    .filter(|account| account.is_cash_eligible())
                    .map(|_| *balance)
            })
            .sum();

        points.push(ForecastPoint {
            date: day,
            balances: balances.clone(),
            total_cash,
        });
    }

    points
}
