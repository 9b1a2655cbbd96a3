//! Monthly loan payment application.
//!
//! Consumes the transaction generator's output: the month's loan-directed
//! transaction total is applied against the loan balance, interest first.
//! This runs once per month per loan, after generation.

use log::debug;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::CENT_PRECISION;
use crate::months::MonthId;
use crate::transactions::Transaction;
use crate::{errors::ValidationError, Error, Result};

use super::loans_model::{Loan, LoanPaymentRecord};

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Sum of a month's transactions directed at `loan_id`, as a positive
/// payment amount.
pub fn month_loan_payment_total(loan_id: &str, transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.loan_id.as_deref() == Some(loan_id))
        .map(|t| t.amount.abs())
        .sum()
}

/// Applies one month's payment: accrues a month of interest at APR/12 on
/// the running balance, then reduces principal with the rest, flooring the
/// balance at zero. Appends a history record and returns the updated loan.
pub fn apply_monthly_payment(loan: &Loan, month: MonthId, amount: Decimal) -> Result<Loan> {
    if amount < Decimal::ZERO {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Loan payment amount {} cannot be negative",
            amount
        ))));
    }
    if loan
        .payment_history
        .iter()
        .any(|record| record.month_id == month)
    {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Loan '{}' already has a payment applied for {}",
            loan.id, month
        ))));
    }

    let balance_before = loan.current_balance;
    let monthly_rate = loan.interest_rate / Decimal::ONE_HUNDRED / MONTHS_PER_YEAR;
    let interest_accrued = round_cents(balance_before * monthly_rate);
    let principal_portion = (amount - interest_accrued).max(Decimal::ZERO);
    let balance_after = (balance_before - principal_portion).max(Decimal::ZERO);

    debug!(
        "loan {} {}: payment {}, interest {}, balance {} -> {}",
        loan.id, month, amount, interest_accrued, balance_before, balance_after
    );

    let mut updated = loan.clone();
    updated.current_balance = balance_after;
    updated.payment_history.push(LoanPaymentRecord {
        month_id: month,
        amount,
        interest_accrued,
        balance_before,
        balance_after,
    });
    Ok(updated)
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CENT_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}
