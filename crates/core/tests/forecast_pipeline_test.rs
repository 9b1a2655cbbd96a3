//! End-to-end pipeline tests: payroll engine -> transaction generator ->
//! forecast simulator -> gain/loss aggregation.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use flowcast_core::accounts::{Account, AccountType};
use flowcast_core::categories::CategoryType;
use flowcast_core::constants::SNAPSHOT_SCHEMA_VERSION;
use flowcast_core::forecast::calculate_forecast;
use flowcast_core::gainloss::gain_loss_report;
use flowcast_core::months::{DepositSplit, MonthId, MonthSetup, MonthSnapshot, PaycheckEstimate};
use flowcast_core::payroll::{
    DependentCredit, FicaConfig, FilingStatus, MedicareThreshold, PayrollService, PayrollSettings,
    RetirementLimits, TaxBracket, TaxTableSet,
};
use flowcast_core::recurring::{Cadence, RecurringItem};
use flowcast_core::transactions::{generate_month_transactions, GenerationMode};

fn month(s: &str) -> MonthId {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn checking() -> Account {
    Account {
        id: "checking".to_string(),
        name: "Checking".to_string(),
        account_type: AccountType::Checking,
        included_in_cash_forecast: true,
        ..Default::default()
    }
}

fn flat_tables() -> TaxTableSet {
    let mut brackets = HashMap::new();
    brackets.insert(
        FilingStatus::Single,
        vec![TaxBracket {
            lower_bound: Decimal::ZERO,
            upper_bound: None,
            rate: dec!(0.20),
        }],
    );
    let mut standard_deduction = HashMap::new();
    standard_deduction.insert(FilingStatus::Single, Decimal::ZERO);

    TaxTableSet {
        tax_year: 2024,
        schema_version: 1,
        federal_income_tax_brackets: brackets,
        standard_deduction,
        dependent_credit: DependentCredit {
            per_dependent_credit_amount: dec!(2000),
        },
        federal_supplemental_withholding_rate: Some(dec!(0.22)),
        fica: FicaConfig {
            ss_rate: dec!(0.062),
            medicare_rate: dec!(0.0145),
            ss_wage_base: dec!(168600),
            additional_medicare_rate: dec!(0.009),
            additional_medicare_threshold: MedicareThreshold::Flat(dec!(200000)),
        },
        retirement: RetirementLimits {
            k401_employee_max: dec!(23000),
            k401_catch_up_max: dec!(7500),
        },
    }
}

fn snapshot(
    month_id: MonthId,
    setup: MonthSetup,
    starting: Decimal,
) -> MonthSnapshot {
    MonthSnapshot {
        id: month_id,
        accounts: vec![checking()],
        categories: Vec::new(),
        transactions: Vec::new(),
        starting_balances: HashMap::from([("checking".to_string(), starting)]),
        month_setup: setup,
        schema_version: SNAPSHOT_SCHEMA_VERSION,
    }
}

#[test]
fn rent_only_month_goes_negative_and_stays_there() {
    let rent = RecurringItem {
        id: "rent".to_string(),
        name: "Rent".to_string(),
        category_id: "housing".to_string(),
        account_id: "checking".to_string(),
        cadence: Cadence::Monthly,
        default_amount: dec!(1200),
        day_rule: Some("1".to_string()),
        item_type: CategoryType::Expense,
        enabled: true,
        ..Default::default()
    };

    let mut snap = snapshot(month("2024-03"), MonthSetup::default(), dec!(1000));
    let generated = generate_month_transactions(
        snap.id,
        &snap.month_setup,
        &[rent],
        &snap.transactions,
        GenerationMode::Regenerate,
    )
    .unwrap();
    snap.transactions = generated.transactions;
    snap.month_setup = generated.month_setup;

    let points = calculate_forecast(&snap);
    assert_eq!(points.len(), 31);
    assert_eq!(points[0].date, date("2024-03-01"));
    assert_eq!(points[0].balances["checking"], dec!(-200));
    // No other transactions: the balance persists through the 31st
    for point in &points {
        assert_eq!(point.balances["checking"], dec!(-200));
        assert_eq!(point.total_cash, dec!(-200));
    }
}

#[test]
fn payroll_feeds_generation_feeds_forecast() {
    let settings = PayrollSettings {
        tax_year: 2024,
        filing_status: FilingStatus::Single,
        pay_cycle: Cadence::Biweekly,
        paycheck_anchor_date: Some(date("2024-01-05")),
        salary_annual: dec!(120000),
        ..Default::default()
    };

    let results = PayrollService::new()
        .calculate_payroll_for_month(
            month("2024-03"),
            Cadence::Biweekly,
            Some(date("2024-01-05")),
            &settings,
            &flat_tables(),
        )
        .unwrap();

    // Mar 1, 15, 29 at net 3692.30 each
    assert_eq!(results.len(), 3);
    for check in &results {
        assert_eq!(check.gross, dec!(4615.38));
        assert_eq!(check.net, dec!(3692.30));
    }

    let setup = MonthSetup {
        paycheck_estimates: results.iter().map(PaycheckEstimate::from).collect(),
        paycheck_category_id: Some("salary".to_string()),
        paycheck_deposit_splits: vec![DepositSplit {
            account_id: "checking".to_string(),
            amount: Decimal::ZERO,
            is_remainder: true,
        }],
        ..Default::default()
    };

    let mut snap = snapshot(month("2024-03"), setup, dec!(250));
    let generated = generate_month_transactions(
        snap.id,
        &snap.month_setup,
        &[],
        &snap.transactions,
        GenerationMode::Regenerate,
    )
    .unwrap();
    assert_eq!(generated.transactions.len(), 3);
    snap.transactions = generated.transactions;

    let points = calculate_forecast(&snap);
    // After the Mar 1 deposit
    assert_eq!(points[0].total_cash, dec!(250) + dec!(3692.30));
    // Month end: three deposits in
    assert_eq!(
        points[30].total_cash,
        dec!(250) + dec!(3692.30) * dec!(3)
    );
}

#[test]
fn regeneration_after_an_override_keeps_manual_entries() {
    let groceries = RecurringItem {
        id: "groceries".to_string(),
        name: "Groceries".to_string(),
        category_id: "food".to_string(),
        account_id: "checking".to_string(),
        cadence: Cadence::Weekly,
        default_amount: dec!(120),
        item_type: CategoryType::Expense,
        enabled: true,
        anchor_date: Some(date("2024-02-03")),
        ..Default::default()
    };

    let mut setup = MonthSetup::default();
    let first = generate_month_transactions(
        month("2024-03"),
        &setup,
        std::slice::from_ref(&groceries),
        &[],
        GenerationMode::Regenerate,
    )
    .unwrap();
    // Weekly from a Feb 3 anchor: Mar 2, 9, 16, 23, 30
    assert_eq!(first.transactions.len(), 5);

    // User tweaks the monthly amount and adds a manual purchase
    setup = first.month_setup.clone();
    setup
        .variable_overrides
        .insert("groceries".to_string(), dec!(95));
    let mut existing = first.transactions.clone();
    existing.push(flowcast_core::transactions::Transaction {
        id: "manual-1".to_string(),
        date: date("2024-03-12"),
        amount: dec!(-18.40),
        account_id: "checking".to_string(),
        transaction_type: CategoryType::Expense,
        description: "Farmers market".to_string(),
        ..Default::default()
    });

    let second = generate_month_transactions(
        month("2024-03"),
        &setup,
        std::slice::from_ref(&groceries),
        &existing,
        GenerationMode::Regenerate,
    )
    .unwrap();

    assert_eq!(second.transactions.len(), 6);
    assert!(second.transactions.iter().any(|t| t.id == "manual-1"));
    assert!(second
        .transactions
        .iter()
        .filter(|t| t.description == "Groceries")
        .all(|t| t.amount == dec!(-95.00)));
    assert_eq!(second.month_setup.generation_version, 2);
}

#[test]
fn year_to_date_gain_uses_january_baseline() {
    let mut snapshots = HashMap::new();
    snapshots.insert(
        month("2024-01"),
        HashMap::from([("checking".to_string(), dec!(5000))]),
    );
    snapshots.insert(
        month("2024-06"),
        HashMap::from([("checking".to_string(), dec!(5800))]),
    );

    let report = gain_loss_report(
        month("2024-06"),
        &[checking()],
        &snapshots,
        &HashMap::new(),
    );
    assert_eq!(report.year_to_date.cash, dec!(800));
    assert_eq!(report.year_to_date.combined, dec!(800));
}
