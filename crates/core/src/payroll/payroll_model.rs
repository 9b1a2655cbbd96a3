//! Payroll domain models: settings, bonus events, and paycheck results.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::recurring::Cadence;

/// Federal filing status; keys the bracket, deduction, and threshold tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    #[default]
    Single,
    MarriedFilingJointly,
    MarriedFilingSeparately,
    HeadOfHousehold,
}

/// How the 401(k) contribution is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum K401ContributionMode {
    #[default]
    Percent,
    Fixed,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct K401Settings {
    pub enabled: bool,
    pub contribution_mode: K401ContributionMode,
    /// Percent of gross (0-100) in percent mode, dollars per paycheck in
    /// fixed mode.
    pub contribution_value: Decimal,
    pub enforce_annual_max: bool,
    pub catch_up_enabled: bool,
    /// Replaces the tax table's catch-up amount when set.
    pub catch_up_override: Option<Decimal>,
}

/// Per-paycheck benefit deductions.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BenefitSettings {
    pub pre_tax_per_paycheck: Decimal,
    pub post_tax_per_paycheck: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FicaSettings {
    pub include: bool,
    /// Override the tax table's Social Security wage base when set.
    pub ss_wage_base_override: Option<Decimal>,
    /// Override the additional-Medicare threshold when set.
    pub additional_medicare_threshold_override: Option<Decimal>,
}

/// Federal withholding method for a bonus event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BonusMethod {
    /// Flat supplemental rate from the tax table.
    #[default]
    SupplementalFlat,
    /// Same annualized bracket math as a regular paycheck.
    RegularAnnualized,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusEvent {
    pub date: NaiveDate,
    pub gross_amount: Decimal,
    pub method: BonusMethod,
}

/// User payroll assumptions for a tax year.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PayrollSettings {
    pub tax_year: i32,
    pub filing_status: FilingStatus,
    pub pay_cycle: Cadence,
    pub paycheck_anchor_date: Option<NaiveDate>,
    pub salary_annual: Decimal,
    pub dependents_count: u32,
    /// Replaces `dependents_count x per-dependent amount` when set.
    pub dependent_credit_override: Option<Decimal>,
    pub other_income_annual: Decimal,
    pub deductions_annual: Decimal,
    pub extra_withholding_per_paycheck: Decimal,
    /// Percent, e.g. 4.25 for 4.25%.
    pub state_withholding_flat_rate: Decimal,
    pub k401: K401Settings,
    pub benefits: BenefitSettings,
    pub fica: FicaSettings,
    #[serde(default)]
    pub bonus_events: Vec<BonusEvent>,
}

/// Running year-to-date accumulators, carried across pay events in order.
///
/// The 401(k) annual cap, the Social Security wage base, and the additional
/// Medicare threshold all depend on these, which is why pay events must be
/// processed chronologically from January 1.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct YtdTotals {
    pub gross: Decimal,
    pub taxable_wages: Decimal,
    pub k401_contributed: Decimal,
    /// Wages actually taxed for Social Security (capped by the wage base).
    pub ss_taxed_wages: Decimal,
    pub medicare_wages: Decimal,
    pub federal_withheld: Decimal,
    pub state_withheld: Decimal,
    pub fica_withheld: Decimal,
    pub net: Decimal,
}

/// One computed pay event, with per-check figures and the year-to-date
/// totals after this event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaycheckResult {
    pub date: NaiveDate,
    pub is_bonus: bool,
    pub gross: Decimal,
    pub k401_contribution: Decimal,
    pub pre_tax_benefits: Decimal,
    pub taxable_wages: Decimal,
    pub federal_withholding: Decimal,
    pub state_withholding: Decimal,
    pub ss_withholding: Decimal,
    pub medicare_withholding: Decimal,
    pub additional_medicare_withholding: Decimal,
    pub post_tax_deductions: Decimal,
    pub net: Decimal,
    pub ytd: YtdTotals,
}
