//! Payroll engine: one full payroll cycle for a month.
//!
//! The engine replays every pay event of the year up to and including the
//! requested month, folding an explicit `YtdTotals` accumulator through the
//! events in date order. Annual caps (401(k) max, Social Security wage base,
//! additional Medicare threshold) only make sense against that running
//! state, so events from earlier months are computed even though only the
//! requested month's results are returned.

use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::CENT_PRECISION;
use crate::months::{MonthId, PaycheckEstimate};
use crate::recurring::Cadence;
use crate::schedule::schedule_dates;
use crate::{Error, Result};

use super::payroll_model::{
    BonusEvent, BonusMethod, K401ContributionMode, PaycheckResult, PayrollSettings, YtdTotals,
};
use super::payroll_traits::StateWithholdingStrategy;
use super::tax_tables::TaxTableSet;
use super::withholding::{federal_withholding_per_paycheck, WithholdingInputs};

/// A dated pay event; bonuses carry their own gross and withholding method.
#[derive(Debug, Clone)]
struct PayEvent {
    date: NaiveDate,
    bonus: Option<BonusEvent>,
}

pub struct PayrollService {
    /// Jurisdiction-specific state withholding; when absent, the settings'
    /// flat rate applies.
    state_withholding: Option<Arc<dyn StateWithholdingStrategy>>,
}

impl Default for PayrollService {
    fn default() -> Self {
        Self::new()
    }
}

impl PayrollService {
    pub fn new() -> Self {
        PayrollService {
            state_withholding: None,
        }
    }

    pub fn with_state_strategy(strategy: Arc<dyn StateWithholdingStrategy>) -> Self {
        PayrollService {
            state_withholding: Some(strategy),
        }
    }

    /// Computes every paycheck of `month`, including running year-to-date
    /// totals accumulated from January 1.
    ///
    /// Missing or malformed tax table data is a precondition fault and is
    /// returned as an error; the engine never substitutes defaults for
    /// required payroll inputs.
    pub fn calculate_payroll_for_month(
        &self,
        month: MonthId,
        schedule: Cadence,
        anchor: Option<NaiveDate>,
        settings: &PayrollSettings,
        tables: &TaxTableSet,
    ) -> Result<Vec<PaycheckResult>> {
        tables.validate().map_err(Error::TaxTable)?;

        let events = build_year_to_date_events(month, schedule, anchor, settings);
        debug!(
            "payroll: {} pay events through {} ({} periods/year)",
            events.len(),
            month,
            schedule.periods_per_year()
        );

        let per_check_gross = round_cents(
            settings.salary_annual / Decimal::from(schedule.periods_per_year()),
        );

        let mut ytd = YtdTotals::default();
        let mut results = Vec::new();
        for event in events {
            let result = self.process_event(&event, per_check_gross, schedule, settings, tables, &mut ytd)?;
            if month.contains(event.date) {
                results.push(result);
            }
        }
        Ok(results)
    }

    /// One pay event: gross through net, mutating the running YTD totals.
    fn process_event(
        &self,
        event: &PayEvent,
        per_check_gross: Decimal,
        schedule: Cadence,
        settings: &PayrollSettings,
        tables: &TaxTableSet,
        ytd: &mut YtdTotals,
    ) -> Result<PaycheckResult> {
        let is_bonus = event.bonus.is_some();
        let gross = match &event.bonus {
            Some(bonus) => round_cents(bonus.gross_amount),
            None => per_check_gross,
        };

        // 401(k) and pre-tax benefits apply to regular checks only
        let k401_contribution = if is_bonus {
            Decimal::ZERO
        } else {
            round_cents(self.k401_contribution(gross, settings, tables, ytd))
        };
        let pre_tax_benefits = if is_bonus {
            Decimal::ZERO
        } else {
            round_cents(settings.benefits.pre_tax_per_paycheck)
        };

        let taxable_wages = (gross - k401_contribution - pre_tax_benefits).max(Decimal::ZERO);

        let federal_withholding = round_cents(self.federal_withholding(
            event,
            taxable_wages,
            schedule,
            settings,
            tables,
        )?);

        let state_withholding = round_cents(self.state_withholding_for(
            gross,
            taxable_wages,
            event.date,
            settings,
        ));

        let (ss_withholding, ss_taxed, medicare_withholding, additional_medicare_withholding) =
            if settings.fica.include {
                self.fica_withholding(gross, settings, tables, ytd)?
            } else {
                (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
            };

        let post_tax_deductions = round_cents(settings.benefits.post_tax_per_paycheck);

        let fica_total = ss_withholding + medicare_withholding + additional_medicare_withholding;
        let net = gross
            - k401_contribution
            - pre_tax_benefits
            - federal_withholding
            - state_withholding
            - fica_total
            - post_tax_deductions;

        ytd.gross += gross;
        ytd.taxable_wages += taxable_wages;
        ytd.k401_contributed += k401_contribution;
        ytd.ss_taxed_wages += ss_taxed;
        ytd.medicare_wages += gross;
        ytd.federal_withheld += federal_withholding;
        ytd.state_withheld += state_withholding;
        ytd.fica_withheld += fica_total;
        ytd.net += net;

        Ok(PaycheckResult {
            date: event.date,
            is_bonus,
            gross,
            k401_contribution,
            pre_tax_benefits,
            taxable_wages,
            federal_withholding,
            state_withholding,
            ss_withholding,
            medicare_withholding,
            additional_medicare_withholding,
            post_tax_deductions,
            net,
            ytd: ytd.clone(),
        })
    }

    /// Desired 401(k) contribution, capped by the annual maximum when
    /// enforcement is on.
    fn k401_contribution(
        &self,
        gross: Decimal,
        settings: &PayrollSettings,
        tables: &TaxTableSet,
        ytd: &YtdTotals,
    ) -> Decimal {
        let k401 = &settings.k401;
        if !k401.enabled {
            return Decimal::ZERO;
        }

        let desired = match k401.contribution_mode {
            K401ContributionMode::Percent => {
                gross * k401.contribution_value / Decimal::ONE_HUNDRED
            }
            K401ContributionMode::Fixed => k401.contribution_value,
        }
        .max(Decimal::ZERO);

        if !k401.enforce_annual_max {
            return desired;
        }

        let catch_up = if k401.catch_up_enabled {
            k401.catch_up_override
                .unwrap_or(tables.retirement.k401_catch_up_max)
        } else {
            Decimal::ZERO
        };
        let annual_max = tables.retirement.k401_employee_max + catch_up;
        let remaining = (annual_max - ytd.k401_contributed).max(Decimal::ZERO);
        desired.min(remaining)
    }

    fn federal_withholding(
        &self,
        event: &PayEvent,
        taxable_wages: Decimal,
        schedule: Cadence,
        settings: &PayrollSettings,
        tables: &TaxTableSet,
    ) -> Result<Decimal> {
        if let Some(bonus) = &event.bonus {
            if bonus.method == BonusMethod::SupplementalFlat {
                let rate = tables.supplemental_rate().map_err(Error::TaxTable)?;
                return Ok(taxable_wages * rate);
            }
        }

        let inputs = WithholdingInputs {
            taxable_wages,
            periods_per_year: schedule.periods_per_year(),
            brackets: tables
                .brackets_for(settings.filing_status)
                .map_err(Error::TaxTable)?,
            standard_deduction: tables
                .standard_deduction_for(settings.filing_status)
                .map_err(Error::TaxTable)?,
            other_income_annual: settings.other_income_annual,
            deductions_annual: settings.deductions_annual,
            dependents_count: settings.dependents_count,
            per_dependent_credit: tables.dependent_credit.per_dependent_credit_amount,
            dependent_credit_override: settings.dependent_credit_override,
            extra_withholding: settings.extra_withholding_per_paycheck,
        };
        Ok(federal_withholding_per_paycheck(&inputs))
    }

    fn state_withholding_for(
        &self,
        gross: Decimal,
        taxable_wages: Decimal,
        date: NaiveDate,
        settings: &PayrollSettings,
    ) -> Decimal {
        match &self.state_withholding {
            Some(strategy) => strategy.compute(gross, taxable_wages, settings.filing_status, date),
            None => {
                (taxable_wages * settings.state_withholding_flat_rate / Decimal::ONE_HUNDRED)
                    .max(Decimal::ZERO)
            }
        }
    }

    /// Social Security, Medicare, and additional Medicare for one event.
    ///
    /// Returns (ss withheld, ss-taxed wages, medicare withheld, additional
    /// medicare withheld). Additional Medicare is marginal: only the part of
    /// this event's gross that pushes YTD Medicare wages past the threshold
    /// is taxed, so crossing the threshold mid-paycheck never double-counts.
    fn fica_withholding(
        &self,
        gross: Decimal,
        settings: &PayrollSettings,
        tables: &TaxTableSet,
        ytd: &YtdTotals,
    ) -> Result<(Decimal, Decimal, Decimal, Decimal)> {
        let fica = &tables.fica;

        let wage_base = settings
            .fica
            .ss_wage_base_override
            .unwrap_or(fica.ss_wage_base);
        let ss_taxed = gross.min((wage_base - ytd.ss_taxed_wages).max(Decimal::ZERO));
        let ss_withholding = round_cents(ss_taxed * fica.ss_rate);

        let medicare_withholding = round_cents(gross * fica.medicare_rate);

        let threshold = match settings.fica.additional_medicare_threshold_override {
            Some(value) => value,
            None => tables
                .additional_medicare_threshold_for(settings.filing_status)
                .map_err(Error::TaxTable)?,
        };
        let wages_before = ytd.medicare_wages;
        let wages_after = wages_before + gross;
        let above_threshold = (wages_after - threshold.max(wages_before)).max(Decimal::ZERO);
        let additional = round_cents(above_threshold * fica.additional_medicare_rate);

        Ok((ss_withholding, ss_taxed, medicare_withholding, additional))
    }
}

/// Every pay event from January 1 through the end of `month`, in date order.
/// A bonus sharing a date with a regular check sorts after it.
fn build_year_to_date_events(
    month: MonthId,
    schedule: Cadence,
    anchor: Option<NaiveDate>,
    settings: &PayrollSettings,
) -> Vec<PayEvent> {
    let mut events = Vec::new();
    for m in month.year_to_date() {
        for date in schedule_dates(m, schedule, anchor, None) {
            events.push(PayEvent { date, bonus: None });
        }
    }

    let range_start = month.january().first_day();
    let range_end = month.last_day();
    for bonus in &settings.bonus_events {
        if bonus.date >= range_start && bonus.date <= range_end {
            events.push(PayEvent {
                date: bonus.date,
                bonus: Some(bonus.clone()),
            });
        }
    }

    events.sort_by_key(|e| (e.date, e.bonus.is_some()));
    events
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CENT_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}

impl From<&PaycheckResult> for PaycheckEstimate {
    fn from(result: &PaycheckResult) -> Self {
        PaycheckEstimate {
            date: result.date,
            is_bonus: result.is_bonus,
            net_amount: round_cents(result.net),
        }
    }
}
