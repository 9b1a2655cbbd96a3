//! Federal withholding calculator.
//!
//! Annualizes one paycheck's taxable wages, applies progressive bracket
//! taxation, subtracts dependent credits, and divides back to a per-paycheck
//! figure. Pure functions; the caller supplies validated bracket data.

use rust_decimal::Decimal;

use super::tax_tables::TaxBracket;

/// Inputs for one paycheck's federal withholding.
#[derive(Debug, Clone)]
pub struct WithholdingInputs<'a> {
    /// Taxable wages for this paycheck (gross minus pre-tax deductions).
    pub taxable_wages: Decimal,
    pub periods_per_year: u32,
    /// Ordered, contiguous, non-overlapping brackets; last is unbounded.
    pub brackets: &'a [TaxBracket],
    pub standard_deduction: Decimal,
    pub other_income_annual: Decimal,
    pub deductions_annual: Decimal,
    pub dependents_count: u32,
    pub per_dependent_credit: Decimal,
    /// Replaces `dependents_count x per_dependent_credit` when set.
    pub dependent_credit_override: Option<Decimal>,
    /// Flat extra withholding added after all other math.
    pub extra_withholding: Decimal,
}

/// Annual tax on `income` under marginal bracket math: each bracket taxes
/// only the slice of income between its bounds. A dollar at a boundary is
/// taxed at the lower rate up to the boundary and the higher rate beyond it,
/// never by a single rate lookup.
pub fn progressive_tax(brackets: &[TaxBracket], income: Decimal) -> Decimal {
    let mut tax = Decimal::ZERO;
    for bracket in brackets {
        let floor = bracket.lower_bound;
        let ceiling = bracket.upper_bound.unwrap_or(Decimal::MAX).min(income);
        if ceiling > floor {
            tax += (ceiling - floor) * bracket.rate;
        }
    }
    tax
}

/// One paycheck's federal withholding per the annualized method.
pub fn federal_withholding_per_paycheck(inputs: &WithholdingInputs<'_>) -> Decimal {
    let periods = Decimal::from(inputs.periods_per_year.max(1));

    let annual_wages = inputs.taxable_wages * periods + inputs.other_income_annual;
    let annual_taxable =
        (annual_wages - inputs.standard_deduction - inputs.deductions_annual).max(Decimal::ZERO);

    let annual_tax = progressive_tax(inputs.brackets, annual_taxable);

    let credit = inputs
        .dependent_credit_override
        .unwrap_or(Decimal::from(inputs.dependents_count) * inputs.per_dependent_credit);
    let annual_after_credit = (annual_tax - credit).max(Decimal::ZERO);

    let per_paycheck = annual_after_credit / periods + inputs.extra_withholding;
    per_paycheck.max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn bracket(lower: Decimal, upper: Option<Decimal>, rate: Decimal) -> TaxBracket {
        TaxBracket {
            lower_bound: lower,
            upper_bound: upper,
            rate,
        }
    }

    fn two_brackets() -> Vec<TaxBracket> {
        vec![
            bracket(dec!(0), Some(dec!(10000)), dec!(0.10)),
            bracket(dec!(10000), None, dec!(0.20)),
        ]
    }

    fn inputs<'a>(taxable: Decimal, brackets: &'a [TaxBracket]) -> WithholdingInputs<'a> {
        WithholdingInputs {
            taxable_wages: taxable,
            periods_per_year: 12,
            brackets,
            standard_deduction: Decimal::ZERO,
            other_income_annual: Decimal::ZERO,
            deductions_annual: Decimal::ZERO,
            dependents_count: 0,
            per_dependent_credit: Decimal::ZERO,
            dependent_credit_override: None,
            extra_withholding: Decimal::ZERO,
        }
    }

    #[test]
    fn test_progressive_tax_is_marginal_not_flat() {
        // 10000 at 10% + 5000 at 20% = 2000, not 15000 * 0.20 = 3000
        let tax = progressive_tax(&two_brackets(), dec!(15000));
        assert_eq!(tax, dec!(2000.00));
    }

    #[test]
    fn test_progressive_tax_boundary_dollar() {
        let brackets = two_brackets();
        assert_eq!(progressive_tax(&brackets, dec!(10000)), dec!(1000.00));
        assert_eq!(progressive_tax(&brackets, dec!(10001)), dec!(1000.20));
    }

    #[test]
    fn test_progressive_tax_zero_income() {
        assert_eq!(progressive_tax(&two_brackets(), dec!(0)), dec!(0));
    }

    #[test]
    fn test_annualization_round_trip() {
        // 1000/month -> 12000 annual -> 1000*0.10 tax... with the two-bracket
        // table: 10000*0.10 + 2000*0.20 = 1400, per paycheck 116.66..
        let brackets = two_brackets();
        let result = federal_withholding_per_paycheck(&inputs(dec!(1000), &brackets));
        assert_eq!(result.round_dp(2), dec!(116.67));
    }

    #[test]
    fn test_standard_deduction_floors_at_zero() {
        let brackets = two_brackets();
        let mut i = inputs(dec!(100), &brackets);
        i.standard_deduction = dec!(50000);
        assert_eq!(federal_withholding_per_paycheck(&i), dec!(0));
    }

    #[test]
    fn test_dependent_credit_reduces_and_floors() {
        let brackets = two_brackets();
        let mut i = inputs(dec!(1000), &brackets);
        i.dependents_count = 2;
        i.per_dependent_credit = dec!(2000);
        // Annual tax 1400 - 4000 credit floors at zero
        assert_eq!(federal_withholding_per_paycheck(&i), dec!(0));
    }

    #[test]
    fn test_dependent_credit_override_takes_precedence() {
        let brackets = two_brackets();
        let mut i = inputs(dec!(1000), &brackets);
        i.dependents_count = 2;
        i.per_dependent_credit = dec!(2000);
        i.dependent_credit_override = Some(dec!(200));
        // (1400 - 200) / 12 = 100
        assert_eq!(
            federal_withholding_per_paycheck(&i).round_dp(2),
            dec!(100.00)
        );
    }

    #[test]
    fn test_extra_withholding_added_last() {
        let brackets = two_brackets();
        let mut i = inputs(dec!(0), &brackets);
        i.extra_withholding = dec!(25);
        assert_eq!(federal_withholding_per_paycheck(&i), dec!(25));
    }

    #[test]
    fn test_other_income_and_deductions() {
        let brackets = two_brackets();
        let mut i = inputs(dec!(1000), &brackets);
        i.other_income_annual = dec!(3000);
        i.deductions_annual = dec!(5000);
        // Annual taxable = 12000 + 3000 - 5000 = 10000 -> tax 1000
        assert_eq!(
            federal_withholding_per_paycheck(&i).round_dp(2),
            dec!(83.33)
        );
    }

    proptest! {
        #[test]
        fn prop_progressive_tax_monotonic(
            a in 0u64..500_000,
            b in 0u64..500_000,
        ) {
            let brackets = two_brackets();
            let (low, high) = (a.min(b), a.max(b));
            let tax_low = progressive_tax(&brackets, Decimal::from(low));
            let tax_high = progressive_tax(&brackets, Decimal::from(high));
            prop_assert!(tax_low <= tax_high);
        }

        #[test]
        fn prop_effective_rate_below_top_marginal(income in 1u64..1_000_000) {
            let brackets = two_brackets();
            let tax = progressive_tax(&brackets, Decimal::from(income));
            prop_assert!(tax <= Decimal::from(income) * dec!(0.20));
        }
    }
}
