//! Tax table reference data.
//!
//! Tables are supplied externally as JSON (user-imported estimates, not
//! authoritative tax data) and are immutable once loaded. The field names
//! below follow the import format; `validate` enforces the structural
//! preconditions the payroll engine relies on, so the engine itself never
//! has to guess defaults for required figures.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::payroll_model::FilingStatus;

/// Structural faults in imported tax table data. These are configuration
/// faults: the caller is expected to surface them and prompt for a valid
/// table rather than proceed.
#[derive(Error, Debug)]
pub enum TaxTableError {
    #[error("No tax data for filing status '{status:?}' in '{section}'")]
    MissingFilingStatus {
        status: FilingStatus,
        section: &'static str,
    },

    #[error("Bracket table for filing status '{0:?}' is empty")]
    EmptyBrackets(FilingStatus),

    #[error("Bracket table for '{status:?}' is malformed: {detail}")]
    MalformedBrackets {
        status: FilingStatus,
        detail: String,
    },

    #[error("Field '{field}' has invalid value: {detail}")]
    InvalidField { field: &'static str, detail: String },

    #[error("Required field '{0}' is missing")]
    MissingField(&'static str),
}

/// One federal income tax bracket. `upper_bound = None` marks the unbounded
/// top bracket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaxBracket {
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependentCredit {
    pub per_dependent_credit_amount: Decimal,
}

/// Additional-Medicare threshold: a single figure or one per filing status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MedicareThreshold {
    Flat(Decimal),
    PerFilingStatus(HashMap<FilingStatus, Decimal>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FicaConfig {
    pub ss_rate: Decimal,
    pub medicare_rate: Decimal,
    pub ss_wage_base: Decimal,
    pub additional_medicare_rate: Decimal,
    pub additional_medicare_threshold: MedicareThreshold,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementLimits {
    pub k401_employee_max: Decimal,
    pub k401_catch_up_max: Decimal,
}

/// A full year's tax reference data, keyed by filing status where the law
/// differentiates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxTableSet {
    pub tax_year: i32,
    pub schema_version: u32,
    pub federal_income_tax_brackets: HashMap<FilingStatus, Vec<TaxBracket>>,
    pub standard_deduction: HashMap<FilingStatus, Decimal>,
    pub dependent_credit: DependentCredit,
    #[serde(default)]
    pub federal_supplemental_withholding_rate: Option<Decimal>,
    pub fica: FicaConfig,
    pub retirement: RetirementLimits,
}

impl TaxTableSet {
    /// Parses and validates an imported tax table document.
    pub fn from_json(raw: &str) -> crate::Result<TaxTableSet> {
        let table: TaxTableSet = serde_json::from_str(raw)?;
        table.validate()?;
        Ok(table)
    }

    /// Enforces the structural invariants the payroll engine assumes:
    /// non-empty bracket tables that are contiguous, non-overlapping, and
    /// end in a single unbounded top bracket; rates within [0, 1]; no
    /// negative amounts.
    pub fn validate(&self) -> Result<(), TaxTableError> {
        if self.federal_income_tax_brackets.is_empty() {
            return Err(TaxTableError::MissingField("federal_income_tax_brackets"));
        }

        for (status, brackets) in &self.federal_income_tax_brackets {
            validate_brackets(*status, brackets)?;
        }

        for (status, deduction) in &self.standard_deduction {
            if deduction.is_sign_negative() {
                return Err(TaxTableError::InvalidField {
                    field: "standard_deduction",
                    detail: format!("negative amount for '{:?}'", status),
                });
            }
        }

        non_negative("dependent_credit.per_dependent_credit_amount", self.dependent_credit.per_dependent_credit_amount)?;
        if let Some(rate) = self.federal_supplemental_withholding_rate {
            valid_rate("federal_supplemental_withholding_rate", rate)?;
        }

        valid_rate("fica.ss_rate", self.fica.ss_rate)?;
        valid_rate("fica.medicare_rate", self.fica.medicare_rate)?;
        valid_rate("fica.additional_medicare_rate", self.fica.additional_medicare_rate)?;
        non_negative("fica.ss_wage_base", self.fica.ss_wage_base)?;
        match &self.fica.additional_medicare_threshold {
            MedicareThreshold::Flat(value) => {
                non_negative("fica.additional_medicare_threshold", *value)?
            }
            MedicareThreshold::PerFilingStatus(map) => {
                if map.is_empty() {
                    return Err(TaxTableError::MissingField(
                        "fica.additional_medicare_threshold",
                    ));
                }
                for value in map.values() {
                    non_negative("fica.additional_medicare_threshold", *value)?;
                }
            }
        }

        non_negative("retirement.k401_employee_max", self.retirement.k401_employee_max)?;
        non_negative("retirement.k401_catch_up_max", self.retirement.k401_catch_up_max)?;

        Ok(())
    }

    pub fn brackets_for(&self, status: FilingStatus) -> Result<&[TaxBracket], TaxTableError> {
        self.federal_income_tax_brackets
            .get(&status)
            .map(|b| b.as_slice())
            .ok_or(TaxTableError::MissingFilingStatus {
                status,
                section: "federal_income_tax_brackets",
            })
    }

    pub fn standard_deduction_for(&self, status: FilingStatus) -> Result<Decimal, TaxTableError> {
        self.standard_deduction
            .get(&status)
            .copied()
            .ok_or(TaxTableError::MissingFilingStatus {
                status,
                section: "standard_deduction",
            })
    }

    /// Supplemental flat rate, required only when a bonus uses the
    /// supplemental-flat method.
    pub fn supplemental_rate(&self) -> Result<Decimal, TaxTableError> {
        self.federal_supplemental_withholding_rate
            .ok_or(TaxTableError::MissingField(
                "federal_supplemental_withholding_rate",
            ))
    }

    pub fn additional_medicare_threshold_for(
        &self,
        status: FilingStatus,
    ) -> Result<Decimal, TaxTableError> {
        match &self.fica.additional_medicare_threshold {
            MedicareThreshold::Flat(value) => Ok(*value),
            MedicareThreshold::PerFilingStatus(map) => {
                map.get(&status)
                    .copied()
                    .ok_or(TaxTableError::MissingFilingStatus {
                        status,
                        section: "fica.additional_medicare_threshold",
                    })
            }
        }
    }
}

fn validate_brackets(status: FilingStatus, brackets: &[TaxBracket]) -> Result<(), TaxTableError> {
    if brackets.is_empty() {
        return Err(TaxTableError::EmptyBrackets(status));
    }

    let mut expected_lower = Decimal::ZERO;
    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.rate.is_sign_negative() || bracket.rate > Decimal::ONE {
            return Err(TaxTableError::MalformedBrackets {
                status,
                detail: format!("rate out of range at index {}", index),
            });
        }
        if bracket.lower_bound != expected_lower {
            return Err(TaxTableError::MalformedBrackets {
                status,
                detail: format!(
                    "bracket at index {} starts at {} but previous ends at {}",
                    index, bracket.lower_bound, expected_lower
                ),
            });
        }
        match bracket.upper_bound {
            Some(upper) if upper <= bracket.lower_bound => {
                return Err(TaxTableError::MalformedBrackets {
                    status,
                    detail: format!("empty bracket at index {}", index),
                });
            }
            Some(upper) => expected_lower = upper,
            None => {
                if index != brackets.len() - 1 {
                    return Err(TaxTableError::MalformedBrackets {
                        status,
                        detail: format!("unbounded bracket at index {} is not last", index),
                    });
                }
            }
        }
    }

    if brackets[brackets.len() - 1].upper_bound.is_some() {
        return Err(TaxTableError::MalformedBrackets {
            status,
            detail: "top bracket must be unbounded".to_string(),
        });
    }

    Ok(())
}

fn valid_rate(field: &'static str, rate: Decimal) -> Result<(), TaxTableError> {
    if rate.is_sign_negative() || rate > Decimal::ONE {
        return Err(TaxTableError::InvalidField {
            field,
            detail: format!("rate {} out of [0, 1]", rate),
        });
    }
    Ok(())
}

fn non_negative(field: &'static str, value: Decimal) -> Result<(), TaxTableError> {
    if value.is_sign_negative() {
        return Err(TaxTableError::InvalidField {
            field,
            detail: format!("negative value {}", value),
        });
    }
    Ok(())
}
