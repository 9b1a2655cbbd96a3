//! Payroll module - withholding math and the year-to-date paycheck engine.

mod payroll_model;
mod payroll_service;
mod payroll_traits;
mod tax_tables;
mod withholding;


// Re-export the public interface
pub use payroll_model::{
    BenefitSettings, BonusEvent, BonusMethod, FicaSettings, FilingStatus, K401ContributionMode,
    K401Settings, PaycheckResult, PayrollSettings, YtdTotals,
};
pub use payroll_service::PayrollService;
pub use payroll_traits::{FlatRateStateWithholding, StateWithholdingStrategy};
pub use tax_tables::{
    DependentCredit, FicaConfig, MedicareThreshold, RetirementLimits, TaxBracket, TaxTableError,
    TaxTableSet,
};
pub use withholding::{federal_withholding_per_paycheck, progressive_tax, WithholdingInputs};
