//! Months module - month identifiers, per-month setup, and snapshots.

mod months_model;


pub use months_model::{
    DepositSplit, MonthId, MonthSetup, MonthSnapshot, OneOff, PaycheckEstimate, PaycheckOverride,
};
