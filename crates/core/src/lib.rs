//! Flowcast Core - cash-flow forecasting domain entities and services.
//!
//! This crate contains the deterministic computation pipeline that turns
//! declarative configuration (recurring items, paycheck schedules, payroll
//! tax settings, one-off adjustments) into dated transactions and daily
//! balance projections. It is storage-agnostic and performs no I/O; callers
//! hand it fully-resolved inputs and persist what it returns.

pub mod accounts;
pub mod categories;
pub mod constants;
pub mod errors;
pub mod forecast;
pub mod gainloss;
pub mod loans;
pub mod months;
pub mod payroll;
pub mod recurring;
pub mod schedule;
pub mod transactions;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
