//! Accounts module - domain models for forecastable accounts.

mod accounts_model;

// Re-export the public interface
pub use accounts_model::{Account, AccountType, NewAccount};
