//! Transactions module - concrete dated cash movements and their generation.

mod generator;
mod source_key;
mod transactions_model;


// Re-export the public interface
pub use generator::{generate_month_transactions, GeneratedMonth, GenerationMode};
pub use source_key::SourceKey;
pub use transactions_model::{Transaction, TransactionSource};
