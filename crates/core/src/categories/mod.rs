//! Categories module - income/expense/transfer classification.

mod categories_model;

pub use categories_model::{Category, CategoryType};
