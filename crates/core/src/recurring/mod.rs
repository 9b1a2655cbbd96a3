//! Recurring items module - rule definitions consumed by generation.

mod recurring_model;

pub use recurring_model::{Cadence, DayRule, RecurringItem};
