//! Gain/loss module - month-over-month and year-to-date deltas.

mod gainloss_model;
mod gainloss_service;

pub use gainloss_model::{ClassifiedDelta, GainLossReport};
pub use gainloss_service::{gain_loss_report, resolve_month_balances};
