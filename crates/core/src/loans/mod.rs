//! Loans module - loan records and monthly payment application.

mod loans_model;
mod loans_service;

pub use loans_model::{Loan, LoanPaymentRecord};
pub use loans_service::{apply_monthly_payment, month_loan_payment_total};
