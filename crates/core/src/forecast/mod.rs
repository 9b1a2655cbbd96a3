//! Forecast module - daily balance projection for a month.

mod forecast_model;
mod forecast_service;

pub use forecast_model::ForecastPoint;
pub use forecast_service::calculate_forecast;
