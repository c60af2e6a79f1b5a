//! Domain services

pub mod dimension_checker;
pub mod quote;
pub mod rate_lookup;
pub mod weight_calculator;

pub use dimension_checker::{check_item_limits, item_fits_limits, DimensionViolation};
pub use quote::{evaluate_carrier, generate_quote_report, quote_carrier, QuoteOutcome};
pub use rate_lookup::lookup_rate;
pub use weight_calculator::{
    billable_weight, compute_cart_weight, compute_item_volumetric_weight, effective_divisor,
};
