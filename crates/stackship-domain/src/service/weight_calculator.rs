//! Actual, volumetric and billable weight of a cart

use stackship_types::{CalculationType, DEFAULT_VOLUMETRIC_DIVISOR};
use tracing::debug;

use crate::model::{CartItem, CartWeight};

/// Divisor to use for a configured value; unset or non-positive falls back to the default
pub fn effective_divisor(divisor: Option<f64>) -> f64 {
    match divisor {
        Some(d) if d > 0.0 => d,
        _ => f64::from(DEFAULT_VOLUMETRIC_DIVISOR),
    }
}

/// Volumetric weight (kg) of one cart line
///
/// weight = length x width x effective_height / divisor
///
/// Returns `None` when any dimension is missing or zero.
pub fn compute_item_volumetric_weight(item: &CartItem, divisor: Option<f64>) -> Option<f64> {
    let (length, width, _) = item.dimensions()?;
    let height = item.effective_height()?;
    let volume = length * width * height;
    Some(volume / effective_divisor(divisor))
}

/// Actual and volumetric totals for a cart
///
/// Items without a weight add nothing to `actual`; items without usable
/// dimensions add nothing to `volumetric`.
pub fn compute_cart_weight(items: &[CartItem], divisor: Option<f64>) -> CartWeight {
    let mut total = CartWeight::default();

    for item in items {
        match item.weight {
            Some(w) if w != 0.0 => total.actual += w * f64::from(item.quantity),
            _ => debug!(item = %item.display_name(), "no weight, skipped for actual total"),
        }

        match compute_item_volumetric_weight(item, divisor) {
            Some(v) => total.volumetric += v,
            None => debug!(item = %item.display_name(), "no dimensions, skipped for volumetric total"),
        }
    }

    total
}

/// Weight used for the rate lookup
pub fn billable_weight(cart_weight: &CartWeight, calculation_type: CalculationType) -> f64 {
    match calculation_type {
        CalculationType::Actual => cart_weight.actual,
        CalculationType::Volumetric => cart_weight.volumetric,
        CalculationType::Higher => cart_weight.actual.max(cart_weight.volumetric),
    }
}
