//! Built-in defaults

use stackship_types::{CalculationType, Carrier, DimensionLimits, RateBracket};

/// Shipping method id used as the prefix of every rate id
pub const METHOD_ID: &str = "stackable_shipping";

/// Checkout title when none is configured
pub const DEFAULT_METHOD_TITLE: &str = "Standard Shipping";

/// Carrier installed into an empty store
pub fn default_carriers() -> Vec<Carrier> {
    let mut standard = Carrier::new("carrier_1", "Standard Carrier")
        .with_calculation_type(CalculationType::Higher)
        .with_divisor(5000)
        .with_limits(DimensionLimits {
            length_max: 150.0,
            width_max: 100.0,
            height_max: 100.0,
            girth_max: 300.0,
        })
        .with_rates(vec![
            RateBracket::new(0.0, 5.0, 10.0),
            RateBracket::new(5.0, 10.0, 15.0),
            RateBracket::new(10.0, 20.0, 20.0),
            RateBracket::new(20.0, 30.0, 25.0),
        ]);
    standard.description = "Standard carrier for all shipments".to_string();
    vec![standard]
}
