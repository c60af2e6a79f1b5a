//! Priced results handed back to the checkout layer

use serde::{Deserialize, Serialize};
use stackship_types::TaxStatus;

use super::cart::CartWeight;

/// Price of a cart for one carrier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub carrier_id: String,
    pub carrier_name: String,
    pub cart_weight: CartWeight,
    pub billable_weight: f64,
    pub cost: f64,
}

/// A shipping offer attached to checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingRate {
    /// `<method id>:<carrier id>`
    pub id: String,
    pub label: String,
    pub cost: f64,
    pub carrier_id: String,
    pub billable_weight: f64,
    #[serde(default)]
    pub tax_status: TaxStatus,
}
