//! Checkout shipping method
//!
//! Adapts the rate calculator to the checkout pipeline: every enabled carrier
//! that can price the package becomes one shipping rate.

use stackship_domain::model::{CartItem, Package, ShippingRate};
use stackship_domain::repository::CarrierStore;
use stackship_domain::service::{evaluate_carrier, QuoteOutcome};
use stackship_domain::ShippingRateProvider;
use stackship_types::{Result, TaxStatus};
use tracing::debug;

use crate::constants::{DEFAULT_METHOD_TITLE, METHOD_ID};

/// Shipping method backed by a carrier store
pub struct StackableShippingMethod<S: CarrierStore> {
    store: S,
    title: String,
    tax_status: TaxStatus,
}

impl<S: CarrierStore> StackableShippingMethod<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            title: DEFAULT_METHOD_TITLE.to_string(),
            tax_status: TaxStatus::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_tax_status(mut self, tax_status: TaxStatus) -> Self {
        self.tax_status = tax_status;
        self
    }

    /// Title shown at checkout
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tax_status(&self) -> TaxStatus {
        self.tax_status
    }

    /// Rate id for a carrier, `stackable_shipping:<carrier_id>`
    pub fn rate_id(carrier_id: &str) -> String {
        if carrier_id.is_empty() {
            METHOD_ID.to_string()
        } else {
            format!("{}:{}", METHOD_ID, carrier_id)
        }
    }

    /// Outcome for every enabled carrier, in store order
    pub fn quote_all(&self, items: &[CartItem]) -> Result<Vec<QuoteOutcome>> {
        Ok(self
            .store
            .list_enabled()?
            .iter()
            .map(|carrier| evaluate_carrier(carrier, items))
            .collect())
    }

    /// Outcome for one carrier; `None` when no carrier has that id
    pub fn quote_carrier(&self, carrier_id: &str, items: &[CartItem]) -> Result<Option<QuoteOutcome>> {
        Ok(self
            .store
            .get(carrier_id)?
            .map(|carrier| evaluate_carrier(&carrier, items)))
    }

    /// Shipping cost for one carrier; `None` when unknown or unavailable
    pub fn calculate_shipping_cost(&self, carrier_id: &str, items: &[CartItem]) -> Result<Option<f64>> {
        Ok(self
            .quote_carrier(carrier_id, items)?
            .and_then(QuoteOutcome::into_quote)
            .map(|q| q.cost))
    }
}

impl<S: CarrierStore> ShippingRateProvider for StackableShippingMethod<S> {
    fn calculate(&self, package: &Package) -> Result<Vec<ShippingRate>> {
        if package.is_empty() {
            return Ok(Vec::new());
        }

        let rates: Vec<ShippingRate> = self
            .quote_all(&package.items)?
            .into_iter()
            .filter_map(QuoteOutcome::into_quote)
            .map(|quote| ShippingRate {
                id: Self::rate_id(&quote.carrier_id),
                label: quote.carrier_name,
                cost: quote.cost,
                carrier_id: quote.carrier_id,
                billable_weight: quote.billable_weight,
                tax_status: self.tax_status,
            })
            .collect();

        debug!(count = rates.len(), items = package.items.len(), "calculated shipping rates");
        Ok(rates)
    }
}
