//! Checkout-facing rate provider seam

use stackship_types::Result;

use crate::model::{Package, ShippingRate};

/// Produces the shipping offers for a checkout package.
///
/// Invoked by the checkout orchestrator once per rate-calculation pass.
pub trait ShippingRateProvider {
    fn calculate(&self, package: &Package) -> Result<Vec<ShippingRate>>;

    /// Whether any offer exists for the package
    fn is_available(&self, package: &Package) -> Result<bool> {
        Ok(!self.calculate(package)?.is_empty())
    }
}
