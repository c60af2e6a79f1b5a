//! Domain layer - cart model, rate calculation services, and the seams
//! (`CarrierStore`, `ShippingRateProvider`) that outer layers implement.

pub mod model;
pub mod provider;
pub mod repository;
pub mod service;

pub use model::{CartItem, CartWeight, Package, Quote, ShippingRate};
pub use provider::ShippingRateProvider;
pub use repository::CarrierStore;
