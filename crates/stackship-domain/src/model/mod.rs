//! Domain model types

pub mod cart;
pub mod shipping_rate;

pub use cart::{CartItem, CartWeight, Package};
pub use shipping_rate::{Quote, ShippingRate};
