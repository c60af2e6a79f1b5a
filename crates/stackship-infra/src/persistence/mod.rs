//! Persistence implementations
//!
//! This module provides implementations of the `CarrierStore` trait.

mod memory_carrier_store;
mod option_carrier_store;

pub use memory_carrier_store::MemoryCarrierStore;
pub use option_carrier_store::{OptionCarrierStore, CARRIERS_OPTION};
