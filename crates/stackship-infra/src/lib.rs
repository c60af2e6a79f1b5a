//! Infrastructure layer - carrier store implementations and file loaders

pub mod cart_loader;
pub mod carrier_loader;
pub mod persistence;
