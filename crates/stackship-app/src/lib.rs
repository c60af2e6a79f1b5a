//! Application service layer - config, carrier administration, checkout rates

pub mod carrier_admin;
pub mod config;
pub mod constants;
pub mod repository;
pub mod shipping_method;
