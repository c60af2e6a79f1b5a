//! Repository adapters for persistence layer

use stackship_infra::persistence::OptionCarrierStore;
use stackship_types::Result;

use crate::config::Config;

/// Open the file-based carrier store from config
pub fn open_carrier_store(config: &Config) -> Result<OptionCarrierStore> {
    let store_dir = config.store_dir()?;
    OptionCarrierStore::open(store_dir)
}
