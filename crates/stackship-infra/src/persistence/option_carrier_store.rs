//! Carrier store backed by the option store
//!
//! The whole carrier list lives under one option as a JSON array.

use std::path::PathBuf;

use serde_json::Value;
use stackship_domain::repository::CarrierStore;
use stackship_store::OptionStore;
use stackship_types::{Carrier, Error, Result};
use tracing::{info, warn};

/// Option name holding the carrier list
pub const CARRIERS_OPTION: &str = "stackable_shipping_carriers";

/// `CarrierStore` persisting to an `OptionStore` file
pub struct OptionCarrierStore {
    options: OptionStore,
}

impl OptionCarrierStore {
    /// Create or load a carrier store in `store_dir`
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        Ok(Self {
            options: OptionStore::open(store_dir)?,
        })
    }

    pub fn from_options(options: OptionStore) -> Self {
        Self { options }
    }

    /// Location of the backing options file
    pub fn path(&self) -> &std::path::Path {
        self.options.path()
    }

    fn load(&self) -> Result<Vec<Carrier>> {
        match self.options.get_raw(CARRIERS_OPTION) {
            None => Ok(Vec::new()),
            Some(Value::Array(_)) => Ok(self
                .options
                .get_option::<Vec<Carrier>>(CARRIERS_OPTION)?
                .unwrap_or_default()),
            Some(_) => {
                warn!(option = CARRIERS_OPTION, "stored carriers are not a list, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn write(&mut self, carriers: &[Carrier]) -> Result<bool> {
        self.options.update_option(CARRIERS_OPTION, &carriers)
    }
}

impl CarrierStore for OptionCarrierStore {
    fn get(&self, id: &str) -> std::result::Result<Option<Carrier>, Error> {
        Ok(self.load()?.into_iter().find(|c| c.id == id))
    }

    fn list(&self) -> std::result::Result<Vec<Carrier>, Error> {
        self.load()
    }

    fn save(&mut self, carrier: &Carrier) -> std::result::Result<(), Error> {
        let mut carriers = self.load()?;
        match carriers.iter_mut().find(|c| c.id == carrier.id) {
            Some(existing) => *existing = carrier.clone(),
            None => carriers.push(carrier.clone()),
        }
        let changed = self.write(&carriers)?;
        info!(carrier = %carrier.id, changed, "saved carrier");
        Ok(())
    }

    fn delete(&mut self, id: &str) -> std::result::Result<bool, Error> {
        let mut carriers = self.load()?;
        let Some(index) = carriers.iter().position(|c| c.id == id) else {
            return Ok(false);
        };
        carriers.remove(index);
        self.write(&carriers)?;
        info!(carrier = id, "deleted carrier");
        Ok(true)
    }
}
