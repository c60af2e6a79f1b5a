//! Repository trait definitions for carrier persistence

use stackship_types::{Carrier, Error};

/// Repository for carrier definitions
///
/// Carriers are kept as one ordered list. Implementations are read-then-write
/// with no transactional guarantee: concurrent writers race and the last write wins.
pub trait CarrierStore {
    /// Find a carrier by its id
    fn get(&self, id: &str) -> Result<Option<Carrier>, Error>;

    /// All carriers in stored order
    fn list(&self) -> Result<Vec<Carrier>, Error>;

    /// Enabled carriers in stored order
    fn list_enabled(&self) -> Result<Vec<Carrier>, Error> {
        Ok(self.list()?.into_iter().filter(|c| c.enabled).collect())
    }

    /// Replace the carrier with the same id in place, or append it
    fn save(&mut self, carrier: &Carrier) -> Result<(), Error>;

    /// Remove a carrier. Returns whether one was removed.
    fn delete(&mut self, id: &str) -> Result<bool, Error>;
}
