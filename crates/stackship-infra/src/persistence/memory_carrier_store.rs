//! In-memory carrier store

use stackship_domain::repository::CarrierStore;
use stackship_types::{Carrier, Error};

/// `CarrierStore` over a plain list, for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryCarrierStore {
    carriers: Vec<Carrier>,
}

impl MemoryCarrierStore {
    pub fn new(carriers: Vec<Carrier>) -> Self {
        Self { carriers }
    }

    pub fn len(&self) -> usize {
        self.carriers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carriers.is_empty()
    }
}

impl CarrierStore for MemoryCarrierStore {
    fn get(&self, id: &str) -> Result<Option<Carrier>, Error> {
        Ok(self.carriers.iter().find(|c| c.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<Carrier>, Error> {
        Ok(self.carriers.clone())
    }

    fn save(&mut self, carrier: &Carrier) -> Result<(), Error> {
        match self.carriers.iter_mut().find(|c| c.id == carrier.id) {
            Some(existing) => *existing = carrier.clone(),
            None => self.carriers.push(carrier.clone()),
        }
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<bool, Error> {
        let before = self.carriers.len();
        if let Some(index) = self.carriers.iter().position(|c| c.id == id) {
            self.carriers.remove(index);
        }
        Ok(self.carriers.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_get_delete() {
        let mut store = MemoryCarrierStore::default();
        store.save(&Carrier::new("a", "Alpha")).unwrap();
        store.save(&Carrier::new("a", "Alpha 2")).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a").unwrap().unwrap().name, "Alpha 2");
        assert!(store.delete("a").unwrap());
        assert!(store.is_empty());
    }
}
