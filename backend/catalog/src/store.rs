//! Scan persistence.
//!
//! MOCK: in-memory map only; nothing durable is wired up. The API shape is
//! what a real store would expose.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;
use uuid::Uuid;

use beanscan_core::{BeanScanError, ScanRecord};

#[derive(Default)]
pub struct ScanStore {
    scans: Mutex<HashMap<Uuid, ScanRecord>>,
}

impl ScanStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: ScanRecord) -> Result<(), BeanScanError> {
        let mut scans = self
            .scans
            .lock()
            .map_err(|_| BeanScanError::StorageError("scan store poisoned".into()))?;
        debug!(id = %record.id, "recording scan");
        scans.insert(record.id, record);
        Ok(())
    }

    pub fn get(&self, id: &Uuid) -> Option<ScanRecord> {
        self.scans.lock().ok()?.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.scans.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beanscan_core::{CoffeeExtraction, ProcessingMethod};
    use chrono::Utc;

    fn record() -> ScanRecord {
        ScanRecord {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            extraction: CoffeeExtraction::default(),
            confidence: 0.7,
            processing_method: ProcessingMethod::VisionLlm,
        }
    }

    #[test]
    fn insert_then_get() {
        let store = ScanStore::new();
        let r = record();
        let id = r.id;
        store.insert(r).unwrap();
        assert_eq!(store.get(&id).unwrap().id, id);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_missing_is_none() {
        let store = ScanStore::new();
        assert!(store.get(&Uuid::new_v4()).is_none());
        assert!(store.is_empty());
    }
}
