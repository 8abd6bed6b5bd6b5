use serde_json::{Map, Value};
use std::sync::RwLock;

/// A customer is an open field-value mapping; nothing beyond the two
/// required keys is enforced.
pub type CustomerRecord = Map<String, Value>;

const REQUIRED_FIELDS: [&str; 2] = ["name", "address"];

/// Check that a record carries the required fields.
///
/// A field set to JSON `null` counts as missing. Types, emptiness and
/// format are not checked.
pub fn validate(record: &CustomerRecord) -> bool {
    REQUIRED_FIELDS
        .iter()
        .all(|field| matches!(record.get(*field), Some(v) if !v.is_null()))
}

/// Storage abstraction for customer records.
///
/// Identity is positional: a record's id is its index in insertion order.
pub trait CustomerStore: Send + Sync {
    /// All records in insertion order.
    fn list(&self) -> Vec<CustomerRecord>;

    /// Append a record if it validates. Returns false (store unchanged)
    /// otherwise.
    fn save(&self, record: CustomerRecord) -> bool;

    /// Overwrite the record at `id` if that slot is populated and the new
    /// record validates. Returns false (no mutation) otherwise.
    fn update(&self, id: usize, record: CustomerRecord) -> bool;
}

/// In-memory `CustomerStore`.
///
/// Records live behind an `RwLock` so concurrent handlers on a long-lived
/// server share one instance safely. Nothing is persisted.
pub struct MemoryStore {
    records: RwLock<Vec<CustomerRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerStore for MemoryStore {
    fn list(&self) -> Vec<CustomerRecord> {
        self.records.read().expect("store lock poisoned").clone()
    }

    fn save(&self, record: CustomerRecord) -> bool {
        if !validate(&record) {
            return false;
        }
        self.records
            .write()
            .expect("store lock poisoned")
            .push(record);
        true
    }

    fn update(&self, id: usize, record: CustomerRecord) -> bool {
        if !validate(&record) {
            return false;
        }
        let mut records = self.records.write().expect("store lock poisoned");
        match records.get_mut(id) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }
}
