use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// StoreError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum StoreError {
    #[error("missing key '{0}'")]
    Missing(String),
}

pub trait Store {
    fn get(&self, key: &str) -> Result<u32, StoreError>;

    fn put(&mut self, key: String, value: u32);

    fn into_len(self) -> usize;
}

///
/// MemoryStore
///

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, u32>,
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<u32, StoreError> {
        self.entries
            .get(key)
            .copied()
            .ok_or_else(|| StoreError::Missing(key.to_string()))
    }

    fn put(&mut self, key: String, value: u32) {
        self.entries.insert(key, value);
    }

    fn into_len(self) -> usize {
        self.entries.len()
    }
}

///
/// Cache
///

#[derive(Debug)]
pub struct Cache {
    pub store: MemoryStore,
    pub capacity: usize,
}

impl Cache {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: MemoryStore::default(),
            capacity,
        }
    }
}

autoimpl::include_generated!("store/cache_impl.rs");
