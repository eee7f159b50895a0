//! In-memory blob store for tests and local runs.

use async_trait::async_trait;
use nimbus_core::Result;
use nimbus_core::ports::{BlobStore, PutOptions, StoredObject};
use std::collections::HashMap;
use std::sync::Mutex;

/// Map-backed store with the same upsert semantics as the hosted one.
#[derive(Default)]
pub struct MemoryBlobStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, payload: Vec<u8>, _opts: &PutOptions) -> Result<StoredObject> {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), payload);
        Ok(StoredObject {
            url: format!("memory://{key}"),
        })
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.objects.lock().unwrap().get(key).cloned())
    }
}
