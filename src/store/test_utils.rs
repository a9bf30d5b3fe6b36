use anyhow::{Result, anyhow};
use async_trait::async_trait;

use super::{Document, DocumentStore, Fields, memory::MemoryStore};

/// Store double whose every call fails, as an unreachable backend would
#[derive(Debug, Default)]
pub struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    async fn add_document(&self, _collection: &str, _fields: Fields) -> Result<String> {
        Err(anyhow!("store unavailable"))
    }

    async fn set_document(&self, _collection: &str, _id: &str, _fields: Fields) -> Result<()> {
        Err(anyhow!("store unavailable"))
    }

    async fn get_document(&self, _collection: &str, _id: &str) -> Result<Option<Document>> {
        Err(anyhow!("store unavailable"))
    }

    async fn list_documents(&self, _collection: &str) -> Result<Vec<Document>> {
        Err(anyhow!("store unavailable"))
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

/// Accepts writes but fails every read
#[derive(Debug, Default)]
pub struct WriteOnlyStore {
    pub inner: MemoryStore,
}

#[async_trait]
impl DocumentStore for WriteOnlyStore {
    async fn add_document(&self, collection: &str, fields: Fields) -> Result<String> {
        self.inner.add_document(collection, fields).await
    }

    async fn set_document(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        self.inner.set_document(collection, id, fields).await
    }

    async fn get_document(&self, _collection: &str, _id: &str) -> Result<Option<Document>> {
        Err(anyhow!("read quota exceeded"))
    }

    async fn list_documents(&self, _collection: &str) -> Result<Vec<Document>> {
        Err(anyhow!("read quota exceeded"))
    }

    fn backend_name(&self) -> &'static str {
        "write-only"
    }
}
