use anyhow::Result;
use async_trait::async_trait;
use rand::{Rng, distributions::Alphanumeric};
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{Document, DocumentStore, Fields, validate_document_id};

const AUTO_ID_LEN: usize = 20;

/// In-process document store
/// Maps collection -> documents in insertion order
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in a collection
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }
}

fn auto_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(AUTO_ID_LEN)
        .map(char::from)
        .collect()
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn add_document(&self, collection: &str, fields: Fields) -> Result<String> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        let mut id = auto_id();
        while docs.iter().any(|d| d.id == id) {
            id = auto_id();
        }

        docs.push(Document::new(id.clone(), fields));
        Ok(id)
    }

    async fn set_document(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        validate_document_id(id)?;

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        match docs.iter_mut().find(|d| d.id == id) {
            Some(existing) => existing.fields = fields,
            None => docs.push(Document::new(id, fields)),
        }
        Ok(())
    }

    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
