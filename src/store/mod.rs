pub mod firestore;
pub mod memory;
#[cfg(test)]
pub mod test_utils;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const EXPENSES_COLLECTION: &str = "expenses";
pub const BUDGETS_COLLECTION: &str = "budgets";

/// A single typed field of a stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    String(String),
    Double(f64),
    Integer(i64),
    Boolean(bool),
    Timestamp(String),
    Null,
    /// Any value kind this crate never writes (maps, arrays, references...).
    Other(serde_json::Value),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the field. Integers widen to f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Double(v) => Some(*v),
            FieldValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }
}

pub type Fields = BTreeMap<String, FieldValue>;

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

/// Interface to the hosted document database acting as system of record.
///
/// Implementations do not retry, cache or de-duplicate; every call is a
/// single round trip.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Add a new document under a store-assigned id and return that id
    async fn add_document(&self, collection: &str, fields: Fields) -> Result<String>;

    /// Create or fully replace the document with the given id
    async fn set_document(&self, collection: &str, id: &str, fields: Fields) -> Result<()>;

    /// Fetch one document, `None` when it does not exist
    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Fetch every document of a collection in whatever order the store returns them
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>>;

    /// Short label used in logs
    fn backend_name(&self) -> &'static str;
}

/// Caller-chosen id that cannot address a document
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidDocumentId(pub String);

impl fmt::Display for InvalidDocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid document id: {}", self.0)
    }
}

impl std::error::Error for InvalidDocumentId {}

/// Checks that a caller-chosen id can address a document.
pub fn validate_document_id(id: &str) -> Result<()> {
    let problem = if id.is_empty() {
        "id cannot be empty"
    } else if id == "." || id == ".." {
        "id cannot be '.' or '..'"
    } else if id.contains('/') {
        "id cannot contain '/'"
    } else if id.len() >= 4 && id.starts_with("__") && id.ends_with("__") {
        "id cannot match __.*__"
    } else if id.len() > 1500 {
        "id exceeds 1500 bytes"
    } else {
        return Ok(());
    };
    Err(InvalidDocumentId(problem.to_string()).into())
}
