use serde::{Deserialize, Serialize};

use crate::store::{Document, FieldValue, Fields};

/// `budgets/{category}` document; the category is the document id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRecord {
    pub category: String,
    pub amount: f64,
}

impl BudgetRecord {
    /// Only the amount is stored, the category lives in the key
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("amount".to_string(), FieldValue::Double(self.amount));
        fields
    }
}

impl From<Document> for BudgetRecord {
    fn from(doc: Document) -> Self {
        let amount = doc.field("amount").and_then(FieldValue::as_f64);
        if amount.is_none() {
            tracing::warn!("Budget document {} has no numeric amount", doc.id);
        }

        Self {
            category: doc.id,
            amount: amount.unwrap_or(f64::NAN),
        }
    }
}
