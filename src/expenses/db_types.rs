use serde::{Deserialize, Serialize};

use crate::store::{Document, FieldValue, Fields};

/// Expense ready to be written, before the store assigns an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub category: String,
    pub amount: f64,
    pub date: String,
}

impl NewExpense {
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("category".to_string(), FieldValue::String(self.category.clone()));
        fields.insert("amount".to_string(), FieldValue::Double(self.amount));
        fields.insert("date".to_string(), FieldValue::String(self.date.clone()));
        fields
    }

    pub fn into_record(self, id: String) -> ExpenseRecord {
        ExpenseRecord {
            id,
            category: self.category,
            amount: self.amount,
            date: self.date,
        }
    }
}

/// Stored `expenses/{id}` document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: String,
    pub category: String,
    /// NaN serializes as JSON null
    pub amount: f64,
    pub date: String,
}

impl From<Document> for ExpenseRecord {
    fn from(doc: Document) -> Self {
        let category = doc
            .field("category")
            .and_then(FieldValue::as_str)
            .map(str::to_string);
        let amount = doc.field("amount").and_then(FieldValue::as_f64);
        let date = doc
            .field("date")
            .and_then(FieldValue::as_str)
            .map(str::to_string);

        if category.is_none() || amount.is_none() || date.is_none() {
            tracing::warn!("Expense document {} has missing or mistyped fields", doc.id);
        }

        Self {
            id: doc.id,
            category: category.unwrap_or_default(),
            amount: amount.unwrap_or(f64::NAN),
            date: date.unwrap_or_default(),
        }
    }
}
