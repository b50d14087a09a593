//! File asset records, the mutation target of the migration pipeline.

use serde::{Deserialize, Serialize};

/// A field value attached to a file: the field id plus its stored values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    pub id: u64,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Reference to a keyword associated with a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedKeywordItem {
    pub id: u64,
}

/// A file asset with its field values and keyword associations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAsset {
    pub id: u64,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldValue>,
    #[serde(default)]
    pub keywords: Vec<NestedKeywordItem>,
}

impl FileAsset {
    /// Build a minimal update record carrying one field value.
    pub fn with_field_value(id: u64, field_id: u64, value: impl Into<String>) -> Self {
        Self {
            id,
            filename: None,
            fields: vec![FieldValue {
                id: field_id,
                values: vec![value.into()],
            }],
            keywords: Vec::new(),
        }
    }

    /// First stored value for the given field, if any.
    pub fn field_value(&self, field_id: u64) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.id == field_id)
            .and_then(|f| f.values.first())
            .map(String::as_str)
    }

    /// Replace (or attach) the value stored for the given field.
    pub fn set_field_value(&mut self, field_id: u64, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|f| f.id == field_id) {
            Some(existing) => existing.values = vec![value],
            None => self.fields.push(FieldValue {
                id: field_id,
                values: vec![value],
            }),
        }
    }
}
