//! Album records.

use serde::{Deserialize, Serialize};

/// Reference to a file contained in an album, in album order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedFileItem {
    pub id: u64,
}

/// An album: a named, ordered collection of files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub locked: Option<bool>,
    #[serde(default)]
    pub files: Vec<NestedFileItem>,
}

impl Album {
    /// The album's file ids in their original order.
    pub fn file_ids(&self) -> Vec<u64> {
        self.files.iter().map(|f| f.id).collect()
    }
}
