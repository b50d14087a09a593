//! Metadata field records.

use crate::config::AppConfig;
use serde::{Deserialize, Serialize};

/// A metadata field definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub id: u64,
    pub name: String,
    /// How the field is rendered: `singleLine`, `multiLine`, `date`,
    /// `option`, `suggestion`, ...
    pub field_display_type: String,
    #[serde(default)]
    pub alive: Option<bool>,
    #[serde(default)]
    pub protected: Option<bool>,
}

impl Field {
    /// Whether the display type shows a single value even though multiple
    /// keyword options get stored underneath. Mutating such a field is
    /// gated behind an interactive confirmation.
    pub fn is_restricted(&self) -> bool {
        AppConfig::RESTRICTED_DISPLAY_TYPES
            .iter()
            .any(|t| *t == self.field_display_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(display_type: &str) -> Field {
        Field {
            id: 1,
            name: "Caption".into(),
            field_display_type: display_type.into(),
            alive: None,
            protected: None,
        }
    }

    #[test]
    fn test_restricted_display_types() {
        assert!(field("option").is_restricted());
        assert!(field("suggestion").is_restricted());
        assert!(!field("singleLine").is_restricted());
        assert!(!field("multiLine").is_restricted());
    }
}
