//! Keyword and keyword-category records.

use serde::{Deserialize, Serialize};

/// A named grouping of keywords.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordCategory {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub display_order: Option<u32>,
}

/// A keyword, the value source for field migrations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyword {
    pub id: u64,
    pub name: String,
    pub keyword_category_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_fields() {
        let kw: Keyword =
            serde_json::from_str(r#"{"id": 9, "name": "aerial", "keyword_category_id": 2}"#)
                .unwrap();
        assert_eq!(kw.name, "aerial");
        assert_eq!(kw.keyword_category_id, 2);
    }
}
