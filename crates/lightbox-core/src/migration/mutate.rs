//! Per-batch field mutation.

use super::InsertMode;
use crate::error::Result;
use crate::network::AssetService;
use crate::nouns::{Field, FileAsset, Keyword};
use crate::query::QueryOptions;
use crate::response::Classified;

/// Keyword names joined by the separator — the value written into the field.
pub(crate) fn derived_value(keywords: &[Keyword], separator: &str) -> String {
    keywords
        .iter()
        .map(|k| k.name.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Applies the keyword-derived value to the target field for one batch of
/// files and submits the update as a single request.
pub struct FieldMutator<'a> {
    service: &'a dyn AssetService,
    field_id: u64,
    separator: String,
    mode: InsertMode,
    value: String,
}

impl<'a> FieldMutator<'a> {
    pub fn new(
        service: &'a dyn AssetService,
        field: &Field,
        keywords: &[Keyword],
        separator: &str,
        mode: InsertMode,
    ) -> Self {
        Self {
            service,
            field_id: field.id,
            separator: separator.to_string(),
            mode,
            value: derived_value(keywords, separator),
        }
    }

    /// The joined keyword value this mutator writes.
    pub fn derived(&self) -> &str {
        &self.value
    }

    /// Build and submit the update for one batch. The classified response is
    /// returned for the caller to act on.
    pub async fn apply(&self, batch: &[u64]) -> Result<Classified> {
        let payload = self.payload(batch).await?;
        self.service.update_files(&payload).await
    }

    async fn payload(&self, batch: &[u64]) -> Result<Vec<FileAsset>> {
        match self.mode {
            InsertMode::Overwrite => Ok(batch
                .iter()
                .map(|id| FileAsset::with_field_value(*id, self.field_id, self.value.clone()))
                .collect()),
            InsertMode::Append => {
                // Append needs the current field values, fetched once per batch.
                let ids: Vec<String> = batch.iter().map(u64::to_string).collect();
                let mut options = QueryOptions::new();
                options.add_option("id", ids.join(","));
                options.add_option("limit", "0");
                let existing = self.service.get_files(&options).await?;

                Ok(batch
                    .iter()
                    .map(|id| {
                        let current = existing
                            .iter()
                            .find(|f| f.id == *id)
                            .and_then(|f| f.field_value(self.field_id));
                        let value = match current {
                            Some(current) if !current.is_empty() => {
                                format!("{}{}{}", current, self.separator, self.value)
                            }
                            _ => self.value.clone(),
                        };
                        FileAsset::with_field_value(*id, self.field_id, value)
                    })
                    .collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::FakeService;
    use super::*;
    use crate::nouns::FieldValue;

    fn keywords() -> Vec<Keyword> {
        vec![
            Keyword {
                id: 1,
                name: "aerial".into(),
                keyword_category_id: 2,
            },
            Keyword {
                id: 2,
                name: "exterior".into(),
                keyword_category_id: 2,
            },
        ]
    }

    fn caption_field() -> Field {
        Field {
            id: 7,
            name: "Caption".into(),
            field_display_type: "singleLine".into(),
            alive: None,
            protected: None,
        }
    }

    #[test]
    fn test_derived_value_joins_names() {
        assert_eq!(derived_value(&keywords(), "; "), "aerial; exterior");
        assert_eq!(derived_value(&keywords()[..1], "; "), "aerial");
    }

    #[tokio::test]
    async fn test_overwrite_payload_replaces_value() {
        let service = FakeService::default().with_files(vec![FileAsset {
            id: 5,
            filename: None,
            fields: vec![FieldValue {
                id: 7,
                values: vec!["old caption".into()],
            }],
            keywords: Vec::new(),
        }]);

        let mutator = FieldMutator::new(
            &service,
            &caption_field(),
            &keywords(),
            "; ",
            InsertMode::Overwrite,
        );
        mutator.apply(&[5]).await.unwrap();

        let updates = service.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0][0].field_value(7), Some("aerial; exterior"));
        // Overwrite never reads existing values.
        assert!(!service.calls.lock().unwrap().contains(&"get_files".to_string()));
    }

    #[tokio::test]
    async fn test_append_concatenates_existing_value() {
        let service = FakeService::default().with_files(vec![FileAsset {
            id: 5,
            filename: None,
            fields: vec![FieldValue {
                id: 7,
                values: vec!["old caption".into()],
            }],
            keywords: Vec::new(),
        }]);

        let mutator = FieldMutator::new(
            &service,
            &caption_field(),
            &keywords(),
            "; ",
            InsertMode::Append,
        );
        mutator.apply(&[5]).await.unwrap();

        let updates = service.updates.lock().unwrap();
        assert_eq!(
            updates[0][0].field_value(7),
            Some("old caption; aerial; exterior")
        );
    }

    #[tokio::test]
    async fn test_append_without_existing_value_writes_plain() {
        let service = FakeService::default().with_files(vec![FileAsset {
            id: 5,
            filename: None,
            fields: Vec::new(),
            keywords: Vec::new(),
        }]);

        let mutator = FieldMutator::new(
            &service,
            &caption_field(),
            &keywords(),
            "; ",
            InsertMode::Append,
        );
        mutator.apply(&[5]).await.unwrap();

        let updates = service.updates.lock().unwrap();
        assert_eq!(updates[0][0].field_value(7), Some("aerial; exterior"));
    }

    #[tokio::test]
    async fn test_append_does_not_deduplicate() {
        // Applying append twice stacks the value; no de-duplication happens.
        let service = FakeService::default().with_files(vec![FileAsset {
            id: 5,
            filename: None,
            fields: Vec::new(),
            keywords: Vec::new(),
        }]);

        let mutator = FieldMutator::new(
            &service,
            &caption_field(),
            &keywords(),
            "; ",
            InsertMode::Append,
        );
        mutator.apply(&[5]).await.unwrap();
        mutator.apply(&[5]).await.unwrap();

        let updates = service.updates.lock().unwrap();
        assert_eq!(
            updates[1][0].field_value(7),
            Some("aerial; exterior; aerial; exterior")
        );
    }

    #[tokio::test]
    async fn test_overwrite_is_idempotent() {
        let service = FakeService::default().with_files(vec![FileAsset {
            id: 5,
            filename: None,
            fields: Vec::new(),
            keywords: Vec::new(),
        }]);

        let mutator = FieldMutator::new(
            &service,
            &caption_field(),
            &keywords(),
            "; ",
            InsertMode::Overwrite,
        );
        mutator.apply(&[5]).await.unwrap();
        let first = service.stored_value(5, 7);
        mutator.apply(&[5]).await.unwrap();
        let second = service.stored_value(5, 7);

        assert_eq!(first, second);
        assert_eq!(second.as_deref(), Some("aerial; exterior"));
    }
}
