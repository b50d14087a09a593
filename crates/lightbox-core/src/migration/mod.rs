//! The keyword-to-field migration pipeline.
//!
//! Composes reference resolution, the confirmation gate, keyword retrieval,
//! batch planning, and per-batch field mutation into the end-to-end
//! "move keywords into a field" workflow. Batches run strictly in sequence;
//! progress is threaded through an explicit accumulator rather than shared
//! mutable counters.

mod batch;
mod keywords;
mod mutate;

pub use batch::BatchPlan;
pub use mutate::FieldMutator;

use crate::error::{LightboxError, Result};
use crate::network::AssetService;
use crate::nouns::{Album, Field, KeywordCategory};
use crate::prompt::{confirm_restricted_field, LinePrompt};
use crate::resolve::{CategoryArg, NounRef};
use crate::response::ErrorReport;
use batch::normalize_batch_size;
use keywords::fetch_keyword_set;
use tracing::{error, info};

/// Policy for combining the keyword-derived value with a field's existing
/// content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertMode {
    Append,
    Overwrite,
}

impl InsertMode {
    /// Parse the caller-supplied mode. Anything but `"append"` or
    /// `"overwrite"` is a fatal argument error.
    pub fn parse(raw: &str, context: &str) -> Result<Self> {
        match raw {
            "append" => Ok(InsertMode::Append),
            "overwrite" => Ok(InsertMode::Overwrite),
            other => Err(LightboxError::argument(
                context,
                format!(
                    "expected \"append\" or \"overwrite\" for \"insert_mode\"; \
                     instead got {other:?}"
                ),
            )),
        }
    }
}

/// Accumulator threaded through the batch loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationProgress {
    pub files_updated: usize,
    pub batch_index: usize,
}

impl MigrationProgress {
    /// Fold one dispatched batch into the running totals.
    pub fn record_batch(self, index: usize, batch_len: usize) -> Self {
        Self {
            files_updated: self.files_updated + batch_len,
            batch_index: index,
        }
    }
}

/// Final report of a migration run.
///
/// `files_updated` counts files in dispatched batches, including batches
/// whose response classified as an error; `batches_failed` makes the
/// discrepancy visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationReport {
    pub files_updated: usize,
    pub iterations: usize,
    pub batches_failed: usize,
}

const CONTEXT: &str = "move_keywords_to_field_by_album";

/// Move keyword-derived values into a target field across every file in an
/// album. See [`crate::LightboxApi::move_keywords_to_field_by_album`].
pub(crate) async fn move_keywords_to_field_by_album(
    service: &dyn AssetService,
    prompt: &mut dyn LinePrompt,
    album: NounRef<Album>,
    categories: CategoryArg,
    target_field: NounRef<Field>,
    separator: &str,
    insert_mode: &str,
    batch_size: i64,
) -> Result<MigrationReport> {
    // Pure input validation happens before anything touches the network.
    let mode = InsertMode::parse(insert_mode, CONTEXT)?;
    let batch_size = normalize_batch_size(batch_size, CONTEXT)?;
    let category_refs = categories.into_refs(CONTEXT)?;

    // Resolve references into concrete records.
    let album = resolve_album(service, album).await?;
    let mut categories = Vec::with_capacity(category_refs.len());
    for r in category_refs {
        categories.push(resolve_category(service, r).await?);
    }
    let field = resolve_field(service, target_field).await?;

    // Restricted display types gate the run on explicit confirmation, before
    // any keyword or file data is fetched.
    if field.is_restricted() {
        confirm_restricted_field(prompt, &field)?;
    }

    info!(
        "Retrieving keywords for keyword category => {:?}.",
        categories[0].name
    );
    let (keywords, keyword_ids) = fetch_keyword_set(service, &categories).await?;
    info!("Retrieved {} keyword(s).", keyword_ids.len());

    info!("Retrieving file ids in album {:?}.", album.name);
    let file_ids = album.file_ids();

    info!("Calculating batch size.");
    let total = file_ids.len();
    if total == 0 {
        return Err(LightboxError::Precondition {
            subject: "files",
            resource_type: "album",
            resource_name: album.name.clone(),
            resource_id: album.id,
        });
    }

    let plan = BatchPlan::new(total, batch_size);
    let mutator = FieldMutator::new(service, &field, &keywords, separator, mode);

    let mut progress = MigrationProgress::default();
    let mut batches_failed = 0;
    for (index, slice) in plan.slices(&file_ids) {
        info!(
            "Processing batch {} of {} ({} file(s)).",
            index,
            plan.iterations,
            slice.len()
        );
        let classified = mutator.apply(slice).await?;
        if !classified.is_success() {
            batches_failed += 1;
            let report = ErrorReport::for_resource(&album.name, "Albums", album.id, &classified);
            error!(
                "Batch {} failed: {} (status {})",
                index, report.message, report.status_code
            );
        }
        progress = progress.record_batch(index, slice.len());
    }

    info!("Done.");
    Ok(MigrationReport {
        files_updated: progress.files_updated,
        iterations: plan.iterations,
        batches_failed,
    })
}

async fn resolve_album(service: &dyn AssetService, r: NounRef<Album>) -> Result<Album> {
    match r {
        NounRef::Record(album) => Ok(album),
        other => service.get_album(other.resolve(CONTEXT)?).await,
    }
}

async fn resolve_field(service: &dyn AssetService, r: NounRef<Field>) -> Result<Field> {
    match r {
        NounRef::Record(field) => Ok(field),
        other => service.get_field(other.resolve(CONTEXT)?).await,
    }
}

async fn resolve_category(
    service: &dyn AssetService,
    r: NounRef<KeywordCategory>,
) -> Result<KeywordCategory> {
    match r {
        NounRef::Record(category) => Ok(category),
        other => service.get_keyword_category(other.resolve(CONTEXT)?).await,
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::FakeService;
    use super::*;
    use crate::error::LightboxError;
    use crate::nouns::{Keyword, NestedFileItem};
    use crate::prompt::test_support::ScriptedPrompt;

    fn album_with_files(count: u64) -> Album {
        Album {
            id: 12,
            name: "Spring Shoot".into(),
            code: None,
            locked: None,
            files: (1..=count).map(|id| NestedFileItem { id }).collect(),
        }
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

    fn restricted_field() -> Field {
        Field {
            id: 7,
            name: "Project Type".into(),
            field_display_type: "option".into(),
            alive: None,
            protected: None,
        }
    }

    fn projects_category() -> KeywordCategory {
        KeywordCategory {
            id: 4,
            name: "Projects".into(),
            code: None,
            display_order: None,
        }
    }

    fn project_keywords() -> Vec<Keyword> {
        vec![
            Keyword {
                id: 1,
                name: "aerial".into(),
                keyword_category_id: 4,
            },
            Keyword {
                id: 2,
                name: "exterior".into(),
                keyword_category_id: 4,
            },
        ]
    }

    fn service(files: u64) -> FakeService {
        FakeService::default()
            .with_albums(vec![album_with_files(files)])
            .with_fields(vec![caption_field()])
            .with_categories(vec![projects_category()])
            .with_keywords(project_keywords())
    }

    async fn run(
        service: &FakeService,
        prompt: &mut ScriptedPrompt,
        insert_mode: &str,
        batch_size: i64,
    ) -> Result<MigrationReport> {
        move_keywords_to_field_by_album(
            service,
            prompt,
            12u64.into(),
            4u64.into(),
            7u64.into(),
            "; ",
            insert_mode,
            batch_size,
        )
        .await
    }

    #[test]
    fn test_progress_fold() {
        let progress = MigrationProgress::default()
            .record_batch(1, 200)
            .record_batch(2, 200)
            .record_batch(3, 50);
        assert_eq!(progress.files_updated, 450);
        assert_eq!(progress.batch_index, 3);
    }

    #[test]
    fn test_insert_mode_parse() {
        assert_eq!(
            InsertMode::parse("append", CONTEXT).unwrap(),
            InsertMode::Append
        );
        assert_eq!(
            InsertMode::parse("overwrite", CONTEXT).unwrap(),
            InsertMode::Overwrite
        );
        assert!(InsertMode::parse("prepend", CONTEXT).is_err());
        assert!(InsertMode::parse("Append", CONTEXT).is_err());
    }

    #[tokio::test]
    async fn test_migration_covers_every_file_in_order() {
        let service = service(450);
        let mut prompt = ScriptedPrompt::new(&[]);

        let report = run(&service, &mut prompt, "overwrite", 200).await.unwrap();

        assert_eq!(report.files_updated, 450);
        assert_eq!(report.iterations, 3);
        assert_eq!(report.batches_failed, 0);

        let updates = service.updates.lock().unwrap();
        let sizes: Vec<usize> = updates.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![200, 200, 50]);

        let dispatched: Vec<u64> = updates.iter().flatten().map(|f| f.id).collect();
        let expected: Vec<u64> = (1..=450).collect();
        assert_eq!(dispatched, expected);
        assert!(updates
            .iter()
            .flatten()
            .all(|f| f.field_value(7) == Some("aerial; exterior")));
    }

    #[tokio::test]
    async fn test_invalid_insert_mode_fails_before_any_call() {
        let service = service(10);
        let mut prompt = ScriptedPrompt::new(&[]);

        let err = run(&service, &mut prompt, "prepend", 200).await.unwrap_err();

        assert!(matches!(err, LightboxError::Argument { .. }));
        assert!(service.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_zero_batch_size_fails_before_any_call() {
        let service = service(10);
        let mut prompt = ScriptedPrompt::new(&[]);

        let err = run(&service, &mut prompt, "append", 0).await.unwrap_err();

        assert!(matches!(err, LightboxError::Argument { .. }));
        assert!(service.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_negative_batch_size_is_coerced() {
        let service = service(10);
        let mut prompt = ScriptedPrompt::new(&[]);

        let report = run(&service, &mut prompt, "overwrite", -4).await.unwrap();

        assert_eq!(report.iterations, 3);
        let sizes: Vec<usize> = service.updates.lock().unwrap().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![4, 4, 2]);
    }

    #[tokio::test]
    async fn test_empty_keyword_set_is_fatal_before_mutation() {
        let service = service(10).with_keywords(Vec::new());
        let mut prompt = ScriptedPrompt::new(&[]);

        let err = run(&service, &mut prompt, "append", 200).await.unwrap_err();

        match err {
            LightboxError::Precondition {
                subject,
                resource_name,
                resource_id,
                ..
            } => {
                assert_eq!(subject, "keywords");
                assert_eq!(resource_name, "Projects");
                assert_eq!(resource_id, 4);
            }
            other => panic!("expected Precondition, got {other:?}"),
        }
        assert!(!service.called("update_files"));
        assert!(!service.called("get_files"));
    }

    #[tokio::test]
    async fn test_empty_album_is_fatal_before_mutation() {
        let service = service(10).with_albums(vec![album_with_files(0)]);
        let mut prompt = ScriptedPrompt::new(&[]);

        let err = run(&service, &mut prompt, "append", 200).await.unwrap_err();

        match err {
            LightboxError::Precondition {
                subject,
                resource_name,
                ..
            } => {
                assert_eq!(subject, "files");
                assert_eq!(resource_name, "Spring Shoot");
            }
            other => panic!("expected Precondition, got {other:?}"),
        }
        assert!(!service.called("update_files"));
    }

    #[tokio::test]
    async fn test_restricted_field_no_aborts_before_fetches() {
        let service = service(10).with_fields(vec![restricted_field()]);
        let mut prompt = ScriptedPrompt::new(&["no"]);

        let err = run(&service, &mut prompt, "append", 200).await.unwrap_err();

        match err {
            LightboxError::UserAbort { input } => assert_eq!(input, "no"),
            other => panic!("expected UserAbort, got {other:?}"),
        }
        assert!(!service.called("get_keywords"));
        assert!(!service.called("get_files"));
        assert!(!service.called("update_files"));
    }

    #[tokio::test]
    async fn test_restricted_field_yes_proceeds() {
        let service = service(10).with_fields(vec![restricted_field()]);
        let mut prompt = ScriptedPrompt::new(&["y"]);

        let report = run(&service, &mut prompt, "overwrite", 200).await.unwrap();

        assert_eq!(report.files_updated, 10);
        assert!(service.called("update_files"));
    }

    #[tokio::test]
    async fn test_restricted_field_reprompts_until_decisive() {
        let service = service(10).with_fields(vec![restricted_field()]);
        let mut prompt = ScriptedPrompt::new(&["maybe", "yes"]);

        let report = run(&service, &mut prompt, "overwrite", 200).await.unwrap();

        assert_eq!(report.files_updated, 10);
        assert_eq!(prompt.shown.len(), 2);
    }

    #[tokio::test]
    async fn test_unrestricted_field_never_prompts() {
        let service = service(10);
        let mut prompt = ScriptedPrompt::new(&[]);

        run(&service, &mut prompt, "overwrite", 200).await.unwrap();

        assert!(prompt.shown.is_empty());
    }

    #[tokio::test]
    async fn test_classified_error_does_not_halt_the_run() {
        let service = service(450).with_update_statuses(&[200, 503, 200]);
        let mut prompt = ScriptedPrompt::new(&[]);

        let report = run(&service, &mut prompt, "overwrite", 200).await.unwrap();

        // The counter reflects attempted batches, not confirmed ones.
        assert_eq!(report.files_updated, 450);
        assert_eq!(report.batches_failed, 1);
        assert_eq!(service.updates.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_category_list_joins_ids() {
        let mut second = projects_category();
        second.id = 9;
        second.name = "Regions".into();
        let mut keywords = project_keywords();
        keywords.push(Keyword {
            id: 3,
            name: "northwest".into(),
            keyword_category_id: 9,
        });
        let service = service(4)
            .with_categories(vec![projects_category(), second])
            .with_keywords(keywords);
        let mut prompt = ScriptedPrompt::new(&[]);

        let report = move_keywords_to_field_by_album(
            &service,
            &mut prompt,
            12u64.into(),
            vec![4u64, 9u64].into(),
            7u64.into(),
            ", ",
            "overwrite",
            200,
        )
        .await
        .unwrap();

        assert_eq!(report.files_updated, 4);
        let updates = service.updates.lock().unwrap();
        assert_eq!(
            updates[0][0].field_value(7),
            Some("aerial, exterior, northwest")
        );
    }
}
