//! Keyword-set retrieval for the migration pipeline.

use crate::error::{LightboxError, Result};
use crate::network::AssetService;
use crate::nouns::{Keyword, KeywordCategory};
use crate::query::QueryOptions;

/// Fetch every keyword in the given categories (no page cap) and return the
/// ordered list alongside the ids. An empty result is a fatal precondition
/// failure naming the first category — there is nothing to migrate.
pub(crate) async fn fetch_keyword_set(
    service: &dyn AssetService,
    categories: &[KeywordCategory],
) -> Result<(Vec<Keyword>, Vec<u64>)> {
    let category_ids: Vec<String> = categories.iter().map(|c| c.id.to_string()).collect();

    let mut options = QueryOptions::new();
    options.add_option("limit", "0");
    options.add_option("keyword_category_id", category_ids.join(","));

    let keywords = service.get_keywords(&options).await?;

    if keywords.is_empty() {
        let first = &categories[0];
        return Err(LightboxError::Precondition {
            subject: "keywords",
            resource_type: "keyword category",
            resource_name: first.name.clone(),
            resource_id: first.id,
        });
    }

    let ids = keywords.iter().map(|k| k.id).collect();
    Ok((keywords, ids))
}
