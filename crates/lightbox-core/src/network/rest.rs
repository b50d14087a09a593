//! The `AssetService` port and its REST implementation.
//!
//! The pipeline talks to this trait, never to the transport directly, so it
//! can run against an in-memory fake in tests. Listing and single-noun GETs
//! convert classified failures into typed errors; `update_files` returns the
//! classified response as-is — the batch loop decides what to do with it.

use crate::config::AppConfig;
use crate::error::{LightboxError, Result};
use crate::nouns::{Album, Field, FileAsset, Group, Keyword, KeywordCategory, User};
use crate::network::HttpClient;
use crate::query::QueryOptions;
use crate::response::{classify, Classified};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Port for the remote asset service.
#[async_trait]
pub trait AssetService: Send + Sync {
    async fn get_album(&self, id: u64) -> Result<Album>;
    async fn get_field(&self, id: u64) -> Result<Field>;
    async fn get_keyword_category(&self, id: u64) -> Result<KeywordCategory>;
    async fn get_keywords(&self, options: &QueryOptions) -> Result<Vec<Keyword>>;
    async fn get_files(&self, options: &QueryOptions) -> Result<Vec<FileAsset>>;
    async fn get_groups(&self, options: &QueryOptions) -> Result<Vec<Group>>;
    async fn get_users(&self, options: &QueryOptions) -> Result<Vec<User>>;
    /// Submit one batch update. The classified response is returned even for
    /// failures; only transport errors become `Err`.
    async fn update_files(&self, files: &[FileAsset]) -> Result<Classified>;
}

/// REST implementation of [`AssetService`].
pub struct RestService {
    http: HttpClient,
}

impl RestService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    fn noun_path(noun: &str) -> String {
        format!("{}/{}", AppConfig::REST_PREFIX, noun)
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        noun: &'static str,
        options: &QueryOptions,
    ) -> Result<Vec<T>> {
        let raw = self.http.get(&Self::noun_path(noun), options).await?;
        let classified = classify(raw);
        if !classified.is_success() {
            return Err(Self::listing_error(&classified));
        }
        let items: Vec<T> = serde_json::from_str(&classified.response.body)?;
        debug!("{} returned {} record(s)", noun, items.len());
        Ok(items)
    }

    async fn fetch_one<T: DeserializeOwned>(
        &self,
        noun: &'static str,
        resource_type: &'static str,
        id: u64,
    ) -> Result<T> {
        let mut options = QueryOptions::new();
        options.add_option("id", id);
        self.fetch_list(noun, &options)
            .await?
            .into_iter()
            .next()
            .ok_or(LightboxError::NotFound { resource_type, id })
    }

    fn listing_error(classified: &Classified) -> LightboxError {
        let message = classified
            .error_body()
            .map(|b| b.error_message)
            .unwrap_or_else(|| classified.response.reason.clone());
        LightboxError::Http {
            status: classified.response.status,
            message,
        }
    }
}

#[async_trait]
impl AssetService for RestService {
    async fn get_album(&self, id: u64) -> Result<Album> {
        self.fetch_one("Albums", "Albums", id).await
    }

    async fn get_field(&self, id: u64) -> Result<Field> {
        self.fetch_one("Fields", "Fields", id).await
    }

    async fn get_keyword_category(&self, id: u64) -> Result<KeywordCategory> {
        self.fetch_one("KeywordCategories", "KeywordCategories", id).await
    }

    async fn get_keywords(&self, options: &QueryOptions) -> Result<Vec<Keyword>> {
        self.fetch_list("Keywords", options).await
    }

    async fn get_files(&self, options: &QueryOptions) -> Result<Vec<FileAsset>> {
        self.fetch_list("Files", options).await
    }

    async fn get_groups(&self, options: &QueryOptions) -> Result<Vec<Group>> {
        self.fetch_list("Groups", options).await
    }

    async fn get_users(&self, options: &QueryOptions) -> Result<Vec<User>> {
        self.fetch_list("Users", options).await
    }

    async fn update_files(&self, files: &[FileAsset]) -> Result<Classified> {
        if files.is_empty() {
            return Err(LightboxError::argument(
                "update_files",
                "array is empty so there is nothing to send",
            ));
        }
        let raw = self.http.put_json(&Self::noun_path("Files"), &files).await?;
        Ok(classify(raw))
    }
}
