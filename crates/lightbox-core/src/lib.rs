//! Lightbox client - headless library for the Lightbox digital asset
//! management REST API.
//!
//! This crate exposes the service's typed resource records ("nouns"), the
//! shared validation and response-classification layer, and the batched
//! keyword-to-field migration pipeline. It carries no UI and installs no
//! logging subscriber; hosts wire up `tracing` however they like.
//!
//! # Example
//!
//! ```rust,ignore
//! use lightbox_client::LightboxApi;
//!
//! #[tokio::main]
//! async fn main() -> lightbox_client::Result<()> {
//!     let mut api = LightboxApi::new("demo.lightboxdam.com")?;
//!
//!     // Move the "Projects" keywords into the "Caption" field for every
//!     // file in album 12, 200 files per request.
//!     let report = api
//!         .move_keywords_to_field_by_album(12u64, 4u64, 7u64, "; ", "append", None)
//!         .await?;
//!     println!("updated {} files", report.files_updated);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod migration;
pub mod network;
pub mod nouns;
pub mod prompt;
pub mod query;
pub mod resolve;
pub mod response;

// Re-export commonly used types
pub use config::{normalize_base_url, AppConfig, NetworkConfig};
pub use error::{LightboxError, Result};
pub use migration::{BatchPlan, FieldMutator, InsertMode, MigrationProgress, MigrationReport};
pub use network::{AssetService, HttpClient, RestService};
pub use nouns::{
    Album, Field, FieldValue, FileAsset, Group, Keyword, KeywordCategory, NestedFileItem,
    NestedGroupItem, NestedKeywordItem, NestedUserItem, User,
};
pub use prompt::{ConsolePrompt, GateState, LinePrompt};
pub use query::QueryOptions;
pub use resolve::{CategoryArg, Identified, NounRef};
pub use response::{classify, Classified, ErrorBody, ErrorReport, Outcome, RawResponse};

/// Main entry point for Lightbox operations.
///
/// Owns the REST transport bound to a validated base URL and the interactive
/// prompt used by destructive operations. Construct with [`LightboxApi::new`]
/// and swap the prompt with [`LightboxApi::with_prompt`] when embedding in a
/// host that is not a terminal.
pub struct LightboxApi {
    service: RestService,
    prompt: Box<dyn LinePrompt + Send>,
}

impl LightboxApi {
    /// Create a client for the service at `base_url`.
    ///
    /// The URL is normalized first (scheme prepending, localhost and
    /// private-IP handling); see [`normalize_base_url`].
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let http = HttpClient::new(base_url)?;
        Ok(Self {
            service: RestService::new(http),
            prompt: Box::new(ConsolePrompt),
        })
    }

    /// Replace the interactive prompt port.
    pub fn with_prompt(mut self, prompt: Box<dyn LinePrompt + Send>) -> Self {
        self.prompt = prompt;
        self
    }

    /// The normalized base URL this client talks to.
    pub fn base_url(&self) -> &str {
        self.service.http().base_url()
    }

    /// Fetch an album by any accepted reference shape.
    pub async fn get_album(&self, album: impl Into<NounRef<Album>>) -> Result<Album> {
        let id = album.into().resolve("get_album")?;
        self.service.get_album(id).await
    }

    /// Fetch a field by any accepted reference shape.
    pub async fn get_field(&self, field: impl Into<NounRef<Field>>) -> Result<Field> {
        let id = field.into().resolve("get_field")?;
        self.service.get_field(id).await
    }

    /// Fetch a keyword category by any accepted reference shape.
    pub async fn get_keyword_category(
        &self,
        category: impl Into<NounRef<KeywordCategory>>,
    ) -> Result<KeywordCategory> {
        let id = category.into().resolve("get_keyword_category")?;
        self.service.get_keyword_category(id).await
    }

    /// List keywords matching the given options.
    pub async fn get_keywords(&self, options: &QueryOptions) -> Result<Vec<Keyword>> {
        self.service.get_keywords(options).await
    }

    /// List files matching the given options.
    pub async fn get_files(&self, options: &QueryOptions) -> Result<Vec<FileAsset>> {
        self.service.get_files(options).await
    }

    /// List groups matching the given options.
    pub async fn get_groups(&self, options: &QueryOptions) -> Result<Vec<Group>> {
        self.service.get_groups(options).await
    }

    /// List users matching the given options.
    pub async fn get_users(&self, options: &QueryOptions) -> Result<Vec<User>> {
        self.service.get_users(options).await
    }

    /// Submit a file update and return the classified response.
    pub async fn update_files(&self, files: &[FileAsset]) -> Result<Classified> {
        self.service.update_files(files).await
    }

    /// Move keyword-derived values into a target field across every file in
    /// an album.
    ///
    /// `insert_mode` is `"append"` or `"overwrite"`; anything else fails
    /// before a single request is made. `batch_size` defaults to
    /// [`NetworkConfig::DEFAULT_BATCH_SIZE`] files per request and negative
    /// values are coerced to their absolute value. When the target field's
    /// display type is restricted, the run blocks on the prompt for an
    /// explicit yes before touching keyword or file data.
    ///
    /// The returned report counts files in dispatched batches; per-batch
    /// HTTP failures are logged, reflected in `batches_failed`, and do not
    /// halt the run.
    pub async fn move_keywords_to_field_by_album(
        &mut self,
        album: impl Into<NounRef<Album>>,
        keyword_categories: impl Into<CategoryArg>,
        target_field: impl Into<NounRef<Field>>,
        separator: &str,
        insert_mode: &str,
        batch_size: Option<i64>,
    ) -> Result<MigrationReport> {
        migration::move_keywords_to_field_by_album(
            &self.service,
            self.prompt.as_mut(),
            album.into(),
            keyword_categories.into(),
            target_field.into(),
            separator,
            insert_mode,
            batch_size.unwrap_or(NetworkConfig::DEFAULT_BATCH_SIZE),
        )
        .await
    }
}
