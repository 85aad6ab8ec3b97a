use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::api::router::AppState;
use crate::application::{
    ports::{CoverStore, ItemRepository, QuoteRepository, UploadError},
    use_cases::{
        CreateItemUseCase, CreateQuoteUseCase, DeleteQuoteUseCase, GetItemUseCase,
        GetQuoteUseCase, ListQuotesByBookUseCase, ListQuotesUseCase, UploadCoverUseCase,
    },
};
use crate::config::{Config, ConfigError};
use crate::domain::value_objects::UploadPolicy;
use crate::infrastructure::{
    persistence::{InMemoryItemRepository, InMemoryQuoteRepository},
    storage::SecureFileStore,
};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to create upload directory {}: {source}", .path.display())]
    CreateUploadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    UploadDirectory(#[from] UploadError),
}

/// Application builder for clean dependency injection and setup
pub struct ApplicationBuilder {
    config: Config,
    policy: Option<UploadPolicy>,
    item_repo: Option<Arc<dyn ItemRepository>>,
    quote_repo: Option<Arc<dyn QuoteRepository>>,
    cover_store: Option<Arc<dyn CoverStore>>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            policy: None,
            item_repo: None,
            quote_repo: None,
            cover_store: None,
        }
    }

    /// Use this policy instead of the one described by the config
    pub fn with_policy(mut self, policy: UploadPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn with_item_repository(mut self, repo: Arc<dyn ItemRepository>) -> Self {
        self.item_repo = Some(repo);
        self
    }

    pub fn with_quote_repository(mut self, repo: Arc<dyn QuoteRepository>) -> Self {
        self.quote_repo = Some(repo);
        self
    }

    /// Replace the filesystem store, mainly for tests
    pub fn with_cover_store(mut self, store: Arc<dyn CoverStore>) -> Self {
        self.cover_store = Some(store);
        self
    }

    /// Wire infrastructure and use cases into the router state
    pub async fn build(self) -> Result<AppState, BuildError> {
        let policy = match self.policy {
            Some(policy) => policy,
            None => self.config.upload_policy()?,
        };
        let max_upload_bytes = policy.max_size();

        let cover_store = match self.cover_store {
            Some(store) => store,
            None => Self::init_file_store(&self.config, policy).await?,
        };

        let item_repo: Arc<dyn ItemRepository> = match self.item_repo {
            Some(repo) => repo,
            None => Arc::new(InMemoryItemRepository::new()),
        };
        let quote_repo: Arc<dyn QuoteRepository> = match self.quote_repo {
            Some(repo) => repo,
            None => Arc::new(InMemoryQuoteRepository::new()),
        };

        info!("Application layer initialized");

        Ok(AppState {
            upload_use_case: Arc::new(UploadCoverUseCase::new(cover_store)),
            create_item_use_case: Arc::new(CreateItemUseCase::new(Arc::clone(&item_repo))),
            get_item_use_case: Arc::new(GetItemUseCase::new(item_repo)),
            list_quotes_use_case: Arc::new(ListQuotesUseCase::new(Arc::clone(&quote_repo))),
            get_quote_use_case: Arc::new(GetQuoteUseCase::new(Arc::clone(&quote_repo))),
            list_quotes_by_book_use_case: Arc::new(ListQuotesByBookUseCase::new(Arc::clone(
                &quote_repo,
            ))),
            create_quote_use_case: Arc::new(CreateQuoteUseCase::new(Arc::clone(&quote_repo))),
            delete_quote_use_case: Arc::new(DeleteQuoteUseCase::new(quote_repo)),
            max_upload_bytes,
        })
    }

    /// Create the upload directory when asked to, then make sure the
    /// store can resolve it before any request arrives
    async fn init_file_store(
        config: &Config,
        policy: UploadPolicy,
    ) -> Result<Arc<dyn CoverStore>, BuildError> {
        if config.create_upload_dir {
            tokio::fs::create_dir_all(&config.upload_dir)
                .await
                .map_err(|source| BuildError::CreateUploadDir {
                    path: config.upload_dir.clone(),
                    source,
                })?;
        }

        let store = SecureFileStore::new(config.upload_dir.clone(), policy);
        let canonical = store.verify().await?;

        info!(
            upload_dir = %canonical.display(),
            max_upload_bytes = store.policy().max_size(),
            accepted_types = store.policy().signatures().entries().len(),
            "Upload store initialized"
        );

        Ok(Arc::new(store))
    }
}
