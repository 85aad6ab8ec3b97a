//! Error types for the item and quote use cases

use thiserror::Error;

use crate::application::ports::RepositoryError;
use crate::domain::errors::DomainError;

/// Error type for item use cases
#[derive(Debug, Error)]
pub enum ItemUseCaseError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Item not found: {0}")]
    NotFound(u64),
}

/// Error type for quote use cases
#[derive(Debug, Error)]
pub enum QuoteUseCaseError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Quote not found: {0}")]
    NotFound(u64),

    #[error("No quotes found for book: {0}")]
    BookNotFound(String),
}
