use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::domain::entities::{NewQuote, Quote};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Identifier space exhausted")]
    IdExhausted,
}

/// Port for quote persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// All quotes in insertion order
    async fn list(&self) -> Result<Vec<Quote>, RepositoryError>;

    async fn find_by_id(&self, id: u64) -> Result<Option<Quote>, RepositoryError>;

    /// Quotes whose book equals `book` exactly
    async fn find_by_book(&self, book: &str) -> Result<Vec<Quote>, RepositoryError>;

    async fn create(&self, quote: NewQuote) -> Result<Quote, RepositoryError>;

    /// Remove and return the quote, `None` if it did not exist
    async fn delete(&self, id: u64) -> Result<Option<Quote>, RepositoryError>;
}
