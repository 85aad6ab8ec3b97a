use std::sync::Arc;

use crate::application::dto::{CreateQuoteRequest, DeleteQuoteResponse, QuoteDto};
use crate::application::errors::QuoteUseCaseError;
use crate::application::ports::QuoteRepository;
use crate::application::validation::validate_quote_request;

/// Use case for listing all quotes
pub struct ListQuotesUseCase {
    repository: Arc<dyn QuoteRepository>,
}

impl ListQuotesUseCase {
    pub fn new(repository: Arc<dyn QuoteRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<Vec<QuoteDto>, QuoteUseCaseError> {
        let quotes = self.repository.list().await?;
        Ok(quotes.into_iter().map(QuoteDto::from).collect())
    }
}

/// Use case for fetching a single quote
pub struct GetQuoteUseCase {
    repository: Arc<dyn QuoteRepository>,
}

impl GetQuoteUseCase {
    pub fn new(repository: Arc<dyn QuoteRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: u64) -> Result<QuoteDto, QuoteUseCaseError> {
        self.repository
            .find_by_id(id)
            .await?
            .map(QuoteDto::from)
            .ok_or(QuoteUseCaseError::NotFound(id))
    }
}

/// Use case for listing the quotes of one book
pub struct ListQuotesByBookUseCase {
    repository: Arc<dyn QuoteRepository>,
}

impl ListQuotesByBookUseCase {
    pub fn new(repository: Arc<dyn QuoteRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, book: &str) -> Result<Vec<QuoteDto>, QuoteUseCaseError> {
        let quotes = self.repository.find_by_book(book).await?;
        if quotes.is_empty() {
            return Err(QuoteUseCaseError::BookNotFound(book.to_string()));
        }
        Ok(quotes.into_iter().map(QuoteDto::from).collect())
    }
}

/// Use case for creating quotes
pub struct CreateQuoteUseCase {
    repository: Arc<dyn QuoteRepository>,
}

impl CreateQuoteUseCase {
    pub fn new(repository: Arc<dyn QuoteRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, request: CreateQuoteRequest) -> Result<QuoteDto, QuoteUseCaseError> {
        let new_quote = validate_quote_request(request)?;
        let quote = self.repository.create(new_quote).await?;
        Ok(quote.into())
    }
}

/// Use case for deleting quotes
pub struct DeleteQuoteUseCase {
    repository: Arc<dyn QuoteRepository>,
}

impl DeleteQuoteUseCase {
    pub fn new(repository: Arc<dyn QuoteRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: u64) -> Result<DeleteQuoteResponse, QuoteUseCaseError> {
        let quote = self
            .repository
            .delete(id)
            .await?
            .ok_or(QuoteUseCaseError::NotFound(id))?;

        Ok(DeleteQuoteResponse {
            message: "Quote deleted".to_string(),
            quote: quote.into(),
        })
    }
}
