use async_trait::async_trait;
use parking_lot::RwLock;

use crate::application::ports::{QuoteRepository, RepositoryError};
use crate::domain::entities::{NewQuote, Quote};

#[derive(Default)]
struct QuoteState {
    quotes: Vec<Quote>,
    last_id: u64,
}

/// Process-local quote storage.
///
/// Ids are never reused, so deleting a quote cannot make a later one
/// collide with it.
#[derive(Default)]
pub struct InMemoryQuoteRepository {
    state: RwLock<QuoteState>,
}

impl InMemoryQuoteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuoteRepository for InMemoryQuoteRepository {
    async fn list(&self) -> Result<Vec<Quote>, RepositoryError> {
        Ok(self.state.read().quotes.clone())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Quote>, RepositoryError> {
        let state = self.state.read();
        Ok(state.quotes.iter().find(|q| q.id() == id).cloned())
    }

    async fn find_by_book(&self, book: &str) -> Result<Vec<Quote>, RepositoryError> {
        let state = self.state.read();
        Ok(state
            .quotes
            .iter()
            .filter(|q| q.book() == book)
            .cloned()
            .collect())
    }

    async fn create(&self, quote: NewQuote) -> Result<Quote, RepositoryError> {
        let mut state = self.state.write();
        let id = state
            .last_id
            .checked_add(1)
            .ok_or(RepositoryError::IdExhausted)?;
        let quote = Quote::new(id, quote);
        state.quotes.push(quote.clone());
        state.last_id = id;
        Ok(quote)
    }

    async fn delete(&self, id: u64) -> Result<Option<Quote>, RepositoryError> {
        let mut state = self.state.write();
        let Some(index) = state.quotes.iter().position(|q| q.id() == id) else {
            return Ok(None);
        };
        Ok(Some(state.quotes.remove(index)))
    }
}
