use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::validation::ValidationBuilder;

pub const QUOTE_TEXT_MAX_LENGTH: usize = 2000;
pub const QUOTE_AUTHOR_MAX_LENGTH: usize = 200;
pub const QUOTE_BOOK_MAX_LENGTH: usize = 300;

/// Validated input for a new quote, whitespace already stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuote {
    text: String,
    author: String,
    book: String,
}

impl NewQuote {
    pub fn new(text: &str, author: &str, book: &str) -> Result<Self, DomainError> {
        let text = ValidationBuilder::new(text.trim(), "text")
            .not_empty()
            .length(Some(1), Some(QUOTE_TEXT_MAX_LENGTH))
            .build()?;
        let author = ValidationBuilder::new(author.trim(), "author")
            .not_empty()
            .length(Some(1), Some(QUOTE_AUTHOR_MAX_LENGTH))
            .build()?;
        let book = ValidationBuilder::new(book.trim(), "book")
            .not_empty()
            .length(Some(1), Some(QUOTE_BOOK_MAX_LENGTH))
            .build()?;

        Ok(Self {
            text: text.to_string(),
            author: author.to_string(),
            book: book.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn book(&self) -> &str {
        &self.book
    }
}

/// Quote entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    id: u64,
    text: String,
    author: String,
    book: String,
    created_date: DateTime<Utc>,
}

impl Quote {
    pub fn new(id: u64, quote: NewQuote) -> Self {
        Self::reconstruct(id, quote, Utc::now())
    }

    pub fn reconstruct(id: u64, quote: NewQuote, created_date: DateTime<Utc>) -> Self {
        Self {
            id,
            text: quote.text,
            author: quote.author,
            book: quote.book,
            created_date,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn book(&self) -> &str {
        &self.book
    }

    pub fn created_date(&self) -> DateTime<Utc> {
        self.created_date
    }
}
