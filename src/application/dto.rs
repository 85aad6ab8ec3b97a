use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::entities::{Item, Quote, StoredFile};

/// Success message returned for every accepted upload
pub const UPLOAD_SUCCESS_MESSAGE: &str = "File uploaded securely";

/// DTO for item responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemDto {
    pub id: u64,
    pub name: String,
}

impl From<Item> for ItemDto {
    fn from(item: Item) -> Self {
        Self {
            id: item.id(),
            name: item.name().to_string(),
        }
    }
}

/// DTO for quote responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QuoteDto {
    pub id: u64,
    pub text: String,
    pub author: String,
    pub book: String,
    pub created_date: DateTime<Utc>,
}

impl From<Quote> for QuoteDto {
    fn from(quote: Quote) -> Self {
        Self {
            id: quote.id(),
            text: quote.text().to_string(),
            author: quote.author().to_string(),
            book: quote.book().to_string(),
            created_date: quote.created_date(),
        }
    }
}

/// DTO for quote creation. Unknown fields are rejected; the limits
/// mirror the `QUOTE_*_MAX_LENGTH` domain constants.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateQuoteRequest {
    #[validate(length(min = 1, max = 2000))]
    pub text: String,
    #[validate(length(min = 1, max = 200))]
    pub author: String,
    #[validate(length(min = 1, max = 300))]
    pub book: String,
}

impl CreateQuoteRequest {
    /// Strip surrounding whitespace from every field
    pub fn trimmed(self) -> Self {
        Self {
            text: self.text.trim().to_string(),
            author: self.author.trim().to_string(),
            book: self.book.trim().to_string(),
        }
    }
}

/// DTO for quote deletion responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteQuoteResponse {
    pub message: String,
    pub quote: QuoteDto,
}

/// DTO for upload responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    /// Generated name of the stored file
    pub filename: String,
    pub message: String,
}

impl From<&StoredFile> for UploadResponse {
    fn from(stored: &StoredFile) -> Self {
        Self {
            filename: stored.file_name(),
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
        }
    }
}
