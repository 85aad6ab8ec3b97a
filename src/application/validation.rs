//! Request validation shared by the quote use cases

use validator::Validate;

use crate::application::dto::CreateQuoteRequest;
use crate::application::errors::QuoteUseCaseError;
use crate::domain::entities::NewQuote;
use crate::domain::errors::DomainError;

/// Trim and validate a quote creation request.
///
/// Length limits are checked after whitespace is stripped, so a field
/// made only of spaces is reported as empty.
pub fn validate_quote_request(request: CreateQuoteRequest) -> Result<NewQuote, QuoteUseCaseError> {
    let request = request.trimmed();

    if let Err(errors) = request.validate() {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        // Deterministic reporting: first field in alphabetical order
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        if let Some((field, field_errors)) = fields.into_iter().next() {
            let message = field_errors
                .first()
                .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| {
                    if request_field_is_empty(&request, &field) {
                        "field_cannot_be_empty".to_string()
                    } else {
                        "Field length is out of range".to_string()
                    }
                });
            return Err(DomainError::validation(field.to_string(), message).into());
        }
    }

    Ok(NewQuote::new(&request.text, &request.author, &request.book)?)
}

fn request_field_is_empty(request: &CreateQuoteRequest, field: &str) -> bool {
    match field {
        "text" => request.text.is_empty(),
        "author" => request.author.is_empty(),
        "book" => request.book.is_empty(),
        _ => false,
    }
}
