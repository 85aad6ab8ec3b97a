mod cover_store;
mod item_repository;
mod quote_repository;

pub use cover_store::{CoverStore, ErrorClass, UploadError, UploadErrorKind, UploadReader};
pub use item_repository::ItemRepository;
pub use quote_repository::{QuoteRepository, RepositoryError};

#[cfg(test)]
pub use cover_store::MockCoverStore;
#[cfg(test)]
pub use item_repository::MockItemRepository;
#[cfg(test)]
pub use quote_repository::MockQuoteRepository;
