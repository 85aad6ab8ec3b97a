mod in_memory_item_repository;
mod in_memory_quote_repository;

pub use in_memory_item_repository::InMemoryItemRepository;
pub use in_memory_quote_repository::InMemoryQuoteRepository;
