mod item;
mod quote;
mod stored_file;

pub use item::{Item, ITEM_NAME_MAX_LENGTH};
pub use quote::{
    NewQuote, Quote, QUOTE_AUTHOR_MAX_LENGTH, QUOTE_BOOK_MAX_LENGTH, QUOTE_TEXT_MAX_LENGTH,
};
pub use stored_file::StoredFile;
