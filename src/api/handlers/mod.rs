pub mod health;
pub mod items;
pub mod quotes;
pub mod upload;

pub use health::health_handler;
pub use items::{create_item_handler, get_item_handler};
pub use quotes::{
    create_quote_handler, delete_quote_handler, get_quote_handler, list_quotes_by_book_handler,
    list_quotes_handler,
};
pub use upload::upload_cover_handler;
