mod items;
mod quotes;
mod upload_cover;

pub use items::{CreateItemUseCase, GetItemUseCase};
pub use quotes::{
    CreateQuoteUseCase, DeleteQuoteUseCase, GetQuoteUseCase, ListQuotesByBookUseCase,
    ListQuotesUseCase,
};
pub use upload_cover::UploadCoverUseCase;
