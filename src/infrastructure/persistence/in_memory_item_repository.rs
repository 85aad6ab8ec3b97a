use async_trait::async_trait;
use parking_lot::RwLock;

use crate::application::ports::{ItemRepository, RepositoryError};
use crate::domain::entities::Item;

#[derive(Default)]
struct ItemState {
    items: Vec<Item>,
    last_id: u64,
}

/// Process-local item storage, injected wherever an `ItemRepository` is needed
#[derive(Default)]
pub struct InMemoryItemRepository {
    state: RwLock<ItemState>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, name: String) -> Result<Item, RepositoryError> {
        let mut state = self.state.write();
        let id = state
            .last_id
            .checked_add(1)
            .ok_or(RepositoryError::IdExhausted)?;
        let item = Item::new(id, name);
        state.items.push(item.clone());
        state.last_id = id;
        Ok(item)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Item>, RepositoryError> {
        let state = self.state.read();
        Ok(state.items.iter().find(|item| item.id() == id).cloned())
    }
}
