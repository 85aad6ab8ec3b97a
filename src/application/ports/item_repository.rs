use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::RepositoryError;
use crate::domain::entities::Item;

/// Port for item persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Store a new item under the next free id
    async fn create(&self, name: String) -> Result<Item, RepositoryError>;

    /// Find item by ID
    async fn find_by_id(&self, id: u64) -> Result<Option<Item>, RepositoryError>;
}
