use std::sync::Arc;

use crate::application::dto::ItemDto;
use crate::application::errors::ItemUseCaseError;
use crate::application::ports::ItemRepository;
use crate::domain::entities::Item;

/// Use case for creating items
pub struct CreateItemUseCase {
    repository: Arc<dyn ItemRepository>,
}

impl CreateItemUseCase {
    pub fn new(repository: Arc<dyn ItemRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, name: String) -> Result<ItemDto, ItemUseCaseError> {
        Item::validate_name(&name)?;
        let item = self.repository.create(name).await?;
        Ok(item.into())
    }
}

/// Use case for fetching a single item
pub struct GetItemUseCase {
    repository: Arc<dyn ItemRepository>,
}

impl GetItemUseCase {
    pub fn new(repository: Arc<dyn ItemRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: u64) -> Result<ItemDto, ItemUseCaseError> {
        self.repository
            .find_by_id(id)
            .await?
            .map(ItemDto::from)
            .ok_or(ItemUseCaseError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockItemRepository;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_create_item_happy_path() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_create()
            .with(eq("widget".to_string()))
            .times(1)
            .returning(|name| Ok(Item::new(1, name)));

        let use_case = CreateItemUseCase::new(Arc::new(mock_repo));
        let dto = use_case.execute("widget".to_string()).await.unwrap();

        assert_eq!(dto, ItemDto { id: 1, name: "widget".to_string() });
    }

    #[tokio::test]
    async fn test_create_item_invalid_name_never_reaches_repository() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo.expect_create().times(0);

        let use_case = CreateItemUseCase::new(Arc::new(mock_repo));
        let err = use_case.execute(String::new()).await.unwrap_err();

        assert!(matches!(err, ItemUseCaseError::Domain(_)));
    }

    #[tokio::test]
    async fn test_get_item_not_found() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(999))
            .times(1)
            .returning(|_| Ok(None));

        let use_case = GetItemUseCase::new(Arc::new(mock_repo));
        let err = use_case.execute(999).await.unwrap_err();

        assert!(matches!(err, ItemUseCaseError::NotFound(999)));
    }
}
