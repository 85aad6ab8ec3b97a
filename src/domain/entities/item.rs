use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::validation::Validation;

pub const ITEM_NAME_MAX_LENGTH: usize = 100;

/// Minimal demo entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: u64,
    name: String,
}

impl Item {
    pub fn new(id: u64, name: String) -> Self {
        Self { id, name }
    }

    /// Check an item name: 1..=100 characters, not whitespace-only
    pub fn validate_name(name: &str) -> Result<(), DomainError> {
        let invalid = || {
            DomainError::validation(
                "name",
                format!(
                    "Name must be between 1 and {} characters",
                    ITEM_NAME_MAX_LENGTH
                ),
            )
        };

        Validation::validate_not_empty(name, "name").map_err(|_| invalid())?;
        Validation::validate_length(name, "name", Some(1), Some(ITEM_NAME_MAX_LENGTH))
            .map_err(|_| invalid())
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(Item::validate_name("widget").is_ok());
        assert!(Item::validate_name(&"x".repeat(100)).is_ok());

        let too_long = "x".repeat(101);
        for bad in ["", "   ", too_long.as_str()] {
            let err = Item::validate_name(bad).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Validation error in field 'name': Name must be between 1 and 100 characters"
            );
        }
    }
}
