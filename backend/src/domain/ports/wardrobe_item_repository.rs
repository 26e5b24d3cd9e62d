//! Driven port for wardrobe item persistence.

use async_trait::async_trait;

use crate::domain::{UserId, WardrobeItem, WardrobeItemId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by wardrobe item repository adapters.
    pub enum WardrobeItemRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "wardrobe repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "wardrobe repository query failed: {message}",
    }
}

/// Port for wardrobe item storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WardrobeItemRepository: Send + Sync {
    /// Persist a newly created item.
    async fn insert(&self, item: &WardrobeItem) -> Result<(), WardrobeItemRepositoryError>;

    /// All items owned by `user_id`, newest first.
    ///
    /// Items sharing a creation timestamp are ordered by descending id so the
    /// order is stable across calls.
    async fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<WardrobeItem>, WardrobeItemRepositoryError>;

    /// Remove an item, returning the removed record or `None` when no item
    /// has that identifier.
    async fn delete(
        &self,
        id: &WardrobeItemId,
    ) -> Result<Option<WardrobeItem>, WardrobeItemRepositoryError>;
}
