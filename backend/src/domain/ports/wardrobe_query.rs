//! Driving port for wardrobe reads, including image retrieval.

use async_trait::async_trait;

use crate::domain::{
    BlobName, CategorySummary, Error, StoredBlob, UserId, WardrobeFilter, WardrobeItem,
};

/// Use-case port for reading wardrobe content.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WardrobeQuery: Send + Sync {
    /// The user's items matching `filter`, newest first. Empty when the user
    /// has none.
    async fn list_items(
        &self,
        user_id: &UserId,
        filter: &WardrobeFilter,
    ) -> Result<Vec<WardrobeItem>, Error>;

    /// Item counts per category for the user.
    async fn category_summary(&self, user_id: &UserId) -> Result<CategorySummary, Error>;

    /// Read a stored image, failing with `not_found` when it is missing.
    async fn image(&self, name: &BlobName) -> Result<StoredBlob, Error>;
}
