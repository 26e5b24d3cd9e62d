//! Driving port for wardrobe mutations.

use async_trait::async_trait;

use crate::domain::{
    Category, Error, UploadedImage, UserId, WardrobeItem, WardrobeItemDetails, WardrobeItemId,
};

/// A validated upload: every required part is present by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddItemRequest {
    pub user_id: UserId,
    pub category: Category,
    pub image: UploadedImage,
    pub details: WardrobeItemDetails,
}

/// Use-case port for adding and removing wardrobe items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WardrobeCommand: Send + Sync {
    /// Store the image, then record the item that references it.
    async fn add_item(&self, request: AddItemRequest) -> Result<WardrobeItem, Error>;

    /// Delete the record, then remove its image on a best-effort basis.
    ///
    /// Fails with `not_found` when no item has that identifier.
    async fn delete_item(&self, id: &WardrobeItemId) -> Result<(), Error>;
}
