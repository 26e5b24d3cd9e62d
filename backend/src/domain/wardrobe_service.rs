//! Wardrobe domain service.
//!
//! Binds uploaded images to item records. The blob is written first and the
//! record second; if the record cannot be written the blob is removed again
//! so a failed upload leaves nothing behind. Deletion removes the record
//! first and treats blob removal as best effort.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;

use crate::domain::ports::{
    AddItemRequest, BlobStore, BlobStoreError, WardrobeCommand, WardrobeItemRepository,
    WardrobeItemRepositoryError, WardrobeQuery,
};
use crate::domain::{
    BlobAddress, BlobName, CategorySummary, Error, StoredBlob, UserId, WardrobeFilter,
    WardrobeItem, WardrobeItemId,
};

/// Wardrobe service implementing [`WardrobeCommand`] and [`WardrobeQuery`].
#[derive(Clone)]
pub struct WardrobeService<R, B> {
    items: Arc<R>,
    blobs: Arc<B>,
    clock: Arc<dyn Clock>,
}

impl<R, B> WardrobeService<R, B> {
    pub fn new(items: Arc<R>, blobs: Arc<B>, clock: Arc<dyn Clock>) -> Self {
        Self {
            items,
            blobs,
            clock,
        }
    }
}

impl<R, B> WardrobeService<R, B>
where
    R: WardrobeItemRepository,
    B: BlobStore,
{
    fn map_repository_error(error: WardrobeItemRepositoryError) -> Error {
        match error {
            WardrobeItemRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("wardrobe repository unavailable: {message}"))
            }
            WardrobeItemRepositoryError::Query { message } => {
                Error::internal(format!("wardrobe repository error: {message}"))
            }
        }
    }

    fn map_blob_error(error: BlobStoreError) -> Error {
        match error {
            BlobStoreError::Io { message } => {
                Error::internal(format!("blob store error: {message}"))
            }
        }
    }

    /// Remove a blob whose record never made it to the repository.
    async fn discard_blob(&self, address: &BlobAddress) {
        if let Err(error) = self.blobs.remove(address).await {
            tracing::warn!(%address, %error, "failed to discard blob after insert failure");
        }
    }

    async fn release_blob(&self, item: &WardrobeItem) {
        match self.blobs.remove(&item.image_url).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(item_id = %item.id, address = %item.image_url, "image already missing");
            }
            Err(error) => {
                tracing::warn!(item_id = %item.id, address = %item.image_url, %error, "failed to remove image");
            }
        }
    }
}

#[async_trait]
impl<R, B> WardrobeCommand for WardrobeService<R, B>
where
    R: WardrobeItemRepository,
    B: BlobStore,
{
    async fn add_item(&self, request: AddItemRequest) -> Result<WardrobeItem, Error> {
        let AddItemRequest {
            user_id,
            category,
            image,
            details,
        } = request;

        let image_url = self
            .blobs
            .put(&image)
            .await
            .map_err(Self::map_blob_error)?;

        let item = WardrobeItem {
            id: WardrobeItemId::random(),
            user_id,
            image_url,
            category,
            details: details.normalised(),
            created_at: self.clock.utc(),
        };

        if let Err(error) = self.items.insert(&item).await {
            self.discard_blob(&item.image_url).await;
            return Err(Self::map_repository_error(error));
        }

        tracing::info!(item_id = %item.id, user_id = %item.user_id, "wardrobe item added");
        Ok(item)
    }

    async fn delete_item(&self, id: &WardrobeItemId) -> Result<(), Error> {
        let removed = self
            .items
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| {
                Error::not_found("wardrobe item not found")
                    .with_details(json!({ "itemId": id.to_string() }))
            })?;

        self.release_blob(&removed).await;
        tracing::info!(item_id = %removed.id, "wardrobe item deleted");
        Ok(())
    }
}

#[async_trait]
impl<R, B> WardrobeQuery for WardrobeService<R, B>
where
    R: WardrobeItemRepository,
    B: BlobStore,
{
    async fn list_items(
        &self,
        user_id: &UserId,
        filter: &WardrobeFilter,
    ) -> Result<Vec<WardrobeItem>, Error> {
        let items = self
            .items
            .list_by_user(user_id)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(filter.apply(items))
    }

    async fn category_summary(&self, user_id: &UserId) -> Result<CategorySummary, Error> {
        let items = self
            .items
            .list_by_user(user_id)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(CategorySummary::from_items(&items))
    }

    async fn image(&self, name: &BlobName) -> Result<StoredBlob, Error> {
        self.blobs
            .open(name)
            .await
            .map_err(Self::map_blob_error)?
            .ok_or_else(|| Error::not_found("image not found"))
    }
}

#[cfg(test)]
#[path = "wardrobe_service_tests.rs"]
mod tests;
