//! Driven port for image binaries.
//!
//! The store decides how names are generated. Callers only ever see the
//! [`BlobAddress`] handed back by [`BlobStore::put`].

use async_trait::async_trait;

use crate::domain::{BlobAddress, BlobName, StoredBlob, UploadedImage};

use super::define_port_error;

define_port_error! {
    /// Errors raised by blob store adapters.
    pub enum BlobStoreError {
        /// Filesystem or transport failure.
        Io { message: String } => "blob store i/o failed: {message}",
    }
}

/// Port for storing, reading, and removing uploaded images.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Durably store the image under a fresh name and return its address.
    ///
    /// Implementations must never overwrite an existing blob.
    async fn put(&self, image: &UploadedImage) -> Result<BlobAddress, BlobStoreError>;

    /// Read a blob for serving, or `None` when it does not exist.
    async fn open(&self, name: &BlobName) -> Result<Option<StoredBlob>, BlobStoreError>;

    /// Remove a blob, returning whether it existed.
    async fn remove(&self, address: &BlobAddress) -> Result<bool, BlobStoreError>;
}
