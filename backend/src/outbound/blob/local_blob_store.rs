//! [`BlobStore`] over a single local directory.
//!
//! The directory is held as a capability (`cap_std::fs::Dir`), so every path
//! is resolved relative to it and cannot escape it. Filesystem calls block,
//! so they run on the blocking pool.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use uuid::Uuid;

use crate::domain::ports::{BlobStore, BlobStoreError};
use crate::domain::{BlobAddress, BlobName, StoredBlob, UploadedImage};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Blob store writing into one flat uploads directory.
#[derive(Clone)]
pub struct LocalBlobStore {
    dir: Arc<Dir>,
}

impl LocalBlobStore {
    /// Open `path`, creating it and any missing parents first.
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        Dir::create_ambient_dir_all(path, ambient_authority())?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self { dir: Arc::new(dir) })
    }

    /// Run blocking filesystem work against the directory.
    async fn with_dir<T, F>(&self, work: F) -> Result<T, BlobStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Dir) -> io::Result<T> + Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || work(&dir))
            .await
            .map_err(|err| BlobStoreError::io(format!("blocking task failed: {err}")))?
            .map_err(|err| BlobStoreError::io(err.to_string()))
    }
}

fn write_new(dir: &Dir, name: &str, bytes: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(name, &options)?;
    if let Err(error) = file.write_all(bytes).and_then(|()| file.sync_all()) {
        drop(file);
        // Leave no truncated blob behind.
        let _ = dir.remove_file(name);
        return Err(error);
    }
    Ok(())
}

fn read_if_present(dir: &Dir, name: &str) -> io::Result<Option<Vec<u8>>> {
    match dir.read(name) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error),
    }
}

fn remove_if_present(dir: &Dir, name: &str) -> io::Result<bool> {
    match dir.remove_file(name) {
        Ok(()) => Ok(true),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(error) => Err(error),
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, image: &UploadedImage) -> Result<BlobAddress, BlobStoreError> {
        let token = Uuid::new_v4().simple().to_string();
        let name = BlobName::generate(&token, image.file_name());
        let bytes = image.bytes().to_vec();
        let file_name = name.to_string();
        self.with_dir(move |dir| write_new(dir, &file_name, &bytes))
            .await?;
        tracing::debug!(blob = %name, size = image.bytes().len(), "blob stored");
        Ok(BlobAddress::from(name))
    }

    async fn open(&self, name: &BlobName) -> Result<Option<StoredBlob>, BlobStoreError> {
        let file_name = name.to_string();
        let content_type = mime_guess::from_path(name.as_ref())
            .first_raw()
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_owned();
        let bytes = self
            .with_dir(move |dir| read_if_present(dir, &file_name))
            .await?;
        Ok(bytes.map(|bytes| StoredBlob {
            bytes,
            content_type,
        }))
    }

    async fn remove(&self, address: &BlobAddress) -> Result<bool, BlobStoreError> {
        let file_name = address.name().to_string();
        self.with_dir(move |dir| remove_if_present(dir, &file_name))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn uploads() -> (TempDir, LocalBlobStore) {
        let temp = tempfile::tempdir().expect("create temp dir");
        let store = LocalBlobStore::new(temp.path().join("uploads")).expect("open store");
        (temp, store)
    }

    fn image(name: &str) -> UploadedImage {
        UploadedImage::new(name, b"\x89PNG fake".to_vec()).expect("valid image")
    }

    #[rstest]
    #[tokio::test]
    async fn put_writes_under_a_generated_name(uploads: (TempDir, LocalBlobStore)) {
        let (temp, store) = uploads;
        let address = store.put(&image("red dress.png")).await.expect("put");

        let name = address.name().as_ref().to_owned();
        assert!(address.to_string().starts_with("/uploads/"));
        assert!(name.ends_with("-red_dress.png"));
        let on_disk = std::fs::read(temp.path().join("uploads").join(&name)).expect("read file");
        assert_eq!(on_disk, b"\x89PNG fake");
    }

    #[rstest]
    #[tokio::test]
    async fn identical_uploads_get_distinct_names(uploads: (TempDir, LocalBlobStore)) {
        let (_temp, store) = uploads;
        let first = store.put(&image("shirt.jpg")).await.expect("first put");
        let second = store.put(&image("shirt.jpg")).await.expect("second put");
        assert_ne!(first, second);
    }

    #[rstest]
    #[tokio::test]
    async fn open_guesses_content_type(uploads: (TempDir, LocalBlobStore)) {
        let (_temp, store) = uploads;
        let address = store.put(&image("shirt.png")).await.expect("put");

        let blob = store
            .open(address.name())
            .await
            .expect("open")
            .expect("blob present");
        assert_eq!(blob.content_type, "image/png");
        assert_eq!(blob.bytes, b"\x89PNG fake");
    }

    #[rstest]
    #[tokio::test]
    async fn open_unknown_extension_falls_back(uploads: (TempDir, LocalBlobStore)) {
        let (_temp, store) = uploads;
        let address = store.put(&image("scan.zzzq")).await.expect("put");
        let blob = store
            .open(address.name())
            .await
            .expect("open")
            .expect("blob present");
        assert_eq!(blob.content_type, FALLBACK_CONTENT_TYPE);
    }

    #[rstest]
    #[tokio::test]
    async fn open_missing_blob_is_none(uploads: (TempDir, LocalBlobStore)) {
        let (_temp, store) = uploads;
        let name = BlobName::new("nothing-here.jpg").expect("valid name");
        assert!(store.open(&name).await.expect("open").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn remove_reports_whether_the_blob_existed(uploads: (TempDir, LocalBlobStore)) {
        let (_temp, store) = uploads;
        let address = store.put(&image("shirt.jpg")).await.expect("put");

        assert!(store.remove(&address).await.expect("first remove"));
        assert!(!store.remove(&address).await.expect("second remove"));
        assert!(store.open(address.name()).await.expect("open").is_none());
    }
}
