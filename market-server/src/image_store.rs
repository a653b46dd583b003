//! On-disk image store
//!
//! Uploaded images are saved as `<sha256(base name)>.jpg`, where the base name
//! is the uploaded filename up to its first `.`. Files are write-once: a second
//! upload that derives the same name leaves the first file in place.
//!
//! Reads fall back to `default.jpg` in the same directory.

use sha2::{Digest, Sha256};
use shared::error::{AppError, ErrorCode};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::ServiceResult;

/// Fallback served when a requested image is missing
pub const DEFAULT_IMAGE: &str = "default.jpg";

/// The only accepted image suffix (case-sensitive)
const JPG_SUFFIX: &str = ".jpg";

/// Derive the storage key for an uploaded filename.
///
/// Hashes the UTF-8 bytes of the text before the first `.`, so `cat.jpg` and
/// `cat.v2.jpg` share a key.
pub fn image_key(filename: &str) -> String {
    let base = filename.split('.').next().unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(base.as_bytes());
    hex::encode(hasher.finalize())
}

/// Reject anything that is not a bare file name (path traversal)
fn ensure_plain_name(filename: &str) -> Result<(), AppError> {
    if filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains('/')
        || filename.contains('\\')
    {
        return Err(AppError::new(ErrorCode::InvalidFilename).with_detail("filename", filename));
    }
    Ok(())
}

/// A directory of write-once JPEG files
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the directory if needed and warn when there is no fallback image
    pub async fn init(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        if !tokio::fs::try_exists(self.dir.join(DEFAULT_IMAGE)).await? {
            tracing::warn!(
                dir = %self.dir.display(),
                "No {} in image store, missing images will answer 404",
                DEFAULT_IMAGE
            );
        }
        Ok(())
    }

    /// Save an upload under its derived name and return that name.
    ///
    /// Write failures (including an existing file with the same name) are
    /// logged and do not fail the request; the returned name is valid either way.
    pub async fn store_upload(&self, original_filename: &str, data: &[u8]) -> Result<String, AppError> {
        if !original_filename.ends_with(JPG_SUFFIX) {
            return Err(AppError::new(ErrorCode::InvalidFileExtension)
                .with_detail("filename", original_filename));
        }

        let filename = format!("{}{}", image_key(original_filename), JPG_SUFFIX);

        match self.write_new(&filename, data).await {
            Ok(()) => {
                tracing::info!(
                    original_name = %original_filename,
                    filename = %filename,
                    size = data.len(),
                    "Image stored"
                );
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::info!(
                    original_name = %original_filename,
                    filename = %filename,
                    "Image already exists, keeping existing file"
                );
            }
            Err(e) => {
                tracing::warn!(
                    original_name = %original_filename,
                    filename = %filename,
                    error = %e,
                    "New image could not be created"
                );
            }
        }

        Ok(filename)
    }

    async fn write_new(&self, filename: &str, data: &[u8]) -> std::io::Result<()> {
        let path = self.dir.join(filename);
        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        write_or_discard(&path, file, data).await
    }

    /// Read an image by file name, serving `default.jpg` when it is missing
    pub async fn load(&self, filename: &str) -> ServiceResult<Vec<u8>> {
        if !filename.ends_with(JPG_SUFFIX) {
            return Err(AppError::with_message(
                ErrorCode::InvalidFileExtension,
                "Image path does not end with .jpg",
            )
            .with_detail("filename", filename)
            .into());
        }
        ensure_plain_name(filename)?;

        let mut path = self.dir.join(filename);
        if !tokio::fs::try_exists(&path).await? {
            tracing::debug!(path = %path.display(), "Image not found, serving default");
            path = self.dir.join(DEFAULT_IMAGE);
        }

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(AppError::new(ErrorCode::ImageNotFound)
                    .with_detail("filename", filename)
                    .into())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Write `data` to a freshly created file, removing the file if the write fails.
///
/// A truncated file would otherwise shadow every later upload with the same name.
async fn write_or_discard<W>(path: &Path, mut writer: W, data: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let written = match writer.write_all(data).await {
        Ok(()) => writer.flush().await,
        Err(e) => Err(e),
    };
    drop(writer);

    if let Err(e) = written {
        if let Err(remove_err) = tokio::fs::remove_file(path).await {
            tracing::warn!(
                path = %path.display(),
                error = %remove_err,
                "Failed to remove partially written image"
            );
        }
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    async fn store() -> (tempfile::TempDir, ImageStore) {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore::new(tmp.path().join("images"));
        store.init().await.unwrap();
        (tmp, store)
    }

    fn app_code(err: ServiceError) -> ErrorCode {
        let app: AppError = err.into();
        app.code
    }

    #[test]
    fn test_image_key_uses_base_name() {
        assert_eq!(image_key("cat.jpg"), image_key("cat.v2.jpg"));
        assert_ne!(image_key("cat.jpg"), image_key("dog.jpg"));
        // sha256("cat")
        assert_eq!(
            image_key("cat.jpg"),
            "77af778b51abd4a3c51c5ddd97204a9c3ae614ebccb75a606c3b6865aed6744e"
        );
    }

    #[tokio::test]
    async fn test_store_upload_rejects_non_jpg() {
        let (_tmp, store) = store().await;
        let err = store.store_upload("cat.png", b"png").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFileExtension);

        let err = store.store_upload("cat.JPG", b"jpg").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFileExtension);
    }

    #[tokio::test]
    async fn test_store_upload_is_write_once() {
        let (_tmp, store) = store().await;

        let first = store.store_upload("cat.jpg", b"first").await.unwrap();
        let second = store.store_upload("cat.jpg", b"second").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first, format!("{}.jpg", image_key("cat.jpg")));

        let bytes = store.load(&first).await.unwrap();
        assert_eq!(bytes, b"first");
    }

    #[tokio::test]
    async fn test_load_falls_back_to_default() {
        let (_tmp, store) = store().await;
        tokio::fs::write(store.dir().join(DEFAULT_IMAGE), b"default")
            .await
            .unwrap();

        let bytes = store.load("missing.jpg").await.unwrap();
        assert_eq!(bytes, b"default");
    }

    #[tokio::test]
    async fn test_load_without_default_is_not_found() {
        let (_tmp, store) = store().await;
        let err = store.load("missing.jpg").await.unwrap_err();
        assert_eq!(app_code(err), ErrorCode::ImageNotFound);
    }

    /// Writer that fails every write, like a full disk
    struct FailingWriter;

    impl AsyncWrite for FailingWriter {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &[u8],
        ) -> Poll<std::io::Result<usize>> {
            Poll::Ready(Err(std::io::Error::other("no space left")))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_file() {
        let (_tmp, store) = store().await;
        let filename = format!("{}.jpg", image_key("cat.jpg"));
        let path = store.dir().join(&filename);
        tokio::fs::write(&path, b"trunc").await.unwrap();

        assert!(write_or_discard(&path, FailingWriter, b"full image").await.is_err());
        assert!(!tokio::fs::try_exists(&path).await.unwrap());

        // the name is free again for the next upload
        let stored = store.store_upload("cat.jpg", b"full image").await.unwrap();
        assert_eq!(stored, filename);
        assert_eq!(store.load(&filename).await.unwrap(), b"full image");
    }

    #[tokio::test]
    async fn test_load_accepts_dotted_plain_names() {
        let (_tmp, store) = store().await;
        tokio::fs::write(store.dir().join(DEFAULT_IMAGE), b"default")
            .await
            .unwrap();

        assert_eq!(store.load("cat..jpg").await.unwrap(), b"default");
        assert_eq!(store.load("..jpg").await.unwrap(), b"default");
    }

    #[tokio::test]
    async fn test_load_rejects_bad_names() {
        let (_tmp, store) = store().await;

        let err = store.load("notes.txt").await.unwrap_err();
        assert_eq!(app_code(err), ErrorCode::InvalidFileExtension);

        let err = store.load("../secret.jpg").await.unwrap_err();
        assert_eq!(app_code(err), ErrorCode::InvalidFilename);
    }
}
