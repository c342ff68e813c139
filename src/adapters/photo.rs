use crate::domain::ports::PhotoStore;
use crate::utils::error::{PunchError, Result};
use std::path::{Component, Path, PathBuf};

/// Uploaded selfies on local disk, addressed by public URL
/// (`<url_prefix>/<file name>`).
#[derive(Debug, Clone)]
pub struct LocalPhotoStore {
    upload_dir: PathBuf,
    url_prefix: String,
}

impl LocalPhotoStore {
    pub fn new(upload_dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        let url_prefix: String = url_prefix.into();
        Self {
            upload_dir: upload_dir.into(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Maps a public photo URL to a path under the upload directory.
    pub fn resolve(&self, photo_url: &str) -> Result<PathBuf> {
        let relative = photo_url
            .strip_prefix(&self.url_prefix)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| PunchError::StorageError {
                message: format!(
                    "photo URL '{}' is not under '{}'",
                    photo_url, self.url_prefix
                ),
            })?;

        let relative = Path::new(relative);
        let escapes = relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_)));
        if relative.as_os_str().is_empty() || escapes {
            return Err(PunchError::StorageError {
                message: format!("photo URL '{}' escapes the upload directory", photo_url),
            });
        }

        Ok(self.upload_dir.join(relative))
    }
}

impl PhotoStore for LocalPhotoStore {
    async fn discard(&self, photo_url: &str) -> Result<()> {
        let path = self.resolve(photo_url)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            // already gone
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_discard_removes_uploaded_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("selfie-1700000000.jpg");
        std::fs::write(&file, b"jpeg").unwrap();

        let store = LocalPhotoStore::new(dir.path(), "/uploads/selfies/");
        store
            .discard("/uploads/selfies/selfie-1700000000.jpg")
            .await
            .unwrap();

        assert!(!file.exists());
    }

    #[tokio::test]
    async fn test_discard_missing_file_is_ok() {
        let dir = TempDir::new().unwrap();
        let store = LocalPhotoStore::new(dir.path(), "/uploads/selfies");
        assert!(store.discard("/uploads/selfies/gone.jpg").await.is_ok());
    }

    #[test]
    fn test_resolve_rejects_foreign_and_escaping_urls() {
        let store = LocalPhotoStore::new("/srv/uploads", "/uploads/selfies");

        assert_eq!(
            store.resolve("/uploads/selfies/a.png").unwrap(),
            PathBuf::from("/srv/uploads/a.png")
        );
        assert!(store.resolve("/static/a.png").is_err());
        assert!(store.resolve("/uploads/selfies/../../etc/passwd").is_err());
        assert!(store.resolve("/uploads/selfies/").is_err());
        assert!(store.resolve("/uploads/selfiesX/a.png").is_err());
    }
}
