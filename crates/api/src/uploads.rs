//! Local disk storage for uploaded files.
//!
//! Files land in the configured upload directory under a generated name and
//! are referenced from rows as `uploads/<name>`. The directory itself is
//! served read-only at `/uploads` by the router.

use std::path::{Path, PathBuf};

use khcrf_core::uploads::{is_safe_file_name, stored_file_name, validate_upload_extension, UploadKind};
use uuid::Uuid;

use crate::error::AppResult;
use crate::multipart::FilePart;

/// URL and stored-path prefix for uploaded files.
pub const UPLOAD_URL_PREFIX: &str = "uploads";

/// Writes uploads beneath one root directory.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory served at `/uploads`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate and write one file, returning its stored path.
    pub async fn save(&self, kind: UploadKind, file: &FilePart) -> AppResult<String> {
        let ext = validate_upload_extension(kind, &file.file_name)?;

        tokio::fs::create_dir_all(&self.root).await?;

        let name = stored_file_name(
            chrono::Utc::now().timestamp_millis(),
            &Uuid::new_v4().simple().to_string(),
            &ext,
        );
        tokio::fs::write(self.root.join(&name), &file.bytes).await?;

        tracing::debug!(file = %name, size = file.bytes.len(), "Upload stored");
        Ok(format!("{UPLOAD_URL_PREFIX}/{name}"))
    }

    /// Write every file in order. Files already written are removed again
    /// if a later one fails.
    pub async fn save_all(&self, kind: UploadKind, files: &[FilePart]) -> AppResult<Vec<String>> {
        // Reject bad extensions before touching the disk.
        for file in files {
            validate_upload_extension(kind, &file.file_name)?;
        }

        let mut stored = Vec::with_capacity(files.len());
        for file in files {
            match self.save(kind, file).await {
                Ok(path) => stored.push(path),
                Err(e) => {
                    self.discard(&stored).await;
                    return Err(e);
                }
            }
        }
        Ok(stored)
    }

    /// Best-effort removal of previously stored paths.
    pub async fn discard(&self, stored_paths: &[String]) {
        for stored in stored_paths {
            let Some(path) = self.path_for(stored) else {
                continue;
            };
            if let Err(e) = tokio::fs::remove_file(&path).await {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove upload");
            }
        }
    }

    /// On-disk location of a bare stored file name, or `None` when the name
    /// could escape the upload directory.
    pub fn resolve(&self, file_name: &str) -> Option<PathBuf> {
        is_safe_file_name(file_name).then(|| self.root.join(file_name))
    }

    /// On-disk location of a stored `uploads/<name>` path.
    fn path_for(&self, stored: &str) -> Option<PathBuf> {
        let name = stored
            .strip_prefix(UPLOAD_URL_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))?;
        self.resolve(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::body::Bytes;
    use khcrf_core::error::CoreError;

    use crate::error::AppError;

    fn part(file_name: &str, contents: &'static [u8]) -> FilePart {
        FilePart {
            file_name: file_name.to_string(),
            bytes: Bytes::from_static(contents),
        }
    }

    #[tokio::test]
    async fn saved_file_uses_generated_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());

        let stored = store
            .save(UploadKind::Pdf, &part("../../etc/passwd.PDF", b"%PDF-1.4"))
            .await
            .unwrap();

        let name = stored.strip_prefix("uploads/").unwrap();
        assert!(name.ends_with(".pdf"));
        assert!(!name.contains("passwd"));
        let on_disk = tokio::fs::read(dir.path().join(name)).await.unwrap();
        assert_eq!(on_disk, b"%PDF-1.4");
    }

    #[tokio::test]
    async fn disallowed_extension_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("nested"));

        let result = store
            .save_all(
                UploadKind::Image,
                &[part("a.png", b"ok"), part("shell.sh", b"#!")],
            )
            .await;

        assert_matches!(result, Err(AppError::Core(CoreError::Validation(_))));
        assert!(!dir.path().join("nested").exists());
    }

    #[tokio::test]
    async fn discard_removes_stored_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());
        let stored = store
            .save_all(UploadKind::Image, &[part("a.png", b"1"), part("b.webp", b"2")])
            .await
            .unwrap();

        store.discard(&stored).await;

        let remaining = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(remaining, 0);
    }

    #[test]
    fn resolve_rejects_traversal() {
        let store = UploadStore::new("uploads");
        assert!(store.resolve("../secret.pdf").is_none());
        assert!(store.resolve("a/b.pdf").is_none());
        assert_eq!(
            store.resolve("1-abc.pdf"),
            Some(PathBuf::from("uploads/1-abc.pdf"))
        );
    }
}
