//! Disk storage for dish images.
//!
//! Files live flat under the upload directory and are referenced from the
//! database as `/uploads/<filename>`, the same path the static file service
//! exposes them under.

use std::path::{Path, PathBuf};

use axum::body::Bytes;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Maximum accepted image size (5MB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// URL prefix under which stored images are served.
pub const PUBLIC_PREFIX: &str = "/uploads/";

/// An image received in a multipart request, not yet written to disk.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl ImageUpload {
    pub fn validate(&self) -> AppResult<()> {
        let is_image = self
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("image/"));
        if !is_image {
            return Err(AppError::BadRequest(
                "Only image files are allowed (jpg, jpeg, png, gif)".into(),
            ));
        }
        if self.data.is_empty() {
            return Err(AppError::BadRequest("Empty file provided".into()));
        }
        if self.data.len() > MAX_IMAGE_BYTES {
            return Err(AppError::BadRequest(format!(
                "File too large. Maximum size is {}MB",
                MAX_IMAGE_BYTES / 1024 / 1024
            )));
        }
        Ok(())
    }

    /// Lower-cased extension of the original file name, if it has a sane one.
    fn extension(&self) -> Option<String> {
        self.file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|ext| ext.to_ascii_lowercase())
    }
}

#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_root(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Validates and writes the upload under a fresh unique name and returns
    /// the public reference to store on the dish.
    pub async fn save(&self, upload: &ImageUpload) -> AppResult<String> {
        upload.validate()?;

        let filename = match upload.extension() {
            Some(ext) => format!("plato-{}.{ext}", Uuid::new_v4()),
            None => format!("plato-{}", Uuid::new_v4()),
        };

        self.ensure_root()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create upload dir: {e}")))?;
        tokio::fs::write(self.root.join(&filename), &upload.data)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to save image: {e}")))?;

        tracing::debug!(file = %filename, size = upload.data.len(), "image stored");
        Ok(format!("{PUBLIC_PREFIX}{filename}"))
    }

    /// Best-effort removal of a previously stored image. Failures are logged,
    /// never returned.
    pub async fn remove(&self, reference: &str) {
        let Some(path) = self.path_for(reference) else {
            tracing::warn!(reference, "refusing to remove image outside upload dir");
            return;
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::debug!(path = %path.display(), "image removed"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => tracing::warn!(error = %err, path = %path.display(), "image cleanup failed"),
        }
    }

    /// Maps a stored reference back to a file path. Only plain file names
    /// directly under the upload dir are accepted.
    pub fn path_for(&self, reference: &str) -> Option<PathBuf> {
        let name = reference.strip_prefix(PUBLIC_PREFIX)?;
        let valid = !name.is_empty()
            && !name.contains(['/', '\\'])
            && name != "."
            && name != "..";
        valid.then(|| self.root.join(name))
    }
}
