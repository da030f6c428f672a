//! File storage service for uploaded registration cards and homepage images.
//!
//! Files live under the configured storage root and are served back through
//! the `/uploads` static route. The database keeps only relative paths, so
//! the root can move between deployments.

use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

use shared::crypto::random_hex;

use crate::config::StorageConfig;
use crate::error::ApiError;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Rejected before any write: wrong type, too large or a bad name.
    #[error("{0}")]
    InvalidFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidFile(msg) => ApiError::validation(msg),
            StorageError::Io(e) => ApiError::Internal(format!("Storage error: {}", e)),
        }
    }
}

/// Service for storing and removing uploaded files.
#[derive(Debug, Clone)]
pub struct StorageService {
    root: PathBuf,
    max_card_size_bytes: usize,
    max_image_size_bytes: usize,
}

impl StorageService {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            root: PathBuf::from(&config.root),
            max_card_size_bytes: config.max_card_size_bytes as usize,
            max_image_size_bytes: config.max_image_size_bytes as usize,
        }
    }

    /// Directory that static file serving should expose.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stores an uploaded registration card PDF.
    ///
    /// The file keeps its original name under `cards/{registration_id}/`,
    /// so re-uploading the same name overwrites the previous content.
    /// Returns the relative path stored in the database.
    pub async fn save_registration_card(
        &self,
        registration_id: Uuid,
        file_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<String, StorageError> {
        if !content_type.contains("pdf") {
            return Err(StorageError::InvalidFile(
                "Dozwolone są tylko pliki PDF".to_string(),
            ));
        }
        self.check_size(data.len(), self.max_card_size_bytes)?;

        let file_name = sanitize_file_name(file_name)?;
        let relative = format!("cards/{}/{}", registration_id, file_name);
        self.write(&relative, data).await?;
        Ok(relative)
    }

    /// Stores an uploaded homepage image under a random name.
    ///
    /// Returns the relative path stored in the database.
    pub async fn save_homepage_image(
        &self,
        section_id: Uuid,
        content_type: &str,
        data: &[u8],
    ) -> Result<String, StorageError> {
        if !content_type.starts_with("image/") {
            return Err(StorageError::InvalidFile(
                "Dozwolone są tylko pliki graficzne".to_string(),
            ));
        }
        self.check_size(data.len(), self.max_image_size_bytes)?;

        let extension = image_extension(content_type);
        let relative = format!("homepage/{}/{}.{}", section_id, random_hex(8), extension);
        self.write(&relative, data).await?;
        Ok(relative)
    }

    /// Removes a stored file by its relative path.
    ///
    /// A file that is already gone is not an error; the database row is the
    /// source of truth and the handler proceeds to delete it either way.
    pub async fn delete_file(&self, relative_path: &str) -> Result<(), StorageError> {
        let full_path = self.resolve(relative_path)?;
        match tokio::fs::remove_file(&full_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %relative_path, "File already removed from storage");
                Ok(())
            }
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn check_size(&self, size: usize, max: usize) -> Result<(), StorageError> {
        if size > max {
            return Err(StorageError::InvalidFile(format!(
                "Maksymalny rozmiar pliku to {}MB",
                max / (1024 * 1024)
            )));
        }
        Ok(())
    }

    async fn write(&self, relative_path: &str, data: &[u8]) -> Result<(), StorageError> {
        let full_path = self.resolve(relative_path)?;
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full_path, data).await?;
        Ok(())
    }

    /// Joins a relative path onto the root, rejecting traversal segments.
    fn resolve(&self, relative_path: &str) -> Result<PathBuf, StorageError> {
        if relative_path.split('/').any(|segment| segment == "..") {
            return Err(StorageError::InvalidFile(
                "Nieprawidłowa ścieżka pliku".to_string(),
            ));
        }
        Ok(self.root.join(relative_path))
    }
}

/// Keeps only the final path component of an uploaded file name.
fn sanitize_file_name(file_name: &str) -> Result<String, StorageError> {
    let name = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        return Err(StorageError::InvalidFile(
            "Nieprawidłowa nazwa pliku".to_string(),
        ));
    }

    Ok(name.to_string())
}

/// Picks a file extension for an image content type.
fn image_extension(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        _ => "img",
    }
}
