use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::AppError;
use crate::storage::naming::{is_safe_file_name, photo_file_name};

/// A photo persisted under the upload root.
#[derive(Debug, Clone)]
pub struct StoredPhoto {
    pub file_name: String,
    pub path: PathBuf,
}

impl StoredPhoto {
    /// Public URL the photo is served from.
    pub fn url(&self) -> String {
        format!("/uploads/{}", self.file_name)
    }
}

/// Two flat directories addressed purely by file name.
#[derive(Debug, Clone)]
pub struct FileStore {
    upload_dir: PathBuf,
    report_dir: PathBuf,
}

impl FileStore {
    pub fn new(upload_dir: impl Into<PathBuf>, report_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            report_dir: report_dir.into(),
        }
    }

    /// Creates both directories if they are missing.
    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.upload_dir).await?;
        tokio::fs::create_dir_all(&self.report_dir).await?;
        info!(
            "Storage ready (uploads: {}, reports: {})",
            self.upload_dir.display(),
            self.report_dir.display()
        );
        Ok(())
    }

    pub fn report_path(&self, file_name: &str) -> PathBuf {
        self.report_dir.join(file_name)
    }

    /// Writes the photo bytes under a freshly generated unique name.
    pub async fn save_photo(
        &self,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<StoredPhoto, AppError> {
        let file_name = photo_file_name(original_name);
        let path = self.upload_dir.join(&file_name);
        tokio::fs::write(&path, bytes).await?;
        debug!("Stored photo {} ({} bytes)", path.display(), bytes.len());
        Ok(StoredPhoto { file_name, path })
    }

    pub async fn read_upload(&self, file_name: &str) -> Result<Vec<u8>, AppError> {
        read_flat(&self.upload_dir, file_name).await
    }

    pub async fn read_report(&self, file_name: &str) -> Result<Vec<u8>, AppError> {
        read_flat(&self.report_dir, file_name).await
    }
}

async fn read_flat(root: &Path, file_name: &str) -> Result<Vec<u8>, AppError> {
    if !is_safe_file_name(file_name) {
        return Err(AppError::NotFound(format!("File {file_name} not found")));
    }
    match tokio::fs::read(root.join(file_name)).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(AppError::NotFound(format!("File {file_name} not found")))
        }
        Err(e) => Err(AppError::Io(e)),
    }
}
