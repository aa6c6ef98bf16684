use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::PhotoUpload;
use crate::domain::user::ports::PhotoStorage;
use crate::user::errors::PhotoStorageError;

/// Stores profile photos on the local filesystem.
///
/// Files are named `<unix-millis>-photo<.ext>` inside `dir` and exposed
/// under `public_path`.
pub struct LocalPhotoStorage {
    dir: PathBuf,
    public_path: String,
}

impl LocalPhotoStorage {
    pub fn new(dir: impl Into<PathBuf>, public_path: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_path: public_path.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

#[async_trait]
impl PhotoStorage for LocalPhotoStorage {
    async fn store(&self, upload: PhotoUpload) -> Result<String, PhotoStorageError> {
        if upload.bytes.is_empty() {
            return Err(PhotoStorageError::EmptyUpload);
        }

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| PhotoStorageError::WriteFailed(e.to_string()))?;

        let file_name = format!(
            "{}-photo{}",
            Utc::now().timestamp_millis(),
            upload.extension().unwrap_or_default()
        );

        tokio::fs::write(self.dir.join(&file_name), &upload.bytes)
            .await
            .map_err(|e| PhotoStorageError::WriteFailed(e.to_string()))?;

        Ok(format!("{}/{}", self.public_path, file_name))
    }

    async fn remove(&self, public_path: &str) -> Result<(), PhotoStorageError> {
        let Some(file_name) = public_path
            .strip_prefix(&self.public_path)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|name| !name.is_empty() && !name.contains(['/', '\\']) && *name != "..")
        else {
            return Ok(());
        };

        match tokio::fs::remove_file(self.dir.join(file_name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PhotoStorageError::RemoveFailed(e.to_string())),
        }
    }
}
