// Upload store: uploaded text files live on disk only for the duration of one request

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("No file uploaded")]
    Missing,

    #[error("Only plain text files are supported")]
    NotText,

    #[error("File must be UTF-8 encoded text")]
    NotUtf8,

    #[error("Uploaded file is empty")]
    Empty,

    #[error("Upload storage error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub async fn init(dir: impl Into<PathBuf>) -> Result<Self, UploadError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        info!("Upload directory ready at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes the upload, reads it back as text and removes it again.
    pub async fn ingest(&self, filename: &str, bytes: &[u8]) -> Result<String, UploadError> {
        if bytes.is_empty() {
            return Err(UploadError::Empty);
        }

        let path = self
            .dir
            .join(format!("{}-{}", Uuid::new_v4(), sanitize_filename(filename)));
        tokio::fs::write(&path, bytes).await?;

        let read_back = tokio::fs::read(&path).await;
        if let Err(e) = tokio::fs::remove_file(&path).await {
            warn!("Failed to remove upload {}: {}", path.display(), e);
        }

        let text = String::from_utf8(read_back?).map_err(|_| UploadError::NotUtf8)?;
        if text.trim().is_empty() {
            return Err(UploadError::Empty);
        }
        Ok(text)
    }
}

pub fn is_text_file(filename: &str, content_type: Option<&str>) -> bool {
    let by_extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("txt"))
        .unwrap_or(false);
    let by_mime = content_type
        .map(|ct| ct.trim().to_ascii_lowercase().starts_with("text/"))
        .unwrap_or(false);
    by_extension || by_mime
}

fn sanitize_filename(filename: &str) -> String {
    let name: String = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if name.is_empty() {
        "upload".to_string()
    } else {
        name
    }
}
