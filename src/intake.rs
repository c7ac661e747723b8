//! Document intake
//!
//! Gates documents on size and media type before their text reaches the
//! scanner. Only text formats are read locally; PDFs and images need an
//! external extraction service and are refused here.

use crate::config::IntakeConfig;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Media type used when the extension is unknown
pub const OCTET_STREAM: &str = "application/octet-stream";

/// A document accepted for scanning
#[derive(Debug, Clone)]
pub struct Document {
    /// Source path
    pub path: PathBuf,
    /// Media type inferred from the extension
    pub media_type: &'static str,
    /// UTF-8 text content
    pub text: String,
}

/// Media type for a path, by extension.
pub fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("txt") | Some("log") => "text/plain",
        Some("md") | Some("markdown") => "text/markdown",
        Some("csv") => "text/csv",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        _ => OCTET_STREAM,
    }
}

fn is_text_type(media_type: &str) -> bool {
    media_type.starts_with("text/") || media_type == "application/json"
}

/// Size and type gate in front of the scanner
#[derive(Debug, Clone)]
pub struct Intake {
    max_file_size: u64,
    allowed_types: Vec<String>,
}

impl Intake {
    /// Create an intake gate from configuration
    pub fn new(config: &IntakeConfig) -> Self {
        Self {
            max_file_size: config.max_file_size,
            allowed_types: config.allowed_types.clone(),
        }
    }

    /// Check a document's size and media type.
    pub fn check(&self, len: u64, media_type: &str) -> Result<()> {
        if len > self.max_file_size {
            return Err(Error::Intake(format!(
                "File size {} exceeds the maximum limit of {} bytes",
                len, self.max_file_size
            )));
        }
        if !self.allowed_types.iter().any(|t| t == media_type) {
            return Err(Error::Intake(format!(
                "Invalid file type '{}'",
                media_type
            )));
        }
        if !is_text_type(media_type) {
            return Err(Error::Intake(format!(
                "'{}' requires external text extraction",
                media_type
            )));
        }
        Ok(())
    }

    /// Read and gate a single document.
    pub async fn read_document(&self, path: impl AsRef<Path>) -> Result<Document> {
        let path = path.as_ref();
        let media_type = media_type_for(path);
        let metadata = tokio::fs::metadata(path).await?;
        self.check(metadata.len(), media_type)?;

        let bytes = tokio::fs::read(path).await?;
        let text = String::from_utf8(bytes).map_err(|_| {
            Error::Intake(format!("{} is not valid UTF-8", path.display()))
        })?;

        tracing::debug!(path = %path.display(), media_type, bytes = text.len(), "Document accepted");

        Ok(Document {
            path: path.to_path_buf(),
            media_type,
            text,
        })
    }

    /// Read plain text from a stream, stopping one byte past the size limit.
    pub async fn read_stream<R: AsyncRead + Unpin>(&self, reader: R) -> Result<String> {
        let mut bytes = Vec::new();
        reader
            .take(self.max_file_size.saturating_add(1))
            .read_to_end(&mut bytes)
            .await?;
        self.check(bytes.len() as u64, "text/plain")?;

        String::from_utf8(bytes).map_err(|_| Error::Intake("Input is not valid UTF-8".to_string()))
    }

    /// Read documents concurrently; results keep input order.
    pub async fn read_documents<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<Result<Document>> {
        futures::future::join_all(paths.iter().map(|p| self.read_document(p))).await
    }
}
