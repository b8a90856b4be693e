//! File attachments sent as multipart parts

use std::path::Path;
use reqwest::multipart::Part;
use crate::utils::errors::{TicketdeskError, Result};
use crate::utils::helpers::mime_for_file;

/// A file read into memory for upload
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read a file from disk, keeping only its base name for the upload
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| TicketdeskError::InvalidInput(format!("Not a file path: {}", path.display())))?
            .to_string();
        let bytes = tokio::fs::read(path).await?;

        Ok(Self { file_name, bytes })
    }

    pub fn into_part(self) -> Result<Part> {
        let mime = mime_for_file(&self.file_name);
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(mime)
            .map_err(TicketdeskError::Http)
    }
}
