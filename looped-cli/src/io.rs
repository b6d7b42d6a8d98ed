//! File I/O for native CLI

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A file picked for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Read a file for upload
pub async fn read_upload(path: &str) -> Result<UploadFile> {
    let path = Path::new(path);
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload".to_string());

    Ok(UploadFile { file_name, bytes })
}

/// Get the ~/.looped directory path, creating it if needed
pub fn looped_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not find home directory")?;
    let looped_dir = home.join(".looped");

    if !looped_dir.exists() {
        fs::create_dir_all(&looped_dir)
            .with_context(|| format!("Failed to create {}", looped_dir.display()))?;
    }

    Ok(looped_dir)
}
