//! Object storage integration for publishing artifacts
//!
//! Uploads files to S3-compatible storage (Cloudflare R2) and hands back the
//! public URL each object is served from.

pub mod client;
pub mod mock;

pub use client::R2Client;
pub use mock::{MockStorageClient, RecordedUpload};

use crate::Result;
use async_trait::async_trait;
use std::path::Path;

#[async_trait]
pub trait StorageService: Send + Sync {
    /// Store `data` under `key` and return its public URL.
    async fn upload_file(&self, key: &str, data: &[u8], content_type: &str) -> Result<String>;

    async fn upload_path(&self, path: &Path, key: &str, content_type: &str) -> Result<String> {
        let data = tokio::fs::read(path).await?;
        self.upload_file(key, &data, content_type).await
    }
}
