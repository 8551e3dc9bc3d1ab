use super::StorageService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedUpload {
    pub key: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// In-memory storage used by tests and `--dry-run`.
#[derive(Clone)]
pub struct MockStorageClient {
    uploads: Arc<Mutex<Vec<RecordedUpload>>>,
    failing_keys: Arc<Mutex<HashSet<String>>>,
    should_fail: Arc<Mutex<bool>>,
    public_url: String,
}

impl MockStorageClient {
    pub fn new() -> Self {
        Self {
            uploads: Arc::new(Mutex::new(Vec::new())),
            failing_keys: Arc::new(Mutex::new(HashSet::new())),
            should_fail: Arc::new(Mutex::new(false)),
            public_url: "https://mock-storage.example.com".to_string(),
        }
    }

    pub fn with_public_url(mut self, public_url: String) -> Self {
        self.public_url = public_url;
        self
    }

    /// Reject every upload.
    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    /// Reject uploads to a single key.
    pub fn with_failing_key(self, key: &str) -> Self {
        self.failing_keys.lock().unwrap().insert(key.to_string());
        self
    }

    pub fn get_upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn get_uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().unwrap().clone()
    }
}

impl Default for MockStorageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageService for MockStorageClient {
    async fn upload_file(&self, key: &str, data: &[u8], content_type: &str) -> Result<String> {
        if *self.should_fail.lock().unwrap() || self.failing_keys.lock().unwrap().contains(key) {
            return Err(Error::S3(format!("Mock failure uploading {}", key)));
        }

        self.uploads.lock().unwrap().push(RecordedUpload {
            key: key.to_string(),
            content_type: content_type.to_string(),
            data: data.to_vec(),
        });
        Ok(format!("{}/{}", self.public_url, key))
    }
}
