//! Data models and structures
//!
//! Defines upload tasks, matched artifacts, per-task outcomes and the
//! storage configuration shared by both uploaders.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub const ENV_ACCESS_KEY_ID: &str = "R2_ACCESS_KEY_ID";
pub const ENV_SECRET_ACCESS_KEY: &str = "R2_SECRET_ACCESS_KEY";
pub const ENV_ACCOUNT_ID: &str = "R2_ACCOUNT_ID";
pub const ENV_BUCKET_NAME: &str = "R2_BUCKET_NAME";
pub const ENV_PUBLIC_URL: &str = "R2_PUBLIC_URL";

/// Every variable a run needs, in the order they are reported when missing.
pub const REQUIRED_ENV_VARS: [&str; 5] = [
    ENV_ACCESS_KEY_ID,
    ENV_SECRET_ACCESS_KEY,
    ENV_ACCOUNT_ID,
    ENV_BUCKET_NAME,
    ENV_PUBLIC_URL,
];

/// A filename fragment to look for and the object key to upload it under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTask {
    pub search: String,
    pub new_name: String,
}

impl UploadTask {
    pub fn new(search: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            new_name: new_name.into(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.search.trim().is_empty() {
            return Err(Error::InvalidTask(format!(
                "empty search for '{}'",
                self.new_name
            )));
        }
        if self.new_name.trim().is_empty() {
            return Err(Error::InvalidTask(format!(
                "empty new_name for '{}'",
                self.search
            )));
        }
        Ok(())
    }
}

/// Infographics uploaded as-is by `upload_r2`.
pub fn png_tasks() -> Vec<UploadTask> {
    vec![
        UploadTask::new(
            "image_copyright_infographic",
            "infographic-copyright-fair-use.png",
        ),
        UploadTask::new(
            "web_performance_infographic",
            "infographic-image-optimization.png",
        ),
        UploadTask::new(
            "reverse_image_search_infographic",
            "infographic-reverse-image-search.png",
        ),
        UploadTask::new(
            "social_media_sizes_infographic",
            "infographic-social-media-sizes.png",
        ),
        UploadTask::new(
            "image_file_formats_infographic",
            "infographic-file-formats.png",
        ),
    ]
}

/// Blog images converted to WebP by `upload_r2_webp`.
pub fn webp_tasks() -> Vec<UploadTask> {
    vec![
        UploadTask::new("bulk_upload_featured", "blog-bulk-upload-featured.webp"),
        UploadTask::new("bulk_upload_steps", "blog-bulk-upload-steps.webp"),
        UploadTask::new("bulk_upload_usecases", "blog-bulk-upload-usecases.webp"),
        UploadTask::new("bulk_upload_comparison", "blog-bulk-upload-comparison.webp"),
    ]
}

/// Parse a JSON array of `{"search": ..., "new_name": ...}` objects.
pub fn parse_tasks(json: &str) -> Result<Vec<UploadTask>> {
    let tasks: Vec<UploadTask> = serde_json::from_str(json)?;
    if tasks.is_empty() {
        return Err(Error::InvalidTask("task list is empty".to_string()));
    }
    for task in &tasks {
        task.validate()?;
    }
    Ok(tasks)
}

pub fn load_tasks(path: &Path) -> Result<Vec<UploadTask>> {
    let json = std::fs::read_to_string(path)?;
    parse_tasks(&json)
}

/// The directory entry chosen for a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedFile {
    pub name: String,
    pub path: PathBuf,
}

/// How a single task's pipeline ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Uploaded { key: String, url: String },
    NotFound,
    ConversionFailed,
    UploadFailed,
}

impl TaskOutcome {
    pub fn is_uploaded(&self) -> bool {
        matches!(self, TaskOutcome::Uploaded { .. })
    }
}

// Configuration
#[derive(Clone)]
pub struct StorageConfig {
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    pub public_url: String,
}

impl StorageConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any variable source.
    ///
    /// Empty values count as missing. All missing names are reported at
    /// once rather than stopping at the first.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let values =
            REQUIRED_ENV_VARS.map(|name| lookup(name).filter(|value| !value.trim().is_empty()));

        let missing: Vec<String> = REQUIRED_ENV_VARS
            .iter()
            .zip(&values)
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| name.to_string())
            .collect();

        let [
            Some(access_key_id),
            Some(secret_access_key),
            Some(account_id),
            Some(bucket),
            Some(public_url),
        ] = values
        else {
            return Err(Error::MissingEnv(missing));
        };

        Ok(Self {
            endpoint: r2_endpoint(&account_id),
            access_key_id,
            secret_access_key,
            bucket,
            public_url: public_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn public_url_for(&self, key: &str) -> String {
        format!("{}/{}", self.public_url, key)
    }
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("endpoint", &self.endpoint)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("bucket", &self.bucket)
            .field("public_url", &self.public_url)
            .finish()
    }
}

pub fn r2_endpoint(account_id: &str) -> String {
    format!("https://{}.r2.cloudflarestorage.com", account_id)
}
