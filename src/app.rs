//! Application orchestration for matching, converting and publishing artifacts.

use crate::image::ImageService;
use crate::matcher::{ArtifactListing, PNG_EXTENSION};
use crate::models::{MatchedFile, StorageConfig, TaskOutcome, UploadTask};
use crate::storage::{MockStorageClient, R2Client, StorageService};
use crate::Result;
use std::path::PathBuf;
use tracing::{error, info, warn};

pub const PNG_CONTENT_TYPE: &str = "image/png";

/// Runs each upload task in order against one artifact directory.
pub struct App {
    storage: Box<dyn StorageService>,
    converter: Option<Box<dyn ImageService>>,
    artifact_dir: PathBuf,
}

/// Injectable service bundle used to construct [`App`].
pub struct AppServices {
    pub storage: Box<dyn StorageService>,
    /// When set, matched files are converted before upload and the converted
    /// copy is removed afterwards.
    pub converter: Option<Box<dyn ImageService>>,
}

impl App {
    /// Build an app from concrete service dependencies.
    ///
    /// This is primarily useful for tests that need to inject mocks.
    pub fn with_services(services: AppServices, artifact_dir: PathBuf) -> Self {
        Self {
            storage: services.storage,
            converter: services.converter,
            artifact_dir,
        }
    }

    /// Construct an app from environment configuration (`StorageConfig::from_env`).
    ///
    /// Fails before touching the artifact directory or the network when any
    /// required variable is missing.
    pub async fn new(
        artifact_dir: PathBuf,
        converter: Option<Box<dyn ImageService>>,
        dry_run: bool,
    ) -> Result<Self> {
        let config = StorageConfig::from_env()?;

        let storage: Box<dyn StorageService> = if dry_run {
            info!("Dry run enabled - uploads will be skipped");
            Box::new(MockStorageClient::new().with_public_url(config.public_url.clone()))
        } else {
            info!(
                "Uploading to bucket {} via {}",
                config.bucket, config.endpoint
            );
            Box::new(R2Client::new(&config).await)
        };

        Ok(Self::with_services(
            AppServices { storage, converter },
            artifact_dir,
        ))
    }

    /// Process every task and return one outcome per task, in order.
    ///
    /// Missing files, failed conversions and failed uploads are logged and
    /// recorded. An unreadable artifact directory or a failed cleanup of a
    /// converted file stops the run with an error.
    pub async fn run(&self, tasks: &[UploadTask]) -> Result<Vec<TaskOutcome>> {
        match self.converter {
            Some(_) => info!("Starting WebP conversion and upload..."),
            None => info!("Starting upload..."),
        }

        let listing = ArtifactListing::read(&self.artifact_dir)?;
        if listing.is_empty() {
            warn!("{} is empty", self.artifact_dir.display());
        } else {
            info!(
                "Found {} entries in {}",
                listing.len(),
                self.artifact_dir.display()
            );
        }

        let mut outcomes = Vec::with_capacity(tasks.len());
        for task in tasks {
            let outcome = match listing.find(&task.search, PNG_EXTENSION) {
                Some(matched) => self.process(task, &matched).await?,
                None => {
                    warn!("Could not find file matching {}", task.search);
                    TaskOutcome::NotFound
                }
            };
            outcomes.push(outcome);
        }

        let uploaded = outcomes.iter().filter(|o| o.is_uploaded()).count();
        info!("Done. {}/{} uploaded", uploaded, tasks.len());
        Ok(outcomes)
    }

    async fn process(&self, task: &UploadTask, matched: &MatchedFile) -> Result<TaskOutcome> {
        match &self.converter {
            Some(converter) => self.convert_and_upload(converter.as_ref(), task, matched).await,
            None => Ok(self.upload_direct(task, matched).await),
        }
    }

    async fn upload_direct(&self, task: &UploadTask, matched: &MatchedFile) -> TaskOutcome {
        info!("Uploading {} as {}...", matched.name, task.new_name);

        match self
            .storage
            .upload_path(&matched.path, &task.new_name, PNG_CONTENT_TYPE)
            .await
        {
            Ok(url) => {
                info!("Success! URL: {}", url);
                TaskOutcome::Uploaded {
                    key: task.new_name.clone(),
                    url,
                }
            }
            Err(e) => {
                error!("Failed to upload {}: {}", matched.name, e);
                TaskOutcome::UploadFailed
            }
        }
    }

    async fn convert_and_upload(
        &self,
        converter: &dyn ImageService,
        task: &UploadTask,
        matched: &MatchedFile,
    ) -> Result<TaskOutcome> {
        info!("Processing {}...", matched.name);

        let converted = match converter.convert(&matched.path).await {
            Ok(path) => path,
            Err(e) => {
                error!("Failed to convert {}: {}", matched.name, e);
                return Ok(TaskOutcome::ConversionFailed);
            }
        };
        info!("Converted to {}", converted.display());

        info!("Uploading {}...", task.new_name);
        let url = match self
            .storage
            .upload_path(&converted, &task.new_name, converter.content_type())
            .await
        {
            Ok(url) => url,
            Err(e) => {
                error!("Failed to upload {}: {}", matched.name, e);
                warn!("Leaving {} in place", converted.display());
                return Ok(TaskOutcome::UploadFailed);
            }
        };
        info!("Success! URL: {}", url);

        tokio::fs::remove_file(&converted).await.map_err(|e| {
            error!("Failed to remove {}: {}", converted.display(), e);
            e
        })?;

        Ok(TaskOutcome::Uploaded {
            key: task.new_name.clone(),
            url,
        })
    }
}
