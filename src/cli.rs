//! Command-line arguments and logging setup shared by both uploaders.

use crate::models::{load_tasks, UploadTask};
use crate::Result;
use clap::Args;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Directory holding the generated artifacts.
    #[arg(value_name = "DIR")]
    pub artifact_dir: PathBuf,

    /// JSON file of {"search", "new_name"} entries replacing the built-in list.
    #[arg(long, value_name = "FILE", conflicts_with = "task")]
    pub tasks: Option<PathBuf>,

    /// Inline task; may be repeated. Replaces the built-in list.
    #[arg(long = "task", value_name = "SEARCH=NEW_NAME", value_parser = parse_task_arg)]
    pub task: Vec<UploadTask>,

    /// Match and convert but keep uploads in memory.
    #[arg(long)]
    pub dry_run: bool,
}

impl UploadArgs {
    /// Tasks from `--tasks`, then `--task`, falling back to `defaults`.
    pub fn resolve_tasks(&self, defaults: Vec<UploadTask>) -> Result<Vec<UploadTask>> {
        if let Some(path) = &self.tasks {
            return load_tasks(path);
        }
        if !self.task.is_empty() {
            return Ok(self.task.clone());
        }
        Ok(defaults)
    }
}

pub fn parse_task_arg(input: &str) -> std::result::Result<UploadTask, String> {
    match input.split_once('=') {
        Some((search, new_name)) if !search.is_empty() && !new_name.is_empty() => {
            Ok(UploadTask::new(search, new_name))
        }
        _ => Err(format!(
            "Invalid task '{}'. Expected format: SEARCH=NEW_NAME",
            input
        )),
    }
}

const DEFAULT_LOG_FILTER: &str = "r2_artifact_uploader=info,upload_r2=info,upload_r2_webp=info";

pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
