use anyhow::Result;
use clap::Parser;
use r2_artifact_uploader::app::App;
use r2_artifact_uploader::cli::{init_tracing, UploadArgs};
use r2_artifact_uploader::image::{ImageService, WebpConverter, WEBP_QUALITY};
use r2_artifact_uploader::models::webp_tasks;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "upload_r2_webp")]
#[command(about = "Convert matching PNG artifacts to WebP and upload them to R2")]
struct CliArgs {
    #[command(flatten)]
    upload: UploadArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = CliArgs::parse();

    let converter: Box<dyn ImageService> = Box::new(WebpConverter::new());
    let app = match App::new(
        args.upload.artifact_dir.clone(),
        Some(converter),
        args.upload.dry_run,
    )
    .await
    {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize uploader: {}", e);
            std::process::exit(1);
        }
    };

    let tasks = args.upload.resolve_tasks(webp_tasks())?;
    info!(
        "Loaded {} upload tasks (WebP quality {})",
        tasks.len(),
        WEBP_QUALITY
    );

    if let Err(e) = app.run(&tasks).await {
        error!("Upload run aborted: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
