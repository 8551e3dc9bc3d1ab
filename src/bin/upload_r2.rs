use anyhow::Result;
use clap::Parser;
use r2_artifact_uploader::app::App;
use r2_artifact_uploader::cli::{init_tracing, UploadArgs};
use r2_artifact_uploader::models::png_tasks;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "upload_r2")]
#[command(about = "Upload matching PNG artifacts to R2 under fixed names")]
struct CliArgs {
    #[command(flatten)]
    upload: UploadArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = CliArgs::parse();

    let app = match App::new(args.upload.artifact_dir.clone(), None, args.upload.dry_run).await {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize uploader: {}", e);
            std::process::exit(1);
        }
    };

    let tasks = args.upload.resolve_tasks(png_tasks())?;
    info!("Loaded {} upload tasks", tasks.len());

    if let Err(e) = app.run(&tasks).await {
        error!("Upload run aborted: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
