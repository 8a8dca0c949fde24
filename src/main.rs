use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, span, Instrument, Level};
use tracing_subscriber::EnvFilter;

use crate::{
    adapters::{gcs::GcsConnector, s3::S3Connector},
    model::{
        error::UploadError,
        upload::{Credentials, Provider, UploadTarget},
    },
    uploader::Uploader,
};

mod adapters;
mod model;
mod uploader;
mod util;

/// Upload a local file to an object-storage bucket without overwriting an existing object.
#[derive(Parser, Debug)]
#[command(name = "objectput", version, about, long_about = None)]
struct Cli {
    /// Destination bucket: `gs://name`, `s3://name`, or a bare GCS bucket name
    bucket: String,

    /// Destination object key inside the bucket
    object: String,

    /// Local file to upload
    source: PathBuf,

    /// Credentials file to use instead of the ambient environment
    #[arg(long, value_name = "FILE")]
    credentials: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let span = span!(Level::INFO, "main", context = "main");
    match run(cli).instrument(span).await {
        Err(err) => {
            error!(error_message = %err.report(), error_group = err.group());
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

async fn run(cli: Cli) -> Result<u64, UploadError> {
    info!(bucket = %cli.bucket, object = %cli.object, source = %cli.source.display(), "args");

    let provider = util::object::parse_provider_from_uri(&cli.bucket)
        .map_err(|source| UploadError::ClientInit { source })?;
    let bucket = util::object::parse_bucket_from_uri(&cli.bucket);
    let target = UploadTarget::new(bucket, &cli.object, cli.source);
    let credentials = cli.credentials.map_or(Credentials::Ambient, Credentials::File);

    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested");
            trigger.cancel();
        }
    });

    let sent = match provider {
        Provider::Gcs => {
            Uploader::new(GcsConnector::new(credentials))
                .upload(&target, &shutdown)
                .await?
        }
        Provider::S3 => {
            Uploader::new(S3Connector::new(credentials))
                .upload(&target, &shutdown)
                .await?
        }
    };

    info!(bytes = sent, "done");

    Ok(sent)
}
