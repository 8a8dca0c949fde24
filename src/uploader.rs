use tokio::fs::File;
use tokio_util::sync::CancellationToken;
use tracing::{info, span, Instrument, Level};

use crate::{
    adapters::{Connector, FileBody},
    model::{error::UploadError, upload::UploadTarget},
};

/// Uploads one local file to one object, refusing to overwrite.
pub struct Uploader<C> {
    connector: C,
}

impl<C: Connector> Uploader<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    /// Runs the whole upload inside a scope derived from `shutdown`.
    ///
    /// The scope is cancelled when this returns, on success and on every
    /// error path. Cancelling `shutdown` while the copy is in flight drops
    /// the in-progress request and yields [`UploadError::Cancelled`].
    pub async fn upload(
        &self,
        target: &UploadTarget,
        shutdown: &CancellationToken,
    ) -> Result<u64, UploadError> {
        let scope = shutdown.child_token();
        let _scope_guard = scope.clone().drop_guard();

        let span = span!(
            Level::INFO,
            "upload",
            bucket = %target.bucket,
            key = %target.key,
            source = %target.source.display()
        );

        tokio::select! {
            biased;
            _ = scope.cancelled() => Err(UploadError::Cancelled),
            result = self.run(target).instrument(span) => result,
        }
    }

    async fn run(&self, target: &UploadTarget) -> Result<u64, UploadError> {
        info!("called");

        let client = self
            .connector
            .connect()
            .await
            .map_err(|source| UploadError::ClientInit { source })?;

        let local_file_error = |source| UploadError::LocalFile {
            path: target.source.display().to_string(),
            source,
        };

        let file = File::open(&target.source).await.map_err(local_file_error)?;
        let metadata = file.metadata().await.map_err(local_file_error)?;
        if metadata.is_dir() {
            return Err(local_file_error(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "is a directory",
            )));
        }

        let sent = client
            .put_object_if_absent(
                &target.bucket,
                &target.key,
                FileBody {
                    file,
                    len: metadata.len(),
                },
            )
            .await
            .map_err(|source| UploadError::Upload {
                bucket: target.bucket.clone(),
                key: target.key.clone(),
                source,
            })?;

        info!(bytes = sent, "uploaded");

        Ok(sent)
    }
}
