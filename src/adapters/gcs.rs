use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use async_trait::async_trait;
use futures::TryStreamExt;
use google_cloud_storage::{
    client::{google_cloud_auth::credentials::CredentialsFile, Client, ClientConfig},
    http::objects::upload::{Media, UploadObjectRequest, UploadType},
};
use tokio_util::io::ReaderStream;
use tracing::warn;

use crate::{
    adapters::{Connector, FileBody, ObjectWriter},
    model::{error::BoxError, upload::Credentials},
};

/// `ifGenerationMatch=0` only succeeds when no live object has the name.
const DOES_NOT_EXIST: i64 = 0;

pub struct GcsConnector {
    credentials: Credentials,
}

impl GcsConnector {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl Connector for GcsConnector {
    async fn connect(&self) -> Result<Box<dyn ObjectWriter>, BoxError> {
        let config = match &self.credentials {
            Credentials::Ambient => ClientConfig::default().with_auth().await?,
            Credentials::File(path) => {
                let file =
                    CredentialsFile::new_from_file(path.to_string_lossy().into_owned()).await?;
                ClientConfig::default().with_credentials(file).await?
            }
        };

        Ok(Box::new(Client::new(config)))
    }
}

#[async_trait]
impl ObjectWriter for Client {
    async fn put_object_if_absent(
        &self,
        bucket: &str,
        key: &str,
        body: FileBody,
    ) -> Result<u64, BoxError> {
        let req = UploadObjectRequest {
            bucket: bucket.to_string(),
            if_generation_match: Some(DOES_NOT_EXIST),
            ..Default::default()
        };

        let mut media = Media::new(key.to_string());
        media.content_length = Some(body.len);

        let sent = Arc::new(AtomicU64::new(0));
        let counter = sent.clone();
        let stream = ReaderStream::new(body.file).inspect_ok(move |chunk| {
            counter.fetch_add(chunk.len() as u64, Ordering::Relaxed);
        });

        // A simple media upload only commits once the whole body arrived, so
        // a failed copy leaves no object behind.
        match self
            .upload_streamed_object(&req, stream, &UploadType::Simple(media))
            .await
        {
            Err(google_cloud_storage::http::Error::Response(err))
                if err.code == 412 =>
            {
                warn!(bucket = bucket, key = key, "object already exists");
                Err(google_cloud_storage::http::Error::Response(err).into())
            }
            Err(err) => Err(err.into()),
            Ok(_) => Ok(sent.load(Ordering::Relaxed)),
        }
    }
}
