use async_trait::async_trait;
use aws_credential_types::provider::ProvideCredentials;
use aws_runtime::env_config::file::{EnvConfigFileKind, EnvConfigFiles};
use aws_sdk_s3::primitives::ByteStream;
use aws_smithy_types::byte_stream::Length;

use crate::{
    adapters::{Connector, FileBody, ObjectWriter},
    model::{error::BoxError, upload::Credentials},
};

pub struct S3Connector {
    credentials: Credentials,
}

impl S3Connector {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl Connector for S3Connector {
    async fn connect(&self) -> Result<Box<dyn ObjectWriter>, BoxError> {
        let loader = match &self.credentials {
            Credentials::Ambient => aws_config::from_env(),
            // Keep ~/.aws/config in play so region and profile settings match
            // ambient discovery; only the credentials file is replaced.
            Credentials::File(path) => aws_config::from_env().profile_files(
                EnvConfigFiles::builder()
                    .with_file(EnvConfigFileKind::Credentials, path)
                    .include_default_config_file(true)
                    .build(),
            ),
        };
        let config = loader.load().await;

        // The SDK resolves credentials lazily; resolve them here so a missing
        // identity fails before the local file is touched.
        let provider = config
            .credentials_provider()
            .ok_or("no AWS credentials provider configured")?;
        provider.provide_credentials().await?;

        Ok(Box::new(aws_sdk_s3::Client::new(&config)))
    }
}

#[async_trait]
impl ObjectWriter for aws_sdk_s3::Client {
    async fn put_object_if_absent(
        &self,
        bucket: &str,
        key: &str,
        body: FileBody,
    ) -> Result<u64, BoxError> {
        let len = body.len;
        let stream = ByteStream::read_from()
            .file(body.file)
            .length(Length::Exact(len))
            .build()
            .await?;

        self.put_object()
            .bucket(bucket)
            .key(key)
            .if_none_match("*")
            .content_length(len as i64)
            .body(stream)
            .send()
            .await?;

        Ok(len)
    }
}
