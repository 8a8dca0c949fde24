use async_trait::async_trait;

use crate::model::error::BoxError;

pub mod gcs;
#[cfg(test)]
pub mod mock;
pub mod s3;

/// An opened local file and its length at open time.
pub struct FileBody {
    pub file: tokio::fs::File,
    pub len: u64,
}

/// Builds an authenticated storage client.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn ObjectWriter>, BoxError>;
}

#[async_trait]
pub trait ObjectWriter: Send + Sync {
    /// Streams `body` into `bucket/key`, failing if the object already exists.
    /// Returns the number of bytes sent.
    async fn put_object_if_absent(
        &self,
        bucket: &str,
        key: &str,
        body: FileBody,
    ) -> Result<u64, BoxError>;
}
