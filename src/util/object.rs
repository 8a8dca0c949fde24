use crate::model::{error::BoxError, upload::Provider};

/// Resolves the service from a bucket argument. Bare bucket names are served by GCS.
pub fn parse_provider_from_uri(bucket_uri: &str) -> Result<Provider, BoxError> {
    match bucket_uri.split_once("://") {
        None => Ok(Provider::Gcs),
        Some(("gs", _)) => Ok(Provider::Gcs),
        Some(("s3", _)) => Ok(Provider::S3),
        Some(_) => Err(format!("failed to parse provider of: {}", bucket_uri).into()),
    }
}

pub fn parse_bucket_from_uri(bucket_uri: &str) -> &str {
    bucket_uri
        .split_once("://")
        .map(|(_, rest)| rest.trim_end_matches('/'))
        .unwrap_or(bucket_uri)
}
