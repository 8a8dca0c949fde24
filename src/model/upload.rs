use std::path::PathBuf;

/// Where a local file goes and where it comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadTarget {
    pub bucket: String,
    pub key: String,
    pub source: PathBuf,
}

impl UploadTarget {
    pub fn new(bucket: &str, key: &str, source: impl Into<PathBuf>) -> Self {
        Self {
            bucket: bucket.to_string(),
            key: key.to_string(),
            source: source.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provider {
    Gcs,
    S3,
}

/// How a connector obtains the identity it uploads as.
///
/// `Ambient` leaves discovery to the SDK: `GOOGLE_APPLICATION_CREDENTIALS` or
/// application default credentials for GCS, the default provider chain for S3.
/// `File` names a credentials file explicitly (service account JSON for GCS,
/// shared credentials file for S3).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Credentials {
    #[default]
    Ambient,
    File(PathBuf),
}
