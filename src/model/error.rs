use std::error::Error as StdError;

pub type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(thiserror::Error, Debug)]
pub enum UploadError {
    #[error("failed to create storage client")]
    ClientInit {
        #[source]
        source: BoxError,
    },

    #[error("failed to open local file for reading: {path}")]
    LocalFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to upload local file to {bucket}/{key}")]
    Upload {
        bucket: String,
        key: String,
        #[source]
        source: BoxError,
    },

    #[error("upload cancelled")]
    Cancelled,
}

impl UploadError {
    /// Short tag for the `error_group` log field.
    pub fn group(&self) -> &'static str {
        match self {
            UploadError::ClientInit { .. } => "client_init",
            UploadError::LocalFile { .. } => "local_file",
            UploadError::Upload { .. } => "upload",
            UploadError::Cancelled => "cancelled",
        }
    }

    /// The whole cause chain on one line.
    pub fn report(&self) -> String {
        let mut message = self.to_string();
        let mut cause = self.source();
        while let Some(err) = cause {
            message.push_str(": ");
            message.push_str(&err.to_string());
            cause = err.source();
        }

        message
    }
}
