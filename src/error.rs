use std::path::PathBuf;

/// Failures of a single lookup run, one variant per pipeline stage.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("fetching page {url}: {reason}")]
    Network { url: String, reason: String },
    #[error("{marker} not found in page body")]
    PatternNotFound { marker: &'static str },
    #[error("decoding embedded page data: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("no dictionary entry for \"{0}\"")]
    NoEntry(String),
    #[error("downloading {url} to {}: {reason}", path.display())]
    MediaDownload {
        url: String,
        path: PathBuf,
        reason: String,
    },
    #[error("writing csv {}: {reason}", path.display())]
    CsvWrite { path: PathBuf, reason: String },
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Only media failures can be absorbed by dropping a single card.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::MediaDownload { .. })
    }

    pub fn stage(&self) -> &'static str {
        match self {
            Error::Network { .. } => "fetch",
            Error::PatternNotFound { .. } => "extract",
            Error::Decode(_) => "decode",
            Error::NoEntry(_) => "flatten",
            Error::MediaDownload { .. } => "media",
            Error::CsvWrite { .. } => "csv",
            Error::Config(_) => "config",
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(error: config::ConfigError) -> Self {
        Error::Config(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
