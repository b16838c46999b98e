use std::string::FromUtf8Error;

use thiserror::Error;

/// The markdown source could not be obtained.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Received HTTP status {status} from {location}")]
    Status {
        location: String,
        status: u16,
    },
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    #[error("Failed to read {location}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Markdown source is not valid utf-8")]
    NotUtf8(#[from] FromUtf8Error),
}

/// The conversion pipeline raised while processing available text.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to parse markdown in stage '{stage}'")]
    Stage {
        stage: &'static str,
        #[source]
        source: regex::Error,
    },
    #[error("Failed to decorate html")]
    Pattern(#[from] regex::Error),
    #[error("Markdown input is not valid utf-8")]
    NotUtf8(#[from] FromUtf8Error),
}
