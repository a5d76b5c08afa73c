use std::{io, path::PathBuf};

use thiserror::Error;

/// Why a single resource fetch failed.
///
/// The `Display` text is what ends up in the failure diagnostic next to the
/// resource url.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("empty resource locator")]
    EmptySource,
    #[error("invalid resource locator `{src}`: {source}")]
    InvalidUrl {
        src: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported url scheme `{0}`")]
    UnsupportedScheme(String),
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} cannot be expressed as a file url", .0.display())]
    NotAbsolute(PathBuf),
    #[error("malformed data url: {0}")]
    DataUrl(String),
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[cfg(feature = "http")]
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("loader exited before reporting an outcome")]
    Disconnected,
}
