use std::path::{Path, PathBuf};

use osgb_decode::DecodeError;
use thiserror::Error;

/// Errors from loading or scanning scene files.
#[derive(Debug, Error)]
pub enum Error {
    #[error("can't open: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

impl Error {
    /// The file the error concerns, when known.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io { path, .. } | Self::Decode { path, .. } => Some(path),
            Self::Walk(err) => err.path(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
