//! Build errors
//!
//! Every variant is fatal: the build stops at the first one. Messages name
//! the failing file; the underlying cause is exposed through `source()`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building the site
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid front matter in {path:?}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("layout `{layout}` not found (expected {path:?})")]
    MissingLayout { layout: String, path: PathBuf },

    #[error("failed to load layouts from {path:?}")]
    Layouts {
        path: PathBuf,
        #[source]
        source: tera::Error,
    },

    #[error("failed to render layout `{layout}`")]
    Template {
        layout: String,
        #[source]
        source: tera::Error,
    },

    #[error("failed to write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path:?}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to walk directory")]
    Walk(#[from] walkdir::Error),

    #[error("failed to highlight code")]
    Highlight(#[from] syntect::Error),
}

/// Result alias for build operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Write {
            path: path.into(),
            source,
        }
    }
}
