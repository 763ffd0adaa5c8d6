//! Error types for settings, manifests, and identifier parsing.
//!
//! The region projection core never fails; these errors only surface from
//! the ambient layers around it.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A language id that is not part of the supported set.
    #[error("unknown language id: '{id}'")]
    UnknownLanguage { id: String },

    /// A region type other than template, script, style, or custom.
    #[error("unknown region type: '{name}'")]
    UnknownRegionType { name: String },

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `package.json` that could not be decoded.
    #[error("invalid package manifest '{}': {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid settings file '{}': {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
