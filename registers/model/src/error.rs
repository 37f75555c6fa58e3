// Licensed under the Apache-2.0 license

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or elaborating a register model.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("cannot read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in '{path}'")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid TOML in '{path}'")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unsupported model document '{0}' (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),

    #[error("source file '{0}' not found in any include directory")]
    NotFound(PathBuf),

    #[error("elaboration error at {path}: {message}")]
    Elaboration { path: String, message: String },

    #[error("{0}")]
    Argument(String),
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;
