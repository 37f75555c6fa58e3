// Licensed under the Apache-2.0 license

use crate::template::TemplateError;
use thiserror::Error;

/// Errors raised while building or emitting the component tree.
#[derive(Error, Debug)]
pub enum Error {
    /// A required generation parameter is missing or invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("unknown synthesis task '{0}'")]
    UnknownSynthesisTask(String),

    /// A node could not be constructed from the given attributes.
    #[error("{0}")]
    Validation(String),

    #[error("cannot resolve template '{key}'")]
    TemplateResolution {
        key: String,
        #[source]
        source: TemplateError,
    },

    #[error("cannot render template '{key}'")]
    TemplateRender {
        key: String,
        #[source]
        source: TemplateError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
