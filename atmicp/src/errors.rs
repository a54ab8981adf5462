use std::error::Error as StdError;
use std::result;

use thiserror::Error;

pub type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    /// A selector passed to the assembler is outside its allowed domain.
    #[error("invalid {parameter}: {message}")]
    InvalidSelection {
        parameter: &'static str,
        message: String,
    },

    /// A file group could not be located or read.
    #[error("failed to load {target}: {source}")]
    Load { target: String, source: BoxError },

    /// The catalog tables disagree with each other.
    #[error("configuration fault: {0}")]
    ConfigurationFault(String),

    #[error("unable to read catalog: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("no such variable: {0}")]
    MissingVariable(String),

    #[error("no such coordinate: {0}")]
    MissingCoordinate(String),

    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("cannot concatenate: {0}")]
    Concat(String),
}

impl Error {
    pub(crate) fn invalid<S: Into<String>>(parameter: &'static str, message: S) -> Self {
        Self::InvalidSelection {
            parameter,
            message: message.into(),
        }
    }

    /// Wrap an underlying I/O or decoding error as a load failure for `target`.
    ///
    pub fn load<T, E>(target: T, source: E) -> Self
    where
        T: Into<String>,
        E: Into<BoxError>,
    {
        Self::Load {
            target: target.into(),
            source: source.into(),
        }
    }

    pub fn is_invalid_selection(&self) -> bool {
        matches!(self, Self::InvalidSelection { .. })
    }

    pub fn is_load_failure(&self) -> bool {
        matches!(self, Self::Load { .. })
    }

    pub fn is_configuration_fault(&self) -> bool {
        matches!(self, Self::ConfigurationFault(_))
    }
}

pub type Result<T> = result::Result<T, Error>;
