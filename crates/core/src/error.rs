use leon::{ParseError, RenderError};
use thiserror::Error;

use crate::level::OutputLevel;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Terminal error: {}", _0)]
    Terminal(#[from] std::io::Error),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error parsing output format: {}", .0)]
    Parse(#[from] ParseError),

    #[error("Error rendering output format: {}", .0)]
    Render(#[from] RenderError),

    #[error("Output sinks disagree on `{}`: expected {:?}, a sink holds {:?}", .field, .expected, .found)]
    LevelMismatch {
        field: &'static str,
        expected: OutputLevel,
        found: OutputLevel,
    },

    #[error("Waiting for input was cancelled.")]
    InputCancelled,

    #[error("No module named `{}` is registered.", .0)]
    UnknownModule(String),

    #[error("Misc error: {}", .0)]
    Misc(String),
}

impl Error {
    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    pub fn level_mismatch(field: &'static str, expected: OutputLevel, found: OutputLevel) -> Self {
        Self::LevelMismatch {
            field,
            expected,
            found,
        }
    }
}
