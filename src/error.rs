use thiserror::Error;

#[derive(Error, Debug)]
pub enum MagnetizeError {
    #[error("malformed bencoding at byte {offset}: {reason}")]
    MalformedEncoding { offset: usize, reason: String },

    #[error("unexpected end of input at byte {offset}")]
    UnexpectedEnd { offset: usize },

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' is not {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("invalid tracker URI '{uri}': {reason}")]
    InvalidTrackerUri { uri: String, reason: url::ParseError },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MagnetizeError>;
