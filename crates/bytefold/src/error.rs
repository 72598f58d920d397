use std::io;

use thiserror::Error;

/// Reasons a [`FoldReader`](crate::FoldReader) refuses to be constructed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FoldError {
    /// The delimiter inserted at each fold boundary was empty.
    #[error("delimiter must contain at least one byte")]
    EmptyDelimiter,
    /// A fold length of zero leaves no boundary to insert at.
    #[error("fold length must be at least 1")]
    ZeroFoldLength,
}

impl From<FoldError> for io::Error {
    fn from(err: FoldError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}

/// Errors raised while reading [`FoldOptions`](crate::FoldOptions) from
/// host configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// The `newline` option named something other than `LF`, `CR` or `CRLF`.
    #[error("unknown newline '{0}', expected one of LF, CR, CRLF")]
    UnknownNewline(String),
    /// The options themselves are valid text but describe an unusable fold.
    #[error(transparent)]
    Fold(#[from] FoldError),
}
