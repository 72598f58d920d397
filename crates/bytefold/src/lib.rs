//! Streaming byte folding.
//!
//! [`FoldReader`] wraps any [`std::io::Read`] and inserts a delimiter after
//! every N source bytes. N counts raw bytes, not characters or lines, so a
//! multi-byte character that straddles a boundary is split by the delimiter.
//!
//! [`FoldDecoder`] applies the same fold to every stream of a
//! [`StreamSource`], one fresh reader per stream.
//!
//! ```rust
//! use std::io::{BufRead, BufReader};
//!
//! use bytefold::FoldReader;
//!
//! let folded = FoldReader::with_newline(&b"12345"[..], 3)?;
//! let lines: Vec<String> = BufReader::new(folded).lines().collect::<Result<_, _>>()?;
//! assert_eq!(lines, ["123", "45"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

mod decoder;
mod error;
mod fold;
mod options;
mod source;

#[cfg(test)]
mod tests;

pub use decoder::{FoldDecoder, FoldedSource};
pub use error::{FoldError, OptionsError};
pub use fold::FoldReader;
pub use options::{FoldOptions, Newline};
pub use source::{FileSource, IterSource, StreamSource, for_each_stream};
