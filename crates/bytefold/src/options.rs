use core::{fmt, str::FromStr};

use crate::error::{FoldError, OptionsError};

/// Line terminator inserted at each fold boundary when no custom delimiter is
/// given.
///
/// Host configuration names it `LF`, `CR` or `CRLF`; the literal sequences
/// (`"\n"`, `"\r"`, `"\r\n"`) are accepted too.
///
/// # Default
///
/// [`Newline::Lf`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
pub enum Newline {
    /// A single line feed, `0x0A`.
    #[default]
    Lf,
    /// A single carriage return, `0x0D`.
    Cr,
    /// Carriage return followed by line feed.
    CrLf,
}

impl Newline {
    /// The raw bytes of this terminator.
    #[must_use]
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            Newline::Lf => b"\n",
            Newline::Cr => b"\r",
            Newline::CrLf => b"\r\n",
        }
    }

    /// The configuration name of this terminator.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Newline::Lf => "LF",
            Newline::Cr => "CR",
            Newline::CrLf => "CRLF",
        }
    }
}

impl fmt::Display for Newline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Newline {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "\n" => return Ok(Newline::Lf),
            "\r" => return Ok(Newline::Cr),
            "\r\n" => return Ok(Newline::CrLf),
            _ => {}
        }
        if s.eq_ignore_ascii_case("lf") {
            Ok(Newline::Lf)
        } else if s.eq_ignore_ascii_case("cr") {
            Ok(Newline::Cr)
        } else if s.eq_ignore_ascii_case("crlf") {
            Ok(Newline::CrLf)
        } else {
            Err(OptionsError::UnknownNewline(s.into()))
        }
    }
}

impl TryFrom<String> for Newline {
    type Error = OptionsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Configuration for folding one or more input streams.
///
/// # Examples
///
/// ```rust
/// use bytefold::{FoldOptions, Newline};
///
/// let options = FoldOptions {
///     newline: Newline::CrLf,
///     ..FoldOptions::new(80)
/// };
/// assert_eq!(options.delimiter(), b"\r\n");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct FoldOptions {
    /// Number of source bytes between two delimiter insertions.
    ///
    /// Required. Must be at least 1.
    pub fold_length: usize,

    /// Terminator inserted at each boundary.
    ///
    /// # Default
    ///
    /// [`Newline::Lf`]
    #[cfg_attr(feature = "serde", serde(default))]
    pub newline: Newline,
}

impl FoldOptions {
    /// Options folding every `fold_length` bytes with the default newline.
    #[must_use]
    pub const fn new(fold_length: usize) -> Self {
        Self {
            fold_length,
            newline: Newline::Lf,
        }
    }

    /// Build options from raw host configuration values.
    ///
    /// `newline` defaults to `LF` when absent.
    ///
    /// # Errors
    ///
    /// [`OptionsError::UnknownNewline`] for an unrecognized newline name and
    /// [`OptionsError::Fold`] when `fold_length` is zero.
    pub fn from_config(fold_length: usize, newline: Option<&str>) -> Result<Self, OptionsError> {
        let newline = newline.map_or(Ok(Newline::Lf), str::parse)?;
        let options = Self {
            fold_length,
            newline,
        };
        options.validate()?;
        Ok(options)
    }

    /// The delimiter bytes these options resolve to.
    #[must_use]
    pub const fn delimiter(&self) -> &'static [u8] {
        self.newline.as_bytes()
    }

    /// Reject options that cannot build a [`FoldReader`](crate::FoldReader).
    ///
    /// # Errors
    ///
    /// [`FoldError::ZeroFoldLength`] when `fold_length` is zero.
    pub const fn validate(&self) -> Result<(), FoldError> {
        if self.fold_length == 0 {
            return Err(FoldError::ZeroFoldLength);
        }
        Ok(())
    }
}
