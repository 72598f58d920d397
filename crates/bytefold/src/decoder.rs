use std::io;

use crate::{
    error::FoldError,
    fold::FoldReader,
    options::FoldOptions,
    source::StreamSource,
};

/// Folds every stream of a [`StreamSource`] with the same options.
///
/// Options are checked once, when the decoder is built, so opening a source
/// never fails on configuration.
///
/// # Examples
///
/// ```rust
/// use std::io::{Cursor, Read};
///
/// use bytefold::{FoldDecoder, FoldOptions, IterSource, StreamSource};
///
/// let decoder = FoldDecoder::new(FoldOptions::new(2))?;
/// let mut folded = decoder.open(IterSource::new([Cursor::new("abc"), Cursor::new("de")]));
///
/// let mut out = String::new();
/// while let Some(mut stream) = folded.open_next()? {
///     stream.read_to_string(&mut out)?;
/// }
/// folded.close()?;
/// assert_eq!(out, "ab\ncde\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FoldDecoder {
    options: FoldOptions,
}

impl FoldDecoder {
    /// Build a decoder from validated `options`.
    ///
    /// # Errors
    ///
    /// [`FoldError::ZeroFoldLength`] if `options.fold_length` is zero.
    pub fn new(options: FoldOptions) -> Result<Self, FoldError> {
        options.validate()?;
        Ok(Self { options })
    }

    /// The options every opened stream is folded with.
    #[must_use]
    pub const fn options(&self) -> &FoldOptions {
        &self.options
    }

    /// Wrap `source` so each stream it opens comes out folded.
    pub fn open<S: StreamSource>(&self, source: S) -> FoldedSource<S> {
        log::debug!(
            "folding streams every {} bytes with {}",
            self.options.fold_length,
            self.options.newline
        );
        FoldedSource {
            source,
            options: self.options,
            opened: 0,
        }
    }
}

/// A [`StreamSource`] whose streams are each wrapped in a fresh
/// [`FoldReader`].
#[derive(Debug)]
pub struct FoldedSource<S> {
    source: S,
    options: FoldOptions,
    opened: usize,
}

impl<S> FoldedSource<S> {
    /// Number of streams opened so far.
    #[must_use]
    pub const fn opened(&self) -> usize {
        self.opened
    }

    /// Unwrap the underlying source.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: StreamSource> StreamSource for FoldedSource<S> {
    type Stream = FoldReader<S::Stream>;

    fn open_next(&mut self) -> io::Result<Option<Self::Stream>> {
        let Some(stream) = self.source.open_next()? else {
            log::debug!("no more streams after {}", self.opened);
            return Ok(None);
        };
        self.opened += 1;
        log::trace!("folding stream #{}", self.opened);
        Ok(Some(FoldReader::with_options(stream, &self.options)?))
    }

    fn close(self) -> io::Result<()> {
        log::debug!("closing source after {} streams", self.opened);
        self.source.close()
    }
}
