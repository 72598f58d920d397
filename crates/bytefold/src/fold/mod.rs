use core::{fmt, num::NonZeroU64};
use std::io::{self, Read};

use bstr::BStr;

use crate::{error::FoldError, options::FoldOptions};

mod state;

use state::FoldState;

/// A reader that inserts a delimiter after every `fold_length` source bytes.
///
/// Folding counts raw bytes. It knows nothing about the encoding of the
/// source, so a multi-byte character that straddles a boundary is split by the
/// delimiter.
///
/// A trailing delimiter follows the last source byte when the source length is
/// an exact multiple of `fold_length`.
///
/// Every read takes `&mut self`: a `FoldReader` is driven by one caller at a
/// time.
///
/// # Examples
///
/// ```rust
/// use std::io::Read;
///
/// use bytefold::FoldReader;
///
/// let mut reader = FoldReader::new(&b"123456"[..], 3, "789")?;
/// let mut out = String::new();
/// reader.read_to_string(&mut out)?;
/// assert_eq!(out, "123789456789");
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct FoldReader<R> {
    inner: R,
    fold_length: NonZeroU64,
    delimiter: Box<[u8]>,
    state: FoldState,
}

impl<R: Read> FoldReader<R> {
    /// Wrap `inner`, inserting `delimiter` after every `fold_length` bytes.
    ///
    /// # Errors
    ///
    /// [`FoldError::EmptyDelimiter`] if `delimiter` is empty, otherwise
    /// [`FoldError::ZeroFoldLength`] if `fold_length` is zero.
    pub fn new(
        inner: R,
        fold_length: usize,
        delimiter: impl Into<Vec<u8>>,
    ) -> Result<Self, FoldError> {
        let delimiter = delimiter.into().into_boxed_slice();
        if delimiter.is_empty() {
            return Err(FoldError::EmptyDelimiter);
        }
        let fold_length = NonZeroU64::new(fold_length as u64).ok_or(FoldError::ZeroFoldLength)?;
        log::trace!(
            "folding every {fold_length} bytes with delimiter {:?}",
            BStr::new(&delimiter)
        );
        Ok(Self {
            inner,
            fold_length,
            delimiter,
            state: FoldState::default(),
        })
    }

    /// Wrap `inner`, inserting a line feed after every `fold_length` bytes.
    ///
    /// # Errors
    ///
    /// [`FoldError::ZeroFoldLength`] if `fold_length` is zero.
    pub fn with_newline(inner: R, fold_length: usize) -> Result<Self, FoldError> {
        Self::new(inner, fold_length, b"\n".as_slice())
    }

    /// Wrap `inner` as described by `options`.
    ///
    /// # Errors
    ///
    /// [`FoldError::ZeroFoldLength`] if `options.fold_length` is zero.
    pub fn with_options(inner: R, options: &FoldOptions) -> Result<Self, FoldError> {
        Self::new(inner, options.fold_length, options.delimiter())
    }

    /// Read the next byte of the folded stream.
    ///
    /// Returns `Ok(None)` once the source is exhausted and no delimiter is in
    /// flight. A delimiter byte is never reported as the end of the stream,
    /// even when the source has no bytes left.
    ///
    /// # Errors
    ///
    /// Any error from the source, unchanged. The fold position is left as it
    /// was before the call, so the read can be retried.
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        if self.state.is_exhausted() {
            return Ok(None);
        }
        if self.state.at_boundary(self.fold_length) {
            return Ok(Some(self.state.emit_delimiter(&self.delimiter)));
        }

        let mut byte = [0u8; 1];
        let n = self.inner.read(&mut byte)?;
        self.state.record_source(n);
        if n == 0 {
            log::debug!(
                "source exhausted after {} bytes",
                self.state.bytes_consumed()
            );
            return Ok(None);
        }
        Ok(Some(byte[0]))
    }

    /// Discard `offset` folded bytes, then fill up to `len` bytes of `buf`
    /// starting at `buf[0]`.
    ///
    /// `offset` counts bytes of the folded stream, delimiters included, and
    /// never positions the write inside `buf`. This matches the stream
    /// contract this reader stands in for.
    ///
    /// Returns `Ok(None)` when the stream ended before a single byte was
    /// written, otherwise the number of bytes written. A `len` of zero writes
    /// nothing and returns `Ok(Some(0))`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `len` exceeds `buf.len()`; any error from the source,
    /// unchanged.
    pub fn read_into(
        &mut self,
        buf: &mut [u8],
        offset: usize,
        len: usize,
    ) -> io::Result<Option<usize>> {
        if len > buf.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("requested {len} bytes into a buffer of {}", buf.len()),
            ));
        }
        self.discard(offset as u64)?;
        if len == 0 {
            return Ok(Some(0));
        }

        let mut written = 0;
        while written < len {
            match self.read_byte()? {
                Some(byte) => {
                    buf[written] = byte;
                    written += 1;
                }
                None => break,
            }
        }
        Ok((written > 0).then_some(written))
    }

    /// Discard `n` bytes of the folded stream.
    ///
    /// A non-positive `n` discards nothing and returns 0. Otherwise `n` reads
    /// are attempted and `n` is returned, even if the stream ran out first.
    ///
    /// # Errors
    ///
    /// Any error from the source, unchanged.
    pub fn skip(&mut self, n: i64) -> io::Result<u64> {
        let Ok(n) = u64::try_from(n) else {
            return Ok(0);
        };
        self.discard(n)?;
        Ok(n)
    }

    fn discard(&mut self, n: u64) -> io::Result<()> {
        for _ in 0..n {
            // Every read after the latch is `Ok(None)`.
            if self.state.is_exhausted() {
                break;
            }
            self.read_byte()?;
        }
        Ok(())
    }
}

impl<R> FoldReader<R> {
    /// Folded streams are forward-only; marking is never supported.
    #[must_use]
    pub const fn mark_supported(&self) -> bool {
        false
    }

    /// Number of source bytes between delimiter insertions.
    #[must_use]
    pub const fn fold_length(&self) -> NonZeroU64 {
        self.fold_length
    }

    /// The bytes inserted at each boundary.
    #[must_use]
    pub fn delimiter(&self) -> &[u8] {
        &self.delimiter
    }

    /// Number of source bytes read so far. Delimiter bytes are not counted.
    #[must_use]
    pub fn bytes_consumed(&self) -> u64 {
        self.state.bytes_consumed()
    }

    /// Borrow the underlying reader.
    pub const fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Mutably borrow the underlying reader.
    ///
    /// Reading from it directly bypasses the fold count.
    pub const fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Unwrap the underlying reader, discarding the fold position.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Release the underlying reader.
    ///
    /// # Errors
    ///
    /// Never; present so hosts can treat every stream's shutdown uniformly.
    pub fn close(self) -> io::Result<()> {
        drop(self.inner);
        Ok(())
    }
}

impl<R: Read> Read for FoldReader<R> {
    /// Produces exactly the bytes [`FoldReader::read_byte`] would, but copies
    /// each run of source bytes up to the next boundary with a single read of
    /// the source.
    ///
    /// The source is read at most once per call, and only while nothing has
    /// been written yet, so a source error never discards bytes already
    /// placed in `buf`.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut written = 0;
        while written < buf.len() && !self.state.is_exhausted() {
            if self.state.at_boundary(self.fold_length) {
                buf[written] = self.state.emit_delimiter(&self.delimiter);
                written += 1;
                continue;
            }
            if written > 0 {
                break;
            }

            let budget = self.state.passthrough_budget(self.fold_length);
            let want = usize::try_from(budget).map_or(buf.len(), |b| b.min(buf.len()));
            let n = self.inner.read(&mut buf[..want])?;
            self.state.record_source(n);
            if n == 0 {
                log::debug!(
                    "source exhausted after {} bytes",
                    self.state.bytes_consumed()
                );
                break;
            }
            written = n;
        }
        Ok(written)
    }
}

impl<R: fmt::Debug> fmt::Debug for FoldReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FoldReader")
            .field("inner", &self.inner)
            .field("fold_length", &self.fold_length)
            .field("delimiter", &BStr::new(&self.delimiter))
            .field("state", &self.state)
            .finish()
    }
}
