use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::PathBuf,
};

/// An ordered sequence of byte streams, one per logical input file.
///
/// A host opens the streams one after another and releases everything with
/// [`StreamSource::close`] when it is done, whether or not every stream was
/// opened.
pub trait StreamSource {
    /// The readable stream handed out for each input.
    type Stream: Read;

    /// Advance to the next stream, or `Ok(None)` when there are no more.
    ///
    /// # Errors
    ///
    /// Whatever opening the next input fails with.
    fn open_next(&mut self) -> io::Result<Option<Self::Stream>>;

    /// Release every resource held by the source.
    ///
    /// # Errors
    ///
    /// Whatever releasing the underlying inputs fails with.
    fn close(self) -> io::Result<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// Open every stream of `source` in order, hand each to `f`, then close the
/// source.
///
/// The source is closed even when opening a stream or `f` fails.
///
/// # Errors
///
/// The first error from opening a stream, from `f`, or from closing.
pub fn for_each_stream<S, F>(mut source: S, mut f: F) -> io::Result<()>
where
    S: StreamSource,
    F: FnMut(S::Stream) -> io::Result<()>,
{
    let mut drain = || -> io::Result<()> {
        while let Some(stream) = source.open_next()? {
            f(stream)?;
        }
        Ok(())
    };
    let result = drain();
    let closed = source.close();
    result.and(closed)
}

/// A [`StreamSource`] over any iterator of readers.
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    streams: I,
}

impl<I> IterSource<I>
where
    I: Iterator,
    I::Item: Read,
{
    /// Serve the readers of `streams` in order.
    pub fn new(streams: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            streams: streams.into_iter(),
        }
    }
}

impl<I> StreamSource for IterSource<I>
where
    I: Iterator,
    I::Item: Read,
{
    type Stream = I::Item;

    fn open_next(&mut self) -> io::Result<Option<Self::Stream>> {
        Ok(self.streams.next())
    }
}

/// A [`StreamSource`] that opens a list of files, each behind a buffered
/// reader.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    paths: std::vec::IntoIter<PathBuf>,
}

impl FileSource {
    /// Open `paths` in order when asked.
    pub fn new<P: Into<PathBuf>>(paths: impl IntoIterator<Item = P>) -> Self {
        Self {
            paths: paths
                .into_iter()
                .map(Into::into)
                .collect::<Vec<_>>()
                .into_iter(),
        }
    }

    /// Number of files not yet opened.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.paths.len()
    }
}

impl StreamSource for FileSource {
    type Stream = BufReader<File>;

    fn open_next(&mut self) -> io::Result<Option<Self::Stream>> {
        let Some(path) = self.paths.next() else {
            return Ok(None);
        };
        log::debug!("opening {}", path.display());
        let file = File::open(&path).map_err(|e| {
            io::Error::new(e.kind(), format!("failed to open {}: {e}", path.display()))
        })?;
        Ok(Some(BufReader::new(file)))
    }
}
