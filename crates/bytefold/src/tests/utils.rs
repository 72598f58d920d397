use std::{
    collections::VecDeque,
    io::{self, Read},
};

use crate::FoldReader;

/// The folded output computed directly from the definition: every full chunk
/// of `fold_length` source bytes is followed by the delimiter.
pub fn expected_fold(source: &[u8], fold_length: usize, delimiter: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(source.len() + source.len() / fold_length * delimiter.len());
    for chunk in source.chunks(fold_length) {
        out.extend_from_slice(chunk);
        if chunk.len() == fold_length {
            out.extend_from_slice(delimiter);
        }
    }
    out
}

/// Drain a reader one logical byte at a time.
pub fn drain_bytes<R: Read>(reader: &mut FoldReader<R>) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    while let Some(byte) = reader.read_byte()? {
        out.push(byte);
    }
    Ok(out)
}

/// Drain a reader through `Read::read` with a rotating set of buffer sizes.
pub fn drain_with_buffers<R: Read>(reader: &mut R, sizes: &[usize]) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut buf = vec![0u8; sizes.iter().copied().max().unwrap_or(1).max(1)];
    for &size in sizes.iter().cycle() {
        let size = size.clamp(1, buf.len());
        let n = reader.read(&mut buf[..size])?;
        if n == 0 {
            break;
        }
        out.extend_from_slice(&buf[..n]);
    }
    Ok(out)
}

/// A source that hands out at most `limit` bytes per read and can inject
/// errors at chosen points.
#[derive(Debug)]
pub struct ScriptedSource {
    data: VecDeque<u8>,
    limit: usize,
    failures: VecDeque<(usize, io::ErrorKind)>,
    delivered: usize,
}

impl ScriptedSource {
    pub fn new(data: &[u8], limit: usize) -> Self {
        Self {
            data: data.iter().copied().collect(),
            limit: limit.max(1),
            failures: VecDeque::new(),
            delivered: 0,
        }
    }

    /// Fail once with `kind` when `after` bytes have been delivered.
    pub fn fail_at(mut self, after: usize, kind: io::ErrorKind) -> Self {
        self.failures.push_back((after, kind));
        self
    }
}

impl Read for ScriptedSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(&(after, kind)) = self.failures.front() {
            if after == self.delivered {
                self.failures.pop_front();
                return Err(io::Error::new(kind, "scripted failure"));
            }
        }
        let mut n = buf.len().min(self.limit).min(self.data.len());
        if let Some(&(after, _)) = self.failures.front() {
            n = n.min(after - self.delivered);
        }
        for slot in &mut buf[..n] {
            *slot = self.data.pop_front().unwrap();
        }
        self.delivered += n;
        Ok(n)
    }
}
