#![no_main]
use std::io::Read;

use arbitrary::Arbitrary;
use bytefold::FoldReader;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    source: Vec<u8>,
    fold_length: u8,
    delimiter: Vec<u8>,
    /// Buffer sizes for `Read::read`, cycled.
    reads: Vec<u8>,
    offset: u8,
}

/// Every full chunk of `fold_length` source bytes followed by the delimiter.
fn model(source: &[u8], fold_length: usize, delimiter: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    for chunk in source.chunks(fold_length) {
        out.extend_from_slice(chunk);
        if chunk.len() == fold_length {
            out.extend_from_slice(delimiter);
        }
    }
    out
}

fn check(input: Input) {
    let fold_length = usize::from(input.fold_length);
    let reader = FoldReader::new(&input.source[..], fold_length, input.delimiter.clone());
    if input.delimiter.is_empty() || fold_length == 0 {
        assert!(reader.is_err());
        return;
    }
    let expected = model(&input.source, fold_length, &input.delimiter);

    // One byte at a time.
    let mut reader = reader.unwrap();
    let mut by_byte = Vec::new();
    while let Some(byte) = reader.read_byte().unwrap() {
        by_byte.push(byte);
    }
    assert_eq!(by_byte, expected);

    // Arbitrary buffer sizes.
    let mut reader = FoldReader::new(&input.source[..], fold_length, input.delimiter.clone()).unwrap();
    let sizes: Vec<usize> = input.reads.iter().map(|&s| usize::from(s) + 1).collect();
    let sizes = if sizes.is_empty() { vec![1] } else { sizes };
    let mut chunked = Vec::new();
    let mut buf = [0u8; 256];
    for &size in sizes.iter().cycle() {
        let n = reader.read(&mut buf[..size]).unwrap();
        if n == 0 {
            break;
        }
        chunked.extend_from_slice(&buf[..n]);
    }
    assert_eq!(chunked, expected);

    // Bulk reads discard `offset` folded bytes first.
    let mut reader = FoldReader::new(&input.source[..], fold_length, input.delimiter).unwrap();
    let offset = usize::from(input.offset);
    let mut buf = vec![0u8; expected.len()];
    let got = reader.read_into(&mut buf, offset, expected.len()).unwrap();
    let tail = expected.get(offset..).unwrap_or_default();
    match got {
        Some(n) => assert_eq!(&buf[..n], tail),
        None => assert!(tail.is_empty()),
    }
}

fuzz_target!(|input: Input| check(input));
