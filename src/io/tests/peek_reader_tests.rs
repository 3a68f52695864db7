//! Tests for the peeking reader and the random-access adapters

extern crate std;

use std::io::{Cursor, Read};
use crate::io::peek_reader::PeekReader;
use crate::io::seekable::{ReadAt, SeekReadAt};

#[test]
fn test_peek_does_not_consume() {
    let data: Vec<u8> = (0u8..100).collect();
    let mut reader = PeekReader::new(&data[..]);

    std::assert_eq!(reader.peek(4).unwrap(), &[0, 1, 2, 3]);
    std::assert_eq!(reader.peek(2).unwrap(), &[0, 1]);
    std::assert_eq!(reader.position(), 0);

    let mut out = [0u8; 3];
    reader.read_exact(&mut out).unwrap();
    std::assert_eq!(out, [0, 1, 2]);
    std::assert_eq!(reader.position(), 3);
}

#[test]
fn test_discard_counts_bytes() {
    let data: Vec<u8> = (0u8..200).collect();
    let mut reader = PeekReader::with_capacity(16, &data[..]);

    reader.peek(8).unwrap();
    std::assert_eq!(reader.discard(50).unwrap(), 50);
    std::assert_eq!(reader.position(), 50);
    std::assert_eq!(reader.peek(2).unwrap(), &[50, 51]);

    // Only 150 bytes remain
    std::assert_eq!(reader.discard(500).unwrap(), 150);
    std::assert_eq!(reader.position(), 200);
    std::assert!(reader.peek(2).unwrap().is_empty());
}

#[test]
fn test_peek_across_buffer_boundary() {
    let data: Vec<u8> = (0u8..40).collect();
    let mut reader = PeekReader::with_capacity(8, &data[..]);

    reader.discard(6).unwrap();
    std::assert_eq!(reader.peek(4).unwrap(), &[6, 7, 8, 9]);
}

#[test]
fn test_take_leaves_remainder() {
    let data: Vec<u8> = (0u8..20).collect();
    let mut reader = PeekReader::new(&data[..]);
    reader.peek(8).unwrap();

    let mut limited = (&mut reader).take(10);
    let mut first = [0u8; 4];
    limited.read_exact(&mut first).unwrap();
    std::assert_eq!(limited.limit(), 6);

    std::assert_eq!(reader.position(), 4);
    std::assert_eq!(reader.discard(6).unwrap(), 6);
    std::assert_eq!(reader.peek(1).unwrap(), &[10]);
}

#[test]
fn test_read_at_slice_and_seek_adapter() {
    let data: Vec<u8> = (0u8..32).collect();

    let mut buf = [0u8; 4];
    data.read_exact_at(&mut buf, 10).unwrap();
    std::assert_eq!(buf, [10, 11, 12, 13]);
    std::assert!(data.read_exact_at(&mut buf, 30).is_err());

    let adapter = SeekReadAt::new(Cursor::new(data.clone()));
    adapter.read_exact_at(&mut buf, 28).unwrap();
    std::assert_eq!(buf, [28, 29, 30, 31]);
    adapter.read_exact_at(&mut buf, 0).unwrap();
    std::assert_eq!(buf, [0, 1, 2, 3]);
    std::assert!(adapter.read_exact_at(&mut buf, 29).is_err());
}
