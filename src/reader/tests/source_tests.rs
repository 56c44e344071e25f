//! Tests for line sources

use super::*;
use std::io::{self, Read};

struct BrokenInput;

impl Read for BrokenInput {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("device unplugged"))
    }
}

#[test]
fn test_terminators_are_stripped() {
    let mut source = BufReadSource::new(Cursor::new(b"one\r\ntwo\nthree".to_vec()));
    let mut line = String::new();

    assert!(source.next_line(&mut line));
    assert_eq!(line, "one");
    assert!(source.next_line(&mut line));
    assert_eq!(line, "two");
    // an unterminated last line is still a line
    assert!(source.next_line(&mut line));
    assert_eq!(line, "three");

    assert!(!source.next_line(&mut line));
    assert!(!source.failed());
    assert_eq!(line, "three");
}

#[test]
fn test_empty_lines_are_returned() {
    let mut source = BufReadSource::new(Cursor::new(b"\n\nx\n".to_vec()));
    let mut line = String::from("stale");

    assert!(source.next_line(&mut line));
    assert_eq!(line, "");
    assert!(source.next_line(&mut line));
    assert_eq!(line, "");
    assert!(source.next_line(&mut line));
    assert_eq!(line, "x");
    assert!(!source.next_line(&mut line));
}

#[test]
fn test_invalid_utf8_is_a_fault() {
    let mut source = BufReadSource::new(Cursor::new(b"ok\n\xff\xfe\nlater\n".to_vec()));
    let mut line = String::new();

    assert!(source.next_line(&mut line));
    assert!(!source.next_line(&mut line));
    assert!(source.failed());
    assert_eq!(line, "ok");

    // faults are final
    assert!(!source.next_line(&mut line));
}

#[test]
fn test_io_error_is_a_fault() {
    let mut source = BufReadSource::new(io::BufReader::new(BrokenInput));
    let mut line = String::new();

    assert!(!source.next_line(&mut line));
    assert!(source.failed());
}

#[test]
fn test_boxed_source() {
    let mut source: Box<dyn LineSource> =
        Box::new(BufReadSource::new(Cursor::new(b"a b\n".to_vec())));
    let mut line = String::new();

    assert!(source.next_line(&mut line));
    assert_eq!(line, "a b");
    assert!(!source.next_line(&mut line));
    assert!(!source.failed());
}
