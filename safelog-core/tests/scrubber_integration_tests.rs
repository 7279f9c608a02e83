// safelog-core/tests/scrubber_integration_tests.rs
//! End-to-end behaviour of `LogScrubber` as a log sink: known problem messages,
//! split invariance across write boundaries, and sink failures.

use std::io::{self, Write};

use safelog_core::{LogScrubber, SinkWriteError};
use test_log::test;

const MESSAGES: &[(&str, &str)] = &[
    (
        "http: TLS handshake error from 129.97.208.23:38310: ",
        "http: TLS handshake error from [scrubbed]: \n",
    ),
    (
        "http2: panic serving [2620:101:f000:780:9097:75b1:519f:dbb8]:58344: interface conversion: *http2.responseWriter is not http.Hijacker: missing method Hijack",
        "http2: panic serving [scrubbed]: interface conversion: *http2.responseWriter is not http.Hijacker: missing method Hijack\n",
    ),
    (
        "a=fingerprint:sha-256 33:B6:FA:F6:94:CA:74:61:45:4A:D2:1F:2C:2F:75:8A:D9:EB:23:34:B2:30:E9:1B:2A:A6:A9:E0:44:72:CC:74",
        "a=fingerprint:sha-256 33:B6:FA:F6:94:CA:74:61:45:4A:D2:1F:2C:2F:75:8A:D9:EB:23:34:B2:30:E9:1B:2A:A6:A9:E0:44:72:CC:74\n",
    ),
    (
        "(1:2:3:4:c:d:e:f) {1:2:3:4:c:d:e:f}",
        "([scrubbed]) {[scrubbed]}\n",
    ),
    (
        "2019/05/08 15:37:31 starting",
        "2019/05/08 15:37:31 starting\n",
    ),
    (
        "error dialing relay: wss://snowflake.torproject.net/?client_ip=6201%3ac8%3A3004%3A%3A1234",
        "error dialing relay: wss://snowflake.torproject.net/?client_ip=[scrubbed]\n",
    ),
];

/// Feeds `input` in the given pieces and returns what reached the sink.
fn scrub_in_pieces(pieces: &[&[u8]]) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut scrubber = LogScrubber::new(&mut out);
    for piece in pieces {
        let written = scrubber.write(piece)?;
        assert_eq!(written, piece.len());
    }
    drop(scrubber);
    Ok(out)
}

#[test]
fn test_known_messages_as_single_log_records() -> io::Result<()> {
    for (input, expected) in MESSAGES {
        let record = format!("{input}\n");
        let out = scrub_in_pieces(&[record.as_bytes()])?;
        assert_eq!(String::from_utf8_lossy(&out), *expected, "input: {input:?}");
    }
    Ok(())
}

#[test]
fn test_output_is_independent_of_split_point() -> io::Result<()> {
    for (input, expected) in MESSAGES {
        let record = format!("{input}\n");
        let bytes = record.as_bytes();
        for split in 0..=bytes.len() {
            let out = scrub_in_pieces(&[&bytes[..split], &bytes[split..]])?;
            assert_eq!(
                String::from_utf8_lossy(&out),
                *expected,
                "input: {input:?}, split at {split}"
            );
        }
    }
    Ok(())
}

#[test]
fn test_three_way_splits_of_multi_line_input() -> io::Result<()> {
    let input = b"test\nhttp2: panic serving [2620:101:f000:780:9097:75b1:519f:dbb8]:58344: x\n";
    let expected = b"test\nhttp2: panic serving [scrubbed]: x\n";
    for first in 0..=input.len() {
        for second in first..=input.len() {
            let out = scrub_in_pieces(&[&input[..first], &input[first..second], &input[second..]])?;
            assert_eq!(out, expected, "splits at {first} and {second}");
        }
    }
    Ok(())
}

#[test]
fn test_byte_at_a_time_matches_single_write() -> io::Result<()> {
    let input = b"peers 10.0.0.1, [fe80::1]:22 and ::ffff:192.0.2.1 seen\nat 2019/05/08 15:37:31\n";
    let whole = scrub_in_pieces(&[&input[..]])?;
    let pieces: Vec<&[u8]> = input.chunks(1).collect();
    let trickled = scrub_in_pieces(&pieces)?;
    assert_eq!(whole, trickled);
    assert_eq!(
        whole,
        b"peers [scrubbed], [scrubbed] and [scrubbed] seen\nat 2019/05/08 15:37:31\n"
    );
    Ok(())
}

#[test]
fn test_rescrubbing_output_changes_nothing() -> io::Result<()> {
    let first = scrub_in_pieces(&[b"from 1.2.3.4:55 to [::1]\n".as_slice()])?;
    let second = scrub_in_pieces(&[first.as_slice()])?;
    assert_eq!(first, second);
    Ok(())
}

struct RejectingSink;

impl Write for RejectingSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only sink"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_sink_error_is_returned_verbatim() {
    let mut scrubber = LogScrubber::new(RejectingSink);

    // Nothing is emitted yet, so the sink is never touched.
    assert_eq!(scrubber.write(b"partial 1.2").unwrap(), 11);

    let err = scrubber.write(b".3.4\n").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    assert_eq!(err.to_string(), "read-only sink");
    assert_eq!(scrubber.pending(), b"partial 1.2.3.4\n");

    let SinkWriteError { accepted, source } = scrubber.feed(b"more").unwrap_err();
    assert_eq!(accepted, 4);
    assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
    assert_eq!(scrubber.pending(), b"partial 1.2.3.4\nmore");

    assert!(scrubber.finish().is_err());
}

#[test]
fn test_scrubber_behind_a_mutex_serialises_producers() {
    use std::sync::{Arc, Mutex};
    use std::thread;

    let shared = Arc::new(Mutex::new(LogScrubber::new(Vec::new())));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for _ in 0..50 {
                    let mut scrubber = shared.lock().unwrap();
                    writeln!(scrubber, "worker {i} peer 10.0.0.{i}:80").unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let scrubber = Arc::try_unwrap(shared).ok().unwrap().into_inner().unwrap();
    let (sink, pending) = scrubber.into_parts();
    assert!(pending.is_empty());
    let text = String::from_utf8(sink).unwrap();
    assert_eq!(text.lines().count(), 200);
    assert!(text.lines().all(|line| line.ends_with("peer [scrubbed]")));
}
