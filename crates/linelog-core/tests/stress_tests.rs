//! Stress tests for high-volume logging
//!
//! These tests verify the logger handles large numbers of messages,
//! concurrent writers, and heavily fragmented input.

use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use linelog_core::{Decorator, Level, Logger, SharedLogger, TsFormat};
use parking_lot::Mutex;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().clone()).unwrap()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn shared() -> (SharedLogger, Capture) {
    let capture = Capture::default();
    let logger = Logger::decorated(capture.clone(), Decorator::bracketed(TsFormat::NONE));
    (SharedLogger::new(logger), capture)
}

// ============================================================================
// Volume Tests
// ============================================================================

/// Test logging 10000 messages on one thread
#[test]
fn test_10000_messages() {
    let (logger, out) = shared();

    let start = Instant::now();
    for i in 0..10_000 {
        logger.log(Level::Info, "bulk", &format!("message {}", i));
    }
    logger.close();
    let duration = start.elapsed();

    let text = out.text();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 10_000);
    assert_eq!(lines[0], "[INFO:bulk] message 0");
    assert_eq!(lines[9_999], "[INFO:bulk] message 9999");

    println!("Logged 10000 messages in {:?}", duration);
}

/// Test a long line delivered one byte at a time
#[test]
fn test_bytewise_long_line() {
    let (logger, out) = shared();
    let body = "x".repeat(50_000);

    logger.start_level(Level::Warn, "");
    for byte in body.as_bytes() {
        logger.append(std::slice::from_ref(byte));
    }
    logger.close();

    assert_eq!(out.text(), format!("[WARN] {}\n", body));
}

// ============================================================================
// Concurrency Tests
// ============================================================================

/// Test concurrent loggers never tear each other's lines
#[test]
fn test_concurrent_messages_stay_whole() {
    let (logger, out) = shared();
    let threads = 8;
    let per_thread = 500;

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let logger = logger.clone();
            thread::spawn(move || {
                let domain = format!("t{}", t);
                for i in 0..per_thread {
                    logger.log(Level::Info, &domain, &format!("{}-{}", t, i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    logger.close();

    let text = out.text();
    let mut seen = HashSet::new();
    for line in text.lines() {
        let (prefix, body) = line.split_once("] ").unwrap();
        let (t, _) = body.split_once('-').unwrap();
        assert_eq!(prefix, format!("[INFO:t{}", t));
        assert!(seen.insert(body.to_string()), "duplicate line {}", line);
    }
    assert_eq!(seen.len(), threads * per_thread);
}

/// Test concurrent level writers each resume on a fresh line
#[test]
fn test_concurrent_level_writers() {
    let (logger, out) = shared();

    let handles: Vec<_> = [Level::Info, Level::Warn, Level::Error]
        .into_iter()
        .map(|level| {
            let logger = logger.clone();
            thread::spawn(move || {
                let mut writer = logger.writer(level, "");
                for i in 0..200 {
                    let line = format!("{} {}\n", level.name(), i);
                    writer.write_all(line.as_bytes()).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    logger.close();

    let text = out.text();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 600);
    for line in lines {
        let (prefix, body) = line.split_once("] ").unwrap();
        assert_eq!(&prefix[1..], body.split(' ').next().unwrap());
    }
}

/// Test writers sharing one level and domain never merge lines
#[test]
fn test_concurrent_writers_same_line_context() {
    let (logger, out) = shared();
    let threads = 4;
    let per_thread = 250;

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let logger = logger.clone();
            thread::spawn(move || {
                let mut writer = logger.writer(Level::Info, "job");
                for i in 0..per_thread {
                    let line = format!("{}-{}\n", t, i);
                    writer.write_all(line.as_bytes()).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    logger.close();

    let text = out.text();
    let mut seen = HashSet::new();
    for line in text.lines() {
        let body = line.strip_prefix("[INFO:job] ").unwrap();
        let (t, i) = body.split_once('-').unwrap();
        assert!(t.parse::<usize>().unwrap() < threads);
        assert!(i.parse::<usize>().unwrap() < per_thread);
        assert!(seen.insert(body.to_string()), "duplicate line {}", line);
    }
    assert_eq!(seen.len(), threads * per_thread);
}
