use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use mailsweep::session::confirm::read_line_or_interrupt;

#[test]
fn test_interrupt_while_waiting_for_input_returns_promptly() {
    // The sender stays alive, so the reader blocks like a terminal nobody types in
    let (keep_open, pending_input) = mpsc::channel::<String>();
    let reader = move || {
        pending_input
            .recv()
            .map_err(|e| io::Error::new(io::ErrorKind::UnexpectedEof, e))
    };

    let started = Instant::now();
    // block_on builds and drops its own runtime: a reader tied to the runtime
    // would keep this call from returning
    let answer = tokio_test::block_on(read_line_or_interrupt(reader, async {})).unwrap();

    assert_eq!(answer, None);
    assert!(started.elapsed() < Duration::from_secs(2), "took {:?}", started.elapsed());
    drop(keep_open);
}

#[test]
fn test_answer_is_returned_when_no_interrupt_arrives() {
    let reader = || -> io::Result<String> { Ok("yes\n".to_string()) };

    let answer = tokio_test::block_on(read_line_or_interrupt(reader, std::future::pending())).unwrap();

    assert_eq!(answer.as_deref(), Some("yes\n"));
}

#[test]
fn test_read_failure_is_an_error() {
    let reader = || -> io::Result<String> { Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin closed")) };

    let result = tokio_test::block_on(read_line_or_interrupt(reader, std::future::pending()));

    assert!(result.is_err());
}
