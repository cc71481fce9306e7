//! End-to-end retry dispatch against a local flaky HTTP server.

mod common;

use common::flaky_server;
use nudge_core::request::{Method, Request};
use nudge_core::retry::{
    classify, dispatch_with_retry, is_transient, Backoff, DispatchError, ErrorKind, RetryPolicy,
};
use nudge_core::transport::{CurlTransport, Transport};
use std::net::TcpListener;
use std::time::Duration;

fn fast_policy(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        backoff: Backoff::Fixed,
        base_delay: Duration::from_millis(10),
        max_delay: Duration::from_millis(50),
        jitter_seed: None,
    }
}

#[test]
fn succeeds_after_transient_failures() {
    let server = flaky_server::start(2, 503);
    let request = Request::new(&server.url)
        .unwrap()
        .with_header("X-Event", "test")
        .with_body(b"ping".to_vec());
    let transport = CurlTransport::default();

    let result = dispatch_with_retry(&transport, &request, &fast_policy(2), is_transient);
    assert!(result.is_ok(), "expected success, got {result:?}");
    assert_eq!(server.hits(), 3);
}

#[test]
fn budget_exhaustion_surfaces_the_last_http_error() {
    let server = flaky_server::start(u32::MAX, 503);
    let request = Request::new(&server.url).unwrap();
    let transport = CurlTransport::default();

    let err = dispatch_with_retry(&transport, &request, &fast_policy(3), is_transient)
        .expect_err("server never acknowledges");
    assert!(matches!(err, DispatchError::Http(503)));
    assert_eq!(server.hits(), 4);
}

#[test]
fn non_retryable_status_fails_on_the_first_attempt() {
    let server = flaky_server::start(u32::MAX, 404);
    let request = Request::new(&server.url).unwrap();
    let transport = CurlTransport::default();

    let err = dispatch_with_retry(&transport, &request, &fast_policy(5), is_transient)
        .expect_err("404 is terminal");
    assert!(matches!(err, DispatchError::Http(404)));
    assert_eq!(server.hits(), 1);
}

#[test]
fn zero_budget_makes_a_single_attempt() {
    let server = flaky_server::start(u32::MAX, 500);
    let request = Request::new(&server.url).unwrap();
    let transport = CurlTransport::default();

    let err = dispatch_with_retry(&transport, &request, &fast_policy(0), is_transient)
        .expect_err("first failure is terminal with no budget");
    assert!(matches!(err, DispatchError::Http(500)));
    assert_eq!(server.hits(), 1);
}

#[test]
fn get_dispatch_is_acknowledged() {
    let server = flaky_server::start(0, 500);
    let request = Request::new(&server.url)
        .unwrap()
        .with_method(Method::Get);
    let transport = CurlTransport::default();

    dispatch_with_retry(&transport, &request, &fast_policy(1), is_transient).unwrap();
    assert_eq!(server.hits(), 1);
}

#[test]
fn connection_failure_classifies_as_transient() {
    // Grab a free port, then close the listener so connects are refused.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{}/", port);
    let request = Request::new(&url).unwrap();
    let transport = CurlTransport {
        connect_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_secs(2),
    };

    let err = transport.send(&request).expect_err("nothing listens here");
    assert!(matches!(err, DispatchError::Curl(_)));
    assert_eq!(classify(&err), ErrorKind::Connection);
    assert!(is_transient(&err));
}
