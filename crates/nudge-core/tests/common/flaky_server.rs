//! Minimal HTTP/1.1 server that fails a scripted number of times, for
//! exercising retry dispatch end to end.
//!
//! Answers `fail_status` for the first `failures` requests, then
//! `204 No Content`. Every connection is closed after one response.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub struct FlakyServer {
    /// Base URL of the server (e.g. "http://127.0.0.1:12345/").
    pub url: String,
    hits: Arc<AtomicU32>,
}

impl FlakyServer {
    /// Number of requests the server has received so far.
    pub fn hits(&self) -> u32 {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Starts the server in a background thread. It runs until the process
/// exits.
pub fn start(failures: u32, fail_status: u32) -> FlakyServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let hits = Arc::new(AtomicU32::new(0));
    let hits_srv = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let served = hits_srv.fetch_add(1, Ordering::SeqCst);
            handle(stream, served < failures, fail_status);
        }
    });
    FlakyServer {
        url: format!("http://127.0.0.1:{}/", port),
        hits,
    }
}

fn handle(mut stream: TcpStream, fail: bool, fail_status: u32) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    // One read is enough for the small requests these tests send.
    let mut buf = [0u8; 8192];
    let _ = stream.read(&mut buf);
    let response = if fail {
        format!(
            "HTTP/1.1 {} Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            fail_status
        )
    } else {
        "HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n".to_string()
    };
    let _ = stream.write_all(response.as_bytes());
}
