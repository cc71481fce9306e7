//! Transport: one synchronous fire-and-acknowledge HTTP send.

use std::time::Duration;

use crate::request::{Method, Request};
use crate::retry::DispatchError;

/// Capability that performs one send/acknowledge cycle for a request whose
/// response body is irrelevant.
///
/// Implementations must be safe to call from several threads at once; the
/// retry layer runs concurrent dispatches against one shared transport.
pub trait Transport {
    /// Sends one request. Success means the endpoint acknowledged with a
    /// 2xx status; the response body is drained and discarded.
    fn send(&self, request: &Request) -> Result<(), DispatchError>;
}

/// libcurl-backed transport: a fresh `Easy` handle per send.
///
/// Connection reuse, pooling, and TLS tuning are left to libcurl defaults.
#[derive(Debug, Clone, Copy)]
pub struct CurlTransport {
    /// Connect timeout per attempt.
    pub connect_timeout: Duration,
    /// Whole-request timeout per attempt.
    pub request_timeout: Duration,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Transport for CurlTransport {
    fn send(&self, request: &Request) -> Result<(), DispatchError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(request.url())?;
        easy.follow_location(true)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.request_timeout)?;

        if let Some(body) = request.body() {
            easy.post_fields_copy(body)?;
        } else if request.method() != Method::Get {
            // Bodyless POST/PUT/... still needs Content-Length: 0; without
            // fields libcurl would wait on a read callback.
            easy.post_fields_copy(&[])?;
        }
        // Method set last so it wins over the POST implied by post fields.
        match request.method() {
            Method::Get => easy.get(true)?,
            Method::Post => easy.post(true)?,
            other => easy.custom_request(other.as_str())?,
        }

        let mut list = curl::easy::List::new();
        for (name, value) in request.headers() {
            list.append(&format!("{}: {}", name.trim(), value.trim()))?;
        }
        if !request.headers().is_empty() {
            easy.http_headers(list)?;
        }

        {
            let mut transfer = easy.transfer();
            // Acknowledge-only call: drain whatever body the server sends.
            transfer.write_function(|data| Ok(data.len()))?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(DispatchError::Http(code));
        }
        Ok(())
    }
}
