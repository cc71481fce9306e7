//! Request descriptors: where and what to send.
//!
//! A `Request` is the invariant context of one logical dispatch; the retry
//! layer replays it unchanged on every attempt.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// HTTP method for a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    #[default]
    Post,
    Put,
    Delete,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            "PATCH" => Ok(Method::Patch),
            other => bail!("unsupported HTTP method '{other}'"),
        }
    }
}

/// One outbound request: endpoint, method, headers, optional body.
///
/// Immutable once built. A body is sent for every method except GET, where
/// it is ignored.
#[derive(Debug, Clone)]
pub struct Request {
    url: String,
    method: Method,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl Request {
    /// Builds a request for `url`, validating that it parses and uses an
    /// http or https scheme.
    pub fn new(url: &str) -> Result<Self> {
        let parsed = url::Url::parse(url).with_context(|| format!("invalid URL: {url}"))?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => bail!("unsupported URL scheme '{other}' in {url}"),
        }
        Ok(Self {
            url: url.to_string(),
            method: Method::default(),
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .push((name.trim().to_string(), value.trim().to_string()));
        self
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

/// Parses a `Name: value` header line (the CLI `--header` form).
pub fn parse_header_line(line: &str) -> Result<(String, String)> {
    let (name, value) = line
        .split_once(':')
        .with_context(|| format!("header '{line}' is not of the form 'Name: value'"))?;
    let name = name.trim();
    if name.is_empty() {
        bail!("header '{line}' has an empty name");
    }
    Ok((name.to_string(), value.trim().to_string()))
}
