//! Batch manifest: a JSON list of dispatches.
//!
//! The manifest is a top-level array; each entry names a URL and may set the
//! method, headers, and an inline body. Entries are validated up front so a
//! bad line is reported with its index instead of failing mid-batch.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::request::{Method, Request};

/// One manifest entry as written in JSON.
#[derive(Debug, Deserialize)]
pub struct ManifestEntry {
    pub url: String,
    #[serde(default)]
    pub method: Option<Method>,
    #[serde(default)]
    pub headers: Vec<ManifestHeader>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ManifestHeader {
    pub name: String,
    pub value: String,
}

/// Reads and validates a manifest file into dispatchable requests.
pub fn load_manifest(path: &Path) -> Result<Vec<Request>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading manifest {}", path.display()))?;
    parse_manifest(&data)
}

/// Parses manifest JSON into dispatchable requests.
pub fn parse_manifest(data: &str) -> Result<Vec<Request>> {
    let entries: Vec<ManifestEntry> =
        serde_json::from_str(data).context("manifest is not a JSON array of dispatch entries")?;

    let mut requests = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let mut request =
            Request::new(&entry.url).with_context(|| format!("manifest entry {index}"))?;
        if let Some(method) = entry.method {
            request = request.with_method(method);
        }
        for header in &entry.headers {
            request = request.with_header(&header.name, &header.value);
        }
        if let Some(body) = entry.body {
            request = request.with_body(body.into_bytes());
        }
        requests.push(request);
    }
    Ok(requests)
}
