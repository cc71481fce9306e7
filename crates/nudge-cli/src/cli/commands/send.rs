//! `nudge send <url>` – dispatch one request with retry.

use anyhow::{Context, Result};
use nudge_core::config::NudgeConfig;
use nudge_core::request::{parse_header_line, Method, Request};
use nudge_core::retry::{dispatch_with_retry, is_transient};
use std::fs;
use std::path::Path;

use super::resolve_policy;
use crate::cli::RetryArgs;

pub fn run_send(
    cfg: &NudgeConfig,
    url: &str,
    method: Method,
    headers: &[String],
    data: Option<&str>,
    data_file: Option<&Path>,
    retry: &RetryArgs,
) -> Result<()> {
    let mut request = Request::new(url)?.with_method(method);
    for line in headers {
        let (name, value) = parse_header_line(line)?;
        request = request.with_header(&name, &value);
    }
    if let Some(data) = data {
        request = request.with_body(data.as_bytes().to_vec());
    } else if let Some(path) = data_file {
        let body = fs::read(path)
            .with_context(|| format!("reading body file {}", path.display()))?;
        request = request.with_body(body);
    }

    let policy = resolve_policy(cfg, retry);
    dispatch_with_retry(&cfg.transport(), &request, &policy, is_transient)
        .with_context(|| format!("dispatch to {url} failed"))?;
    println!("Acknowledged: {} {}", request.method(), url);
    Ok(())
}
