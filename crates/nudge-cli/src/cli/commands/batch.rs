//! `nudge batch <manifest>` – dispatch every manifest entry.

use anyhow::{bail, Result};
use nudge_core::config::NudgeConfig;
use nudge_core::manifest;
use nudge_core::retry::{dispatch_with_retry, is_transient};
use std::path::Path;

use super::resolve_policy;
use crate::cli::RetryArgs;

pub fn run_batch(cfg: &NudgeConfig, path: &Path, retry: &RetryArgs) -> Result<()> {
    let requests = manifest::load_manifest(path)?;
    if requests.is_empty() {
        println!("Manifest is empty; nothing to dispatch.");
        return Ok(());
    }

    let policy = resolve_policy(cfg, retry);
    let transport = cfg.transport();

    let mut failed = 0usize;
    for request in &requests {
        match dispatch_with_retry(&transport, request, &policy, is_transient) {
            Ok(()) => println!("ok   {} {}", request.method(), request.url()),
            Err(err) => {
                failed += 1;
                println!("FAIL {} {}: {}", request.method(), request.url(), err);
            }
        }
    }

    println!("{} dispatched, {} failed", requests.len() - failed, failed);
    if failed > 0 {
        bail!("{failed} of {} dispatches failed", requests.len());
    }
    Ok(())
}
