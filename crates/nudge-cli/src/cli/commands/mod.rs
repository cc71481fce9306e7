//! CLI subcommand implementations.

mod batch;
mod send;

pub use batch::run_batch;
pub use send::run_send;

use nudge_core::config::NudgeConfig;
use nudge_core::retry::RetryPolicy;
use std::time::Duration;

use super::RetryArgs;

/// Effective retry policy: config (or built-in defaults) overridden by
/// whatever flags were given.
pub(super) fn resolve_policy(cfg: &NudgeConfig, args: &RetryArgs) -> RetryPolicy {
    let mut policy = cfg.retry_policy();
    if let Some(n) = args.max_retries {
        policy.max_retries = n;
    }
    if let Some(ms) = args.base_delay_ms {
        policy.base_delay = Duration::from_millis(ms);
    }
    if let Some(shape) = args.backoff {
        policy.backoff = shape;
    }
    if args.jitter {
        policy = policy.with_jitter();
    }
    policy
}

#[cfg(test)]
mod tests {
    use super::*;
    use nudge_core::retry::Backoff;

    #[test]
    fn flags_override_config_policy() {
        let cfg = NudgeConfig::default();
        let args = RetryArgs {
            max_retries: Some(9),
            base_delay_ms: Some(75),
            backoff: Some(Backoff::Fixed),
            jitter: true,
        };
        let policy = resolve_policy(&cfg, &args);
        assert_eq!(policy.max_retries, 9);
        assert_eq!(policy.base_delay, Duration::from_millis(75));
        assert_eq!(policy.backoff, Backoff::Fixed);
        assert!(policy.jitter_seed.is_some());
    }

    #[test]
    fn no_flags_keeps_config_policy() {
        let cfg = NudgeConfig::default();
        let args = RetryArgs {
            max_retries: None,
            base_delay_ms: None,
            backoff: None,
            jitter: false,
        };
        let policy = resolve_policy(&cfg, &args);
        let defaults = cfg.retry_policy();
        assert_eq!(policy.max_retries, defaults.max_retries);
        assert_eq!(policy.base_delay, defaults.base_delay);
        assert_eq!(policy.backoff, defaults.backoff);
        assert!(policy.jitter_seed.is_none());
    }
}
