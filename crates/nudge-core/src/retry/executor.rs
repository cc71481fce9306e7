//! Retry executor: drives one logical dispatch to success or terminal failure.

use std::fmt;
use std::thread;

use super::error::DispatchError;
use super::policy::RetryPolicy;
use crate::request::Request;
use crate::transport::Transport;

/// Per-call retry state.
///
/// One executor is built for each logical dispatch and consumed by `run`;
/// concurrent dispatches never share state, so no locking is needed here.
/// Each loop pass is one attempt: on failure the caller's classifier is
/// consulted fresh, and a retry is scheduled only while budget remains.
pub struct RetryExecutor<'p, C> {
    policy: &'p RetryPolicy,
    classifier: C,
    attempts_remaining: u32,
}

impl<'p, C> RetryExecutor<'p, C> {
    pub fn new(policy: &'p RetryPolicy, classifier: C) -> Self {
        Self {
            policy,
            classifier,
            attempts_remaining: policy.max_retries,
        }
    }

    /// Runs `op` until it succeeds, the classifier declines, or the retry
    /// budget runs out. The terminal error is returned exactly as `op`
    /// produced it, with exhaustion noted only in the logs.
    ///
    /// The wait between attempts blocks the calling thread; callers that
    /// cannot afford to block must run the whole dispatch on a worker they
    /// own.
    pub fn run<E, F>(mut self, mut op: F) -> Result<(), E>
    where
        C: FnMut(&E) -> bool,
        E: fmt::Display,
        F: FnMut() -> Result<(), E>,
    {
        loop {
            let err = match op() {
                Ok(()) => return Ok(()),
                Err(e) => e,
            };
            if !(self.classifier)(&err) {
                tracing::debug!("terminal failure, classifier declined retry: {}", err);
                return Err(err);
            }
            if self.attempts_remaining == 0 {
                tracing::debug!("terminal failure, retry budget exhausted: {}", err);
                return Err(err);
            }
            // Interval is computed with the pre-decrement count; the budget
            // is spent before the wait, never after.
            let wait = self.policy.interval_for(self.attempts_remaining);
            tracing::debug!(
                "attempt failed: {}; {} retries left, next in {:?}",
                err,
                self.attempts_remaining,
                wait
            );
            self.attempts_remaining -= 1;
            thread::sleep(wait);
            tracing::debug!("reattempting, {} retries left after this one", self.attempts_remaining);
        }
    }
}

/// Dispatches `request` through `transport` under `policy`, asking
/// `classifier` about every failure. The request is replayed unchanged on
/// every attempt.
pub fn dispatch_with_retry<T, C>(
    transport: &T,
    request: &Request,
    policy: &RetryPolicy,
    classifier: C,
) -> Result<(), DispatchError>
where
    T: Transport + ?Sized,
    C: FnMut(&DispatchError) -> bool,
{
    tracing::debug!("dispatching {} {}", request.method(), request.url());
    RetryExecutor::new(policy, classifier).run(|| transport.send(request))
}
