//! Backoff policy: retry budget plus the wait-interval function.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Shape of the wait interval between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backoff {
    /// Same delay before every retry.
    Fixed,
    /// Delay grows by one `base_delay` per retry already spent.
    Linear,
    /// Delay doubles per retry already spent, capped at `max_delay`.
    #[default]
    Exponential,
}

impl FromStr for Backoff {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fixed" => Ok(Backoff::Fixed),
            "linear" => Ok(Backoff::Linear),
            "exponential" | "exp" => Ok(Backoff::Exponential),
            other => Err(format!(
                "unknown backoff shape '{other}' (expected fixed, linear or exponential)"
            )),
        }
    }
}

/// Retry budget and wait-interval configuration consulted by the executor.
///
/// `max_retries` counts retries only: a policy with `max_retries = N` allows
/// up to `N + 1` transport invocations (one initial attempt plus N retries).
/// The policy carries no mutable state and can be shared across dispatches.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries allowed after the initial attempt.
    pub max_retries: u32,
    /// Shape of the wait interval.
    pub backoff: Backoff,
    /// Base delay the shape scales from.
    pub base_delay: Duration,
    /// Upper bound on any computed delay.
    pub max_delay: Duration,
    /// When set, every delay is scaled by a factor derived only from this
    /// seed and the remaining-retry count, so `interval_for` stays pure.
    pub jitter_seed: Option<u64>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 4,
            backoff: Backoff::Exponential,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(30),
            jitter_seed: None,
        }
    }
}

impl RetryPolicy {
    /// Computes the wait before the next attempt.
    ///
    /// `attempts_remaining` is the retry budget still unspent at the moment
    /// the wait is computed; the executor guarantees it is in
    /// `[1, max_retries]`. Deterministic for identical inputs on one policy
    /// instance, reads no external state, and never exceeds `max_delay`.
    pub fn interval_for(&self, attempts_remaining: u32) -> Duration {
        let spent = self.max_retries.saturating_sub(attempts_remaining);
        let raw = match self.backoff {
            Backoff::Fixed => self.base_delay,
            Backoff::Linear => self.base_delay.saturating_mul(spent.saturating_add(1)),
            Backoff::Exponential => {
                // base * 2^spent, exponent clamped so the shift cannot overflow.
                self.base_delay.saturating_mul(1u32 << spent.min(16))
            }
        };
        let capped = raw.min(self.max_delay);
        match self.jitter_seed {
            Some(seed) => {
                // Scale by 0.900..=1.099 using integer permille math; no
                // float rounding, no overflow.
                let permille = 900 + (scramble(seed, attempts_remaining) % 200) as u32;
                capped.saturating_mul(permille) / 1000
            }
            None => capped,
        }
    }

    /// Enables jitter with a freshly drawn seed.
    pub fn with_jitter(mut self) -> Self {
        self.jitter_seed = Some(rand::random());
        self
    }
}

/// splitmix64-style scramble of the seed and the remaining-retry count.
fn scramble(seed: u64, attempts_remaining: u32) -> u64 {
    let mut z = seed ^ u64::from(attempts_remaining).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
