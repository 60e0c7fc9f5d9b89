//! Reconnect retry policy.
//!
//! Decides, after a transport-level disconnect, how long to wait before the
//! next connection attempt or whether to give up permanently. The default
//! policy grows linearly with the attempt count and stops retrying once the
//! total time spent reconnecting crosses a ceiling.

use std::time::Duration;

/// Stop retrying once this much time has been spent reconnecting.
pub const RETRY_ELAPSED_CEILING: Duration = Duration::from_millis(60_000);

/// Delay added per attempt: attempt N waits N times this step.
pub const RETRY_STEP: Duration = Duration::from_millis(200);

/// Upper bound on the delay between two attempts.
pub const RETRY_DELAY_CAP: Duration = Duration::from_millis(3_000);

/// Outcome of evaluating the retry policy for one reconnect attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Wait this long, then try again.
    Delay(Duration),
    /// Stop reconnecting permanently.
    GiveUp,
}

/// Linear backoff policy for store reconnection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total reconnect time budget.
    pub max_elapsed: Duration,
    /// Per-attempt delay increment.
    pub step: Duration,
    /// Maximum delay between attempts.
    pub cap: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_elapsed: RETRY_ELAPSED_CEILING,
            step: RETRY_STEP,
            cap: RETRY_DELAY_CAP,
        }
    }
}

impl RetryPolicy {
    /// Evaluates the policy for one attempt.
    ///
    /// # Arguments
    ///
    /// * `attempt` - 1-based count of reconnection attempts so far
    /// * `elapsed` - total time spent reconnecting
    /// * `refused` - whether the last error was an active connection refusal
    ///
    /// A refused connection means the server is reachable but rejecting us,
    /// so retrying cannot help and the policy gives up immediately.
    pub fn evaluate(&self, attempt: u32, elapsed: Duration, refused: bool) -> RetryDecision {
        if refused {
            return RetryDecision::GiveUp;
        }
        if elapsed >= self.max_elapsed {
            return RetryDecision::GiveUp;
        }
        RetryDecision::Delay(self.delay_for(attempt))
    }

    /// Delay before the given 1-based attempt: `min(attempt * step, cap)`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        (self.step * attempt).min(self.cap)
    }

    /// Number of attempts whose cumulative delays fit under the elapsed
    /// ceiling. Drivers that take an attempt budget instead of a callback
    /// are configured with this value, where zero means an unlimited budget.
    pub fn max_attempts(&self) -> u32 {
        // A zero ceiling gives up after the first attempt.
        if self.max_elapsed.is_zero() {
            return 1;
        }
        // Zero-width delays never accumulate elapsed time, so the policy
        // never gives up on its own.
        if self.step.is_zero() || self.cap.is_zero() {
            return 0;
        }
        let mut elapsed = Duration::ZERO;
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.evaluate(attempt, elapsed, false) {
                RetryDecision::Delay(delay) => elapsed += delay,
                RetryDecision::GiveUp => return attempt - 1,
            }
        }
    }
}
