//! Retry logic for reference requests.

use backoff::{backoff::Backoff, ExponentialBackoff};
use checker_types::{CheckerError, Result};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Exponential-backoff retry for transient request failures.
///
/// Only [`CheckerError::Network`] is treated as transient. Every other error
/// is returned on the first attempt.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
	backoff: ExponentialBackoff,
	max_retries: u32,
}

impl RetryPolicy {
	pub fn new(max_retries: u32, max_elapsed: Duration) -> Self {
		let backoff = ExponentialBackoff {
			max_elapsed_time: Some(max_elapsed),
			..Default::default()
		};

		Self {
			backoff,
			max_retries,
		}
	}

	/// No retries at all; the first failure is final.
	pub fn none() -> Self {
		Self::new(0, Duration::ZERO)
	}

	pub fn with_initial_interval(mut self, interval: Duration) -> Self {
		self.backoff.initial_interval = interval;
		self.backoff.current_interval = interval;
		self
	}

	pub fn max_retries(&self) -> u32 {
		self.max_retries
	}

	/// Runs `operation` until it succeeds, fails permanently or retries run out.
	pub async fn run<T, F, Fut>(&self, label: &str, mut operation: F) -> Result<T>
	where
		F: FnMut() -> Fut,
		Fut: Future<Output = Result<T>>,
	{
		let mut backoff = self.backoff.clone();
		backoff.reset();
		let mut attempts = 0;

		loop {
			match operation().await {
				Ok(result) => return Ok(result),
				Err(CheckerError::Network(e)) => {
					attempts += 1;

					if attempts > self.max_retries {
						if self.max_retries > 0 {
							warn!(
								"{} failed after {} attempts, giving up: {}",
								label, attempts, e
							);
						}
						return Err(CheckerError::Network(e));
					}

					if let Some(delay) = backoff.next_backoff() {
						warn!(
							"{} failed, attempt {}/{}, retrying in {:?}: {}",
							label, attempts, self.max_retries, delay, e
						);
						tokio::time::sleep(delay).await;
					} else {
						warn!(
							"{} failed, backoff exhausted after {} attempts: {}",
							label, attempts, e
						);
						return Err(CheckerError::Network(e));
					}
				}
				Err(e) => return Err(e),
			}
		}
	}
}

impl Default for RetryPolicy {
	fn default() -> Self {
		Self::new(3, Duration::from_secs(30))
	}
}
