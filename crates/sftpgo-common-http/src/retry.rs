// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Retry with exponential backoff for transient HTTP failures.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

/// Errors that know whether repeating the request could succeed.
pub trait RetryableError {
	fn is_retryable(&self) -> bool;
}

impl RetryableError for reqwest::Error {
	fn is_retryable(&self) -> bool {
		if self.is_timeout() || self.is_connect() {
			return true;
		}
		match self.status() {
			Some(status) => {
				status.is_server_error()
					|| status == reqwest::StatusCode::TOO_MANY_REQUESTS
					|| status == reqwest::StatusCode::REQUEST_TIMEOUT
			}
			None => false,
		}
	}
}

/// Backoff configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
	/// Total attempts including the first one.
	pub max_attempts: u32,
	pub base_delay: Duration,
	pub max_delay: Duration,
	pub backoff_factor: f64,
	/// Adds up to 25% random jitter to every delay.
	pub jitter: bool,
}

impl Default for RetryConfig {
	fn default() -> Self {
		Self {
			max_attempts: 3,
			base_delay: Duration::from_millis(200),
			max_delay: Duration::from_secs(5),
			backoff_factor: 2.0,
			jitter: true,
		}
	}
}

impl RetryConfig {
	/// A config that performs exactly one attempt.
	pub fn disabled() -> Self {
		Self {
			max_attempts: 1,
			..Self::default()
		}
	}

	/// Delay before retry number `attempt` (1-based).
	pub fn delay_for(&self, attempt: u32) -> Duration {
		let exp = self.backoff_factor.powi(attempt.saturating_sub(1) as i32);
		let base = self.base_delay.as_secs_f64() * exp;
		let capped = base.min(self.max_delay.as_secs_f64());
		let with_jitter = if self.jitter {
			capped + capped * 0.25 * fastrand::f64()
		} else {
			capped
		};
		Duration::from_secs_f64(with_jitter)
	}
}

/// Runs `op` until it succeeds, fails with a non-retryable error, or the
/// configured attempts are exhausted.
pub async fn retry<F, Fut, T, E>(config: &RetryConfig, mut op: F) -> Result<T, E>
where
	F: FnMut() -> Fut,
	Fut: Future<Output = Result<T, E>>,
	E: RetryableError + Display,
{
	let max_attempts = config.max_attempts.max(1);
	let mut attempt = 1;
	loop {
		match op().await {
			Ok(value) => return Ok(value),
			Err(err) if attempt < max_attempts && err.is_retryable() => {
				let delay = config.delay_for(attempt);
				warn!(
					attempt,
					max_attempts,
					delay_ms = delay.as_millis() as u64,
					error = %err,
					"transient HTTP failure, retrying"
				);
				tokio::time::sleep(delay).await;
				attempt += 1;
			}
			Err(err) => {
				debug!(attempt, error = %err, "giving up on request");
				return Err(err);
			}
		}
	}
}
