// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use reqwest::StatusCode;
use sftpgo_common_http::RetryableError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("API error: {status} - {message}")]
	Api { status: u16, message: String },

	#[error("invalid base URL: {0}")]
	InvalidBaseUrl(String),

	#[error("URL parse error: {0}")]
	UrlParse(#[from] url::ParseError),

	#[error("invalid header {name}: {message}")]
	InvalidHeader { name: String, message: String },

	#[error("no credentials configured: set an API key or a username and password")]
	MissingCredentials,

	#[error("authentication failed: {0}")]
	Auth(String),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

impl ClientError {
	pub fn status(&self) -> Option<u16> {
		match self {
			ClientError::Api { status, .. } => Some(*status),
			ClientError::Http(e) => e.status().map(|s| s.as_u16()),
			_ => None,
		}
	}

	/// The object does not exist on the server.
	pub fn is_not_found(&self) -> bool {
		self.status() == Some(StatusCode::NOT_FOUND.as_u16())
	}
}

impl RetryableError for ClientError {
	fn is_retryable(&self) -> bool {
		match self {
			ClientError::Http(e) => e.is_retryable(),
			ClientError::Api { status, .. } => {
				*status >= 500
					|| *status == StatusCode::TOO_MANY_REQUESTS.as_u16()
					|| *status == StatusCode::REQUEST_TIMEOUT.as_u16()
			}
			_ => false,
		}
	}
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
	use super::*;

	fn api(status: u16) -> ClientError {
		ClientError::Api {
			status,
			message: String::new(),
		}
	}

	#[test]
	fn not_found_detection() {
		assert!(api(404).is_not_found());
		assert!(!api(400).is_not_found());
		assert!(!ClientError::MissingCredentials.is_not_found());
	}

	#[test]
	fn only_transient_statuses_are_retryable() {
		assert!(api(500).is_retryable());
		assert!(api(503).is_retryable());
		assert!(api(429).is_retryable());
		assert!(api(408).is_retryable());
		assert!(!api(400).is_retryable());
		assert!(!api(404).is_retryable());
		assert!(!ClientError::Auth("bad password".to_string()).is_retryable());
	}
}
