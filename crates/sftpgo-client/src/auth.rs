// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! API key and JWT authentication.
//!
//! With an API key every request carries `X-SFTPGO-API-KEY`. With a username
//! and password the client exchanges them for an access token at
//! `GET /api/v2/token` and reuses it until shortly before it expires.

use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use sftpgo_common_secret::SecretString;
use tokio::sync::Mutex;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{ClientError, Result};

pub const API_KEY_HEADER: &str = "X-SFTPGO-API-KEY";

/// Tokens are refreshed this long before the server-side expiry.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone)]
pub enum Credentials {
	ApiKey(SecretString),
	Basic {
		username: String,
		password: SecretString,
	},
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
	access_token: SecretString,
	expires_at: DateTime<Utc>,
}

#[derive(Debug)]
struct CachedToken {
	token: SecretString,
	expires_at: DateTime<Utc>,
}

impl CachedToken {
	fn is_fresh(&self, now: DateTime<Utc>) -> bool {
		now + Duration::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
	}
}

#[derive(Debug)]
pub(crate) struct Authenticator {
	credentials: Credentials,
	token: Mutex<Option<CachedToken>>,
}

impl Authenticator {
	pub(crate) fn new(credentials: Credentials) -> Self {
		Self {
			credentials,
			token: Mutex::new(None),
		}
	}

	/// Adds authentication to `request`, fetching a token from `token_url` if
	/// the cached one is missing or about to expire.
	pub(crate) async fn authorize(
		&self,
		http: &Client,
		token_url: &Url,
		request: RequestBuilder,
	) -> Result<RequestBuilder> {
		match &self.credentials {
			Credentials::ApiKey(key) => Ok(request.header(API_KEY_HEADER, key.expose().as_str())),
			Credentials::Basic { username, password } => {
				let mut cached = self.token.lock().await;
				let now = Utc::now();
				if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
					return Ok(request.bearer_auth(token.token.expose()));
				}
				let token = fetch_token(http, token_url, username, password).await?;
				let request = request.bearer_auth(token.token.expose());
				*cached = Some(token);
				Ok(request)
			}
		}
	}

	/// Drops the cached token so the next request logs in again.
	pub(crate) async fn invalidate(&self) {
		self.token.lock().await.take();
	}

	pub(crate) fn uses_token(&self) -> bool {
		matches!(self.credentials, Credentials::Basic { .. })
	}
}

#[instrument(skip(http, password), fields(url = %token_url))]
async fn fetch_token(
	http: &Client,
	token_url: &Url,
	username: &str,
	password: &SecretString,
) -> Result<CachedToken> {
	debug!("requesting access token");
	let response = http
		.get(token_url.clone())
		.basic_auth(username, Some(password.expose()))
		.send()
		.await?;

	if !response.status().is_success() {
		let status = response.status().as_u16();
		let message = response.text().await.unwrap_or_default();
		return Err(ClientError::Auth(format!(
			"token request returned {status}: {}",
			message.trim()
		)));
	}

	let body: TokenResponse = response.json().await?;
	debug!(expires_at = %body.expires_at, "obtained access token");
	Ok(CachedToken {
		token: body.access_token,
		expires_at: body.expires_at,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn token_is_stale_inside_the_margin() {
		let now = Utc::now();
		let token = |secs| CachedToken {
			token: SecretString::from("t"),
			expires_at: now + Duration::seconds(secs),
		};
		assert!(token(600).is_fresh(now));
		assert!(!token(30).is_fresh(now));
		assert!(!token(-5).is_fresh(now));
	}
}
