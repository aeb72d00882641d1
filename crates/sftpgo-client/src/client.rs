// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP plumbing shared by every endpoint.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sftpgo_common_http::{retry, RetryConfig};
use tracing::{debug, trace};
use url::Url;

use crate::auth::{Authenticator, Credentials};
use crate::error::{ClientError, Result};

const API_PREFIX: [&str; 2] = ["api", "v2"];

/// Tunables for [`SftpgoClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
	pub request_timeout: Duration,
	/// Applied to idempotent reads only.
	pub retry_config: RetryConfig,
	/// Objects requested per page when listing.
	pub page_size: usize,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			request_timeout: Duration::from_secs(30),
			retry_config: RetryConfig::default(),
			page_size: 100,
		}
	}
}

/// Builder for [`SftpgoClient`].
#[derive(Debug, Default)]
pub struct SftpgoClientBuilder {
	base_url: Option<String>,
	credentials: Option<Credentials>,
	headers: Vec<(String, String)>,
	config: ClientConfig,
}

impl SftpgoClientBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// SFTPGo base URL, e.g. `https://sftpgo.example.com:8080`. A path prefix is
	/// kept, `/api/v2` is appended to it.
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = Some(url.into());
		self
	}

	pub fn credentials(mut self, credentials: Credentials) -> Self {
		self.credentials = Some(credentials);
		self
	}

	/// Adds a header sent with every request.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));
		self
	}

	pub fn config(mut self, config: ClientConfig) -> Self {
		self.config = config;
		self
	}

	pub fn build(self) -> Result<SftpgoClient> {
		let raw = self
			.base_url
			.ok_or_else(|| ClientError::InvalidBaseUrl("base URL is required".to_string()))?;
		let base_url = Url::parse(&raw)?;
		if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
			return Err(ClientError::InvalidBaseUrl(format!(
				"{raw}: expected an http or https URL"
			)));
		}
		let credentials = self.credentials.ok_or(ClientError::MissingCredentials)?;

		let mut headers = HeaderMap::new();
		for (name, value) in self.headers {
			let header_name =
				HeaderName::from_bytes(name.as_bytes()).map_err(|e| ClientError::InvalidHeader {
					name: name.clone(),
					message: e.to_string(),
				})?;
			let header_value =
				HeaderValue::from_str(&value).map_err(|e| ClientError::InvalidHeader {
					name: name.clone(),
					message: e.to_string(),
				})?;
			headers.append(header_name, header_value);
		}

		let http = sftpgo_common_http::builder()
			.timeout(self.config.request_timeout)
			.default_headers(headers)
			.build()?;

		debug!(base_url = %base_url, "created SFTPGo client");
		Ok(SftpgoClient {
			inner: Arc::new(SftpgoClientInner {
				http,
				base_url,
				auth: Authenticator::new(credentials),
				config: self.config,
			}),
		})
	}
}

/// Client for the SFTPGo REST API. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SftpgoClient {
	inner: Arc<SftpgoClientInner>,
}

#[derive(Debug)]
struct SftpgoClientInner {
	http: Client,
	base_url: Url,
	auth: Authenticator,
	config: ClientConfig,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
	#[serde(default)]
	error: String,
	#[serde(default)]
	message: String,
}

impl SftpgoClient {
	pub fn builder() -> SftpgoClientBuilder {
		SftpgoClientBuilder::new()
	}

	pub fn base_url(&self) -> &Url {
		&self.inner.base_url
	}

	/// `<base>/api/v2/<segments...>` with every segment percent-escaped.
	pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
		let mut url = self.inner.base_url.clone();
		url.set_query(None);
		url.set_fragment(None);
		url
			.path_segments_mut()
			.map_err(|_| ClientError::InvalidBaseUrl(self.inner.base_url.to_string()))?
			.pop_if_empty()
			.extend(API_PREFIX)
			.extend(segments);
		Ok(url)
	}

	async fn request(&self, method: Method, url: Url) -> Result<RequestBuilder> {
		let token_url = self.endpoint(&["token"])?;
		let builder = self.inner.http.request(method, url);
		self
			.inner
			.auth
			.authorize(&self.inner.http, &token_url, builder)
			.await
	}

	async fn send(&self, request: RequestBuilder) -> Result<Response> {
		let response = request.send().await?;
		let status = response.status();
		trace!(status = status.as_u16(), url = %response.url(), "response received");
		if status.is_success() {
			return Ok(response);
		}
		if status == StatusCode::UNAUTHORIZED && self.inner.auth.uses_token() {
			self.inner.auth.invalidate().await;
		}
		let body = response.text().await.unwrap_or_default();
		Err(ClientError::Api {
			status: status.as_u16(),
			message: error_message(status, &body),
		})
	}

	/// GET with retries on transient failures.
	pub(crate) async fn fetch<T: DeserializeOwned>(
		&self,
		segments: &[&str],
		query: &[(&str, String)],
	) -> Result<T> {
		let mut url = self.endpoint(segments)?;
		if !query.is_empty() {
			url.query_pairs_mut().extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
		}
		retry(&self.inner.config.retry_config, || async {
			let request = self.request(Method::GET, url.clone()).await?;
			let response = self.send(request).await?;
			let bytes = response.bytes().await?;
			Ok::<T, ClientError>(serde_json::from_slice(&bytes)?)
		})
		.await
	}

	pub(crate) async fn write<B: Serialize + ?Sized>(
		&self,
		method: Method,
		segments: &[&str],
		query: &[(&str, String)],
		body: &B,
	) -> Result<()> {
		let mut url = self.endpoint(segments)?;
		if !query.is_empty() {
			url.query_pairs_mut().extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
		}
		let request = self.request(method, url).await?.json(body);
		self.send(request).await?;
		Ok(())
	}

	pub(crate) async fn remove(&self, segments: &[&str]) -> Result<()> {
		let url = self.endpoint(segments)?;
		let request = self.request(Method::DELETE, url).await?;
		self.send(request).await?;
		Ok(())
	}

	/// Lists a collection with `offset`/`limit` paging until a short page.
	pub(crate) async fn fetch_all<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<Vec<T>> {
		let limit = self.inner.config.page_size.max(1);
		let mut items = Vec::new();
		loop {
			let page: Vec<T> = self
				.fetch(
					segments,
					&[
						("offset", items.len().to_string()),
						("limit", limit.to_string()),
						("order", "ASC".to_string()),
					],
				)
				.await?;
			let received = page.len();
			items.extend(page);
			if received < limit {
				break;
			}
		}
		debug!(count = items.len(), "listed collection");
		Ok(items)
	}

	pub(crate) fn page_size(&self) -> usize {
		self.inner.config.page_size.max(1)
	}
}

/// Folds SFTPGo's `{"error": ..., "message": ...}` body into one line.
fn error_message(status: StatusCode, body: &str) -> String {
	if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
		let parts: Vec<&str> = [parsed.message.trim(), parsed.error.trim()]
			.into_iter()
			.filter(|s| !s.is_empty())
			.collect();
		if !parts.is_empty() {
			return parts.join(": ");
		}
	}
	let body = body.trim();
	if body.is_empty() {
		status.canonical_reason().unwrap_or("unknown error").to_string()
	} else {
		body.to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use sftpgo_common_secret::SecretString;

	fn client(base: &str) -> SftpgoClient {
		SftpgoClient::builder()
			.base_url(base)
			.credentials(Credentials::ApiKey(SecretString::from("key")))
			.build()
			.unwrap()
	}

	#[test]
	fn endpoint_escapes_segments() {
		let client = client("https://sftpgo.example.com:8080");
		let url = client.endpoint(&["iplists", "2", "10.0.0.0/8"]).unwrap();
		assert_eq!(
			url.as_str(),
			"https://sftpgo.example.com:8080/api/v2/iplists/2/10.0.0.0%2F8"
		);
	}

	#[test]
	fn endpoint_keeps_path_prefix() {
		let client = client("https://example.com/sftpgo/");
		let url = client.endpoint(&["users", "alice"]).unwrap();
		assert_eq!(url.as_str(), "https://example.com/sftpgo/api/v2/users/alice");
	}

	#[test]
	fn build_validates_inputs() {
		let err = SftpgoClient::builder()
			.base_url("ftp://example.com")
			.credentials(Credentials::ApiKey(SecretString::from("key")))
			.build()
			.unwrap_err();
		assert!(matches!(err, ClientError::InvalidBaseUrl(_)));

		let err = SftpgoClient::builder()
			.base_url("https://example.com")
			.build()
			.unwrap_err();
		assert!(matches!(err, ClientError::MissingCredentials));

		let err = SftpgoClient::builder()
			.base_url("https://example.com")
			.credentials(Credentials::ApiKey(SecretString::from("key")))
			.header("bad header", "x")
			.build()
			.unwrap_err();
		assert!(matches!(err, ClientError::InvalidHeader { .. }));
	}

	#[test]
	fn error_message_prefers_api_body() {
		assert_eq!(
			error_message(
				StatusCode::BAD_REQUEST,
				r#"{"error":"username is mandatory","message":"Unable to add user"}"#
			),
			"Unable to add user: username is mandatory"
		);
		assert_eq!(error_message(StatusCode::BAD_GATEWAY, "upstream down\n"), "upstream down");
		assert_eq!(error_message(StatusCode::NOT_FOUND, ""), "Not Found");
	}
}
