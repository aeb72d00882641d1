// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Configuration for the SFTPGo Terraform provider.
//!
//! Values come from two layers, merged in precedence order:
//! 1. the `provider "sftpgo"` block (highest)
//! 2. environment variables (`SFTPGO_HOST`, `SFTPGO_USERNAME`,
//!    `SFTPGO_PASSWORD`, `SFTPGO_API_KEY`, plus `*_FILE` for secrets)
//!
//! The merged layer is validated as a whole and every problem is reported, so a
//! user fixing their configuration sees all of them at once.

pub mod error;
pub mod layer;
pub mod sources;

pub use error::{ConfigError, Result, ValidationIssue};
pub use layer::ProviderConfigLayer;
pub use sources::{ConfigSource, EnvSource, Precedence, ProviderBlockSource};

use http::{HeaderName, HeaderValue};
use sftpgo_common_secret::SecretString;
use tracing::{debug, info};
use url::Url;

/// How the provider authenticates against SFTPGo.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthMethod {
	ApiKey(SecretString),
	Password {
		username: String,
		password: SecretString,
	},
}

/// Fully resolved provider configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
	pub host: Url,
	pub auth: AuthMethod,
	pub headers: Vec<(String, String)>,
}

/// Loads configuration from the environment overlaid with `block`.
pub fn load_config(block: ProviderConfigLayer) -> Result<ProviderConfig> {
	load_config_from(vec![
		Box::new(EnvSource::new()),
		Box::new(ProviderBlockSource::new(block)),
	])
}

/// Merges `sources` by precedence and validates the result.
pub fn load_config_from(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ProviderConfig> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ProviderConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	finalize(merged)
}

fn finalize(layer: ProviderConfigLayer) -> Result<ProviderConfig> {
	let mut issues = Vec::new();

	let host = match layer.host.as_deref().map(str::trim) {
		None | Some("") => {
			issues.push(ValidationIssue::new(
				"host",
				"the SFTPGo URL must be set in the provider block or with SFTPGO_HOST",
			));
			None
		}
		Some(raw) => match Url::parse(raw) {
			Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Some(url),
			Ok(url) => {
				issues.push(ValidationIssue::new(
					"host",
					format!("{url} is not an http or https URL"),
				));
				None
			}
			Err(e) => {
				issues.push(ValidationIssue::new("host", format!("invalid URL {raw:?}: {e}")));
				None
			}
		},
	};

	let username = layer.username.filter(|u| !u.is_empty());
	let password = layer.password.filter(|p| !p.is_empty());
	let api_key = layer.api_key.filter(|k| !k.is_empty());
	let auth = match (api_key, username, password) {
		(Some(key), _, _) => Some(AuthMethod::ApiKey(key)),
		(None, Some(username), Some(password)) => Some(AuthMethod::Password { username, password }),
		(None, Some(_), None) => {
			issues.push(ValidationIssue::new(
				"password",
				"a password is required when username is set",
			));
			None
		}
		(None, None, Some(_)) => {
			issues.push(ValidationIssue::new(
				"username",
				"a username is required when password is set",
			));
			None
		}
		(None, None, None) => {
			issues.push(ValidationIssue::new(
				"api_key",
				"set either api_key or both username and password",
			));
			None
		}
	};

	let headers = layer.headers.unwrap_or_default();
	for (name, value) in &headers {
		if HeaderName::from_bytes(name.as_bytes()).is_err() {
			issues.push(ValidationIssue::new(
				"headers",
				format!("{name:?} is not a valid HTTP header name"),
			));
		}
		if HeaderValue::from_str(value).is_err() {
			issues.push(ValidationIssue::new(
				"headers",
				format!("the value of header {name:?} is not a valid HTTP header value"),
			));
		}
	}

	match (host, auth) {
		(Some(host), Some(auth)) if issues.is_empty() => {
			info!(
				host = %host,
				api_key_auth = matches!(auth, AuthMethod::ApiKey(_)),
				custom_headers = headers.len(),
				"provider configuration loaded"
			);
			Ok(ProviderConfig {
				host,
				auth,
				headers,
			})
		}
		_ => Err(ConfigError::Validation(issues)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn env(vars: &[(&str, &str)]) -> Box<dyn ConfigSource> {
		let vars: HashMap<String, String> = vars
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		Box::new(EnvSource::with_lookup(move |name| vars.get(name).cloned()))
	}

	fn block(layer: ProviderConfigLayer) -> Box<dyn ConfigSource> {
		Box::new(ProviderBlockSource::new(layer))
	}

	fn issues(err: ConfigError) -> Vec<ValidationIssue> {
		match err {
			ConfigError::Validation(issues) => issues,
			other => panic!("expected validation error, got {other:?}"),
		}
	}

	#[test]
	fn provider_block_overrides_environment() {
		let config = load_config_from(vec![
			block(ProviderConfigLayer {
				host: Some("https://sftpgo.example.com".to_string()),
				..Default::default()
			}),
			env(&[
				("SFTPGO_HOST", "http://localhost:8080"),
				("SFTPGO_API_KEY", "env-key"),
			]),
		])
		.unwrap();

		assert_eq!(config.host.as_str(), "https://sftpgo.example.com/");
		assert_eq!(config.auth, AuthMethod::ApiKey(SecretString::from("env-key")));
	}

	#[test]
	fn username_and_password_select_token_auth() {
		let config = load_config_from(vec![env(&[
			("SFTPGO_HOST", "http://localhost:8080"),
			("SFTPGO_USERNAME", "admin"),
			("SFTPGO_PASSWORD", "secret"),
		])])
		.unwrap();

		assert_eq!(
			config.auth,
			AuthMethod::Password {
				username: "admin".to_string(),
				password: SecretString::from("secret"),
			}
		);
	}

	#[test]
	fn api_key_wins_over_password() {
		let config = load_config_from(vec![env(&[
			("SFTPGO_HOST", "http://localhost:8080"),
			("SFTPGO_USERNAME", "admin"),
			("SFTPGO_PASSWORD", "secret"),
			("SFTPGO_API_KEY", "key"),
		])])
		.unwrap();
		assert!(matches!(config.auth, AuthMethod::ApiKey(_)));
	}

	#[test]
	fn reports_every_problem() {
		let err = load_config_from(vec![block(ProviderConfigLayer {
			host: Some("ftp://example.com".to_string()),
			username: Some("admin".to_string()),
			headers: Some(vec![("bad name".to_string(), "ok".to_string())]),
			..Default::default()
		})])
		.unwrap_err();

		let attributes: Vec<_> = issues(err).iter().map(|i| i.attribute).collect();
		assert_eq!(attributes, ["host", "password", "headers"]);
	}

	#[test]
	fn missing_everything() {
		let err = load_config_from(vec![env(&[])]).unwrap_err();
		let attributes: Vec<_> = issues(err).iter().map(|i| i.attribute).collect();
		assert_eq!(attributes, ["host", "api_key"]);
	}

	#[test]
	fn rejects_unparseable_host() {
		let err = load_config_from(vec![env(&[
			("SFTPGO_HOST", "not a url"),
			("SFTPGO_API_KEY", "key"),
		])])
		.unwrap_err();
		let issues = issues(err);
		assert_eq!(issues.len(), 1);
		assert!(issues[0].message.contains("invalid URL"));
	}
}
