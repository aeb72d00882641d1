// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use sftpgo_common_secret::SecretString;

/// A partial provider configuration as produced by one source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderConfigLayer {
	pub host: Option<String>,
	pub username: Option<String>,
	pub password: Option<SecretString>,
	pub api_key: Option<SecretString>,
	/// Replaces lower layers as a whole, headers are not merged by name.
	pub headers: Option<Vec<(String, String)>>,
}

impl ProviderConfigLayer {
	/// Overlays `other` on top of `self`. Set fields in `other` win.
	pub fn merge(&mut self, other: Self) {
		if other.host.is_some() {
			self.host = other.host;
		}
		if other.username.is_some() {
			self.username = other.username;
		}
		if other.password.is_some() {
			self.password = other.password;
		}
		if other.api_key.is_some() {
			self.api_key = other.api_key;
		}
		if other.headers.is_some() {
			self.headers = other.headers;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn set_fields_override() {
		let mut base = ProviderConfigLayer {
			host: Some("http://env:8080".to_string()),
			username: Some("env-user".to_string()),
			password: Some(SecretString::from("env-pass")),
			..Default::default()
		};
		base.merge(ProviderConfigLayer {
			host: Some("https://block".to_string()),
			headers: Some(vec![("X-A".to_string(), "1".to_string())]),
			..Default::default()
		});

		assert_eq!(base.host.as_deref(), Some("https://block"));
		assert_eq!(base.username.as_deref(), Some("env-user"));
		assert_eq!(base.password.as_ref().map(|p| p.expose().as_str()), Some("env-pass"));
		assert_eq!(base.headers.as_ref().map(Vec::len), Some(1));
	}

	#[test]
	fn empty_layer_changes_nothing() {
		let mut base = ProviderConfigLayer {
			api_key: Some(SecretString::from("k")),
			..Default::default()
		};
		let before = base.clone();
		base.merge(ProviderConfigLayer::default());
		assert_eq!(base, before);
	}
}
