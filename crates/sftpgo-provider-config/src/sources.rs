// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and the provider block.

use std::path::PathBuf;

use sftpgo_common_secret::SecretString;
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::layer::ProviderConfigLayer;

pub const ENV_HOST: &str = "SFTPGO_HOST";
pub const ENV_USERNAME: &str = "SFTPGO_USERNAME";
pub const ENV_PASSWORD: &str = "SFTPGO_PASSWORD";
pub const ENV_API_KEY: &str = "SFTPGO_API_KEY";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Environment = 10,
	ProviderBlock = 20,
}

pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ProviderConfigLayer>;
}

type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Environment variable source.
///
/// Secrets (`SFTPGO_PASSWORD`, `SFTPGO_API_KEY`) may instead be read from the
/// file named by `<NAME>_FILE`.
pub struct EnvSource {
	lookup: Lookup,
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl EnvSource {
	pub fn new() -> Self {
		Self::with_lookup(|name| std::env::var(name).ok())
	}

	/// Reads variables through `lookup` instead of the process environment.
	pub fn with_lookup(lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
		Self {
			lookup: Box::new(lookup),
		}
	}

	fn var(&self, name: &str) -> Option<String> {
		(self.lookup)(name).filter(|v| !v.is_empty())
	}

	fn secret(&self, name: &str) -> Result<Option<SecretString>> {
		let file_key = format!("{name}_FILE");
		match (self.var(name), self.var(&file_key)) {
			(Some(_), Some(_)) => Err(ConfigError::InvalidValue {
				key: name.to_string(),
				message: format!("set either {name} or {file_key}, not both"),
			}),
			(Some(value), None) => Ok(Some(SecretString::new(value))),
			(None, Some(path)) => {
				let path = PathBuf::from(path);
				debug!(key = name, path = %path.display(), "reading secret from file");
				let content =
					std::fs::read_to_string(&path).map_err(|source| ConfigError::FileRead {
						key: file_key.clone(),
						path: path.clone(),
						source,
					})?;
				let value = content.trim_end_matches(&['\r', '\n'][..]).to_string();
				Ok((!value.is_empty()).then(|| SecretString::new(value)))
			}
			(None, None) => Ok(None),
		}
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ProviderConfigLayer> {
		debug!("loading environment variables");
		Ok(ProviderConfigLayer {
			host: self.var(ENV_HOST),
			username: self.var(ENV_USERNAME),
			password: self.secret(ENV_PASSWORD)?,
			api_key: self.secret(ENV_API_KEY)?,
			headers: None,
		})
	}
}

/// Values set in the Terraform `provider "sftpgo"` block.
pub struct ProviderBlockSource {
	layer: ProviderConfigLayer,
}

impl ProviderBlockSource {
	pub fn new(layer: ProviderConfigLayer) -> Self {
		Self { layer }
	}
}

impl ConfigSource for ProviderBlockSource {
	fn name(&self) -> &'static str {
		"provider-block"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ProviderBlock
	}

	fn load(&self) -> Result<ProviderConfigLayer> {
		Ok(self.layer.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;
	use std::io::Write;

	fn env(vars: &[(&str, &str)]) -> EnvSource {
		let vars: HashMap<String, String> = vars
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		EnvSource::with_lookup(move |name| vars.get(name).cloned())
	}

	#[test]
	fn reads_plain_variables() {
		let layer = env(&[
			(ENV_HOST, "http://localhost:8080"),
			(ENV_USERNAME, "admin"),
			(ENV_PASSWORD, "password"),
			(ENV_API_KEY, ""),
		])
		.load()
		.unwrap();

		assert_eq!(layer.host.as_deref(), Some("http://localhost:8080"));
		assert_eq!(layer.username.as_deref(), Some("admin"));
		assert_eq!(layer.password.unwrap().expose(), "password");
		assert!(layer.api_key.is_none());
	}

	#[test]
	fn reads_secret_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "from-file-key").unwrap();
		let path = file.path().to_string_lossy().to_string();

		let layer = env(&[("SFTPGO_API_KEY_FILE", path.as_str())]).load().unwrap();
		assert_eq!(layer.api_key.unwrap().expose(), "from-file-key");
	}

	#[test]
	fn missing_secret_file_is_an_error() {
		let err = env(&[("SFTPGO_PASSWORD_FILE", "/nonexistent/sftpgo/password")])
			.load()
			.unwrap_err();
		assert!(matches!(err, ConfigError::FileRead { ref key, .. } if key == "SFTPGO_PASSWORD_FILE"));
	}

	#[test]
	fn value_and_file_together_are_rejected() {
		let err = env(&[
			(ENV_PASSWORD, "inline"),
			("SFTPGO_PASSWORD_FILE", "/tmp/password"),
		])
		.load()
		.unwrap_err();
		assert!(err.to_string().contains("not both"));
	}

	#[test]
	fn precedence_orders_block_last() {
		assert!(Precedence::Environment < Precedence::ProviderBlock);
	}
}
