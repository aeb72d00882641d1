// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The `provider "sftpgo"` block and resource registration.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sftpgo_client::{ClientConfig, Credentials, SftpgoClient};
use sftpgo_common_secret::SecretString;
use sftpgo_provider_config::{load_config, AuthMethod, ProviderConfig, ProviderConfigLayer};
use tf_provider::attribute_path::AttributePath;
use tf_provider::data_source::DynamicDataSource;
use tf_provider::resource::DynamicResource;
use tf_provider::{map, Block, Diagnostics, Provider, Schema, Value, ValueEmpty};
use tracing::{debug, info, warn};

use crate::convert::value::StringValue;
use crate::data_sources::{self, ListDataSource};
use crate::diag;
use crate::resources::{kinds, ApiResource};
use crate::schema::BlockBuilder;

/// The configured API client, shared by every resource and data source.
///
/// Set once by `configure`; Terraform only calls resources afterwards.
#[derive(Debug, Clone, Default)]
pub struct ClientHandle(Arc<OnceLock<SftpgoClient>>);

impl ClientHandle {
	pub fn get(&self, diags: &mut Diagnostics) -> Option<SftpgoClient> {
		match self.0.get() {
			Some(client) => Some(client.clone()),
			None => {
				diags.root_error(
					"Provider not configured",
					"the SFTPGo client is used before the provider block was configured",
				);
				None
			}
		}
	}

	fn set(&self, client: SftpgoClient) {
		if self.0.set(client).is_err() {
			warn!("provider configured twice, keeping the first client");
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderModel {
	pub key: StringValue,
	pub value: StringValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfigModel {
	pub host: StringValue,
	pub username: StringValue,
	pub password: StringValue,
	pub api_key: StringValue,
	pub headers: Value<Vec<HeaderModel>>,
}

fn provider_block() -> Block {
	BlockBuilder::new("Manages users, folders, groups, admins, roles, IP lists and event rules of an SFTPGo server.")
		.optional_string("host", "Base URL of SFTPGo, e.g. `https://sftpgo.example.com`. Env: `SFTPGO_HOST`.")
		.optional_string("username", "Admin username for token auth. Env: `SFTPGO_USERNAME`.")
		.secret("password", "Admin password. Env: `SFTPGO_PASSWORD` or `SFTPGO_PASSWORD_FILE`.")
		.secret("api_key", "Admin API key, preferred over username and password. Env: `SFTPGO_API_KEY` or `SFTPGO_API_KEY_FILE`.")
		.list(
			"headers",
			BlockBuilder::new("Extra header sent with every request.")
				.required_string("key", "Header name.")
				.required_string("value", "Header value.")
				.build(),
		)
		.build()
}

/// An attribute that must be known before the client can be built.
fn configured(
	diags: &mut Diagnostics,
	value: &StringValue,
	attribute: AttributePath,
) -> Option<Option<String>> {
	match value {
		Value::Value(s) => Some(Some(s.clone())),
		Value::Null => Some(None),
		Value::Unknown => {
			diags.error(
				"Unknown provider configuration",
				"this value depends on a resource that is not created yet; \
				 the provider needs it to connect to SFTPGo",
				attribute,
			);
			None
		}
	}
}

fn to_layer(diags: &mut Diagnostics, config: &ProviderConfigModel) -> Option<ProviderConfigLayer> {
	let host = configured(diags, &config.host, AttributePath::new("host"));
	let username = configured(diags, &config.username, AttributePath::new("username"));
	let password = configured(diags, &config.password, AttributePath::new("password"));
	let api_key = configured(diags, &config.api_key, AttributePath::new("api_key"));

	let headers = match &config.headers {
		Value::Value(headers) => {
			let mut pairs = Vec::with_capacity(headers.len());
			for (i, header) in headers.iter().enumerate() {
				let path = AttributePath::new("headers").index(i as i64);
				let key = configured(diags, &header.key, path.clone().attribute("key"));
				let value = configured(diags, &header.value, path.attribute("value"));
				if let (Some(key), Some(value)) = (key, value) {
					pairs.push((key.unwrap_or_default(), value.unwrap_or_default()));
				}
			}
			Some(pairs)
		}
		_ => None,
	};

	Some(ProviderConfigLayer {
		host: host?,
		username: username?,
		password: password?.map(SecretString::from),
		api_key: api_key?.map(SecretString::from),
		headers: headers.filter(|h| !h.is_empty()),
	})
}

fn build_client(config: ProviderConfig) -> sftpgo_client::Result<SftpgoClient> {
	let credentials = match config.auth {
		AuthMethod::ApiKey(key) => Credentials::ApiKey(key),
		AuthMethod::Password { username, password } => Credentials::Basic { username, password },
	};
	let mut builder = SftpgoClient::builder()
		.base_url(config.host.as_str())
		.credentials(credentials)
		.config(ClientConfig::default());
	for (name, value) in config.headers {
		builder = builder.header(name, value);
	}
	builder.build()
}

#[derive(Debug, Clone, Default)]
pub struct SftpgoProvider {
	client: ClientHandle,
}

impl SftpgoProvider {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl Provider for SftpgoProvider {
	type Config<'a> = ProviderConfigModel;
	type MetaState<'a> = ValueEmpty;

	fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
		Some(Schema {
			version: 0,
			block: provider_block(),
		})
	}

	async fn validate<'a>(&self, _diags: &mut Diagnostics, _config: Self::Config<'a>) -> Option<()> {
		// Environment variables may fill the gaps, so checks happen in configure.
		Some(())
	}

	async fn configure<'a>(
		&self,
		diags: &mut Diagnostics,
		terraform_version: String,
		config: Self::Config<'a>,
	) -> Option<()> {
		debug!(%terraform_version, "configuring provider");
		let layer = to_layer(diags, &config)?;
		let config = match load_config(layer) {
			Ok(config) => config,
			Err(e) => {
				diag::config_error(diags, e);
				return None;
			}
		};
		let host = config.host.clone();
		match build_client(config) {
			Ok(client) => {
				self.client.set(client);
				info!(%host, "SFTPGo client ready");
				Some(())
			}
			Err(e) => {
				diag::client_error(diags, "build the SFTPGo client", &e);
				None
			}
		}
	}

	fn get_resources(
		&self,
		_diags: &mut Diagnostics,
	) -> Option<HashMap<String, Box<dyn DynamicResource>>> {
		let client = &self.client;
		Some(map! {
			"user" => ApiResource::<kinds::UserKind>::new(client.clone()),
			"admin" => ApiResource::<kinds::AdminKind>::new(client.clone()),
			"folder" => ApiResource::<kinds::FolderKind>::new(client.clone()),
			"group" => ApiResource::<kinds::GroupKind>::new(client.clone()),
			"role" => ApiResource::<kinds::RoleKind>::new(client.clone()),
			"event_action" => ApiResource::<kinds::EventActionKind>::new(client.clone()),
			"event_rule" => ApiResource::<kinds::EventRuleKind>::new(client.clone()),
			"ip_list_entry" => ApiResource::<kinds::IpListEntryKind>::new(client.clone()),
		})
	}

	fn get_data_sources(
		&self,
		_diags: &mut Diagnostics,
	) -> Option<HashMap<String, Box<dyn DynamicDataSource>>> {
		let client = &self.client;
		Some(map! {
			"users" => ListDataSource::<data_sources::Users>::new(client.clone()),
			"admins" => ListDataSource::<data_sources::Admins>::new(client.clone()),
			"folders" => ListDataSource::<data_sources::Folders>::new(client.clone()),
			"groups" => ListDataSource::<data_sources::Groups>::new(client.clone()),
			"roles" => ListDataSource::<data_sources::Roles>::new(client.clone()),
			"event_actions" => ListDataSource::<data_sources::EventActions>::new(client.clone()),
			"event_rules" => ListDataSource::<data_sources::EventRules>::new(client.clone()),
			"ip_list_entries" => ListDataSource::<data_sources::IpListEntries>::new(client.clone()),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn config(host: StringValue, api_key: StringValue) -> ProviderConfigModel {
		ProviderConfigModel {
			host,
			username: Value::Null,
			password: Value::Null,
			api_key,
			headers: Value::Value(vec![HeaderModel {
				key: Value::Value("X-Tenant".to_string()),
				value: Value::Value("blue".to_string()),
			}]),
		}
	}

	#[test]
	fn layer_carries_block_values() {
		let mut diags = Diagnostics::default();
		let layer = to_layer(
			&mut diags,
			&config(
				Value::Value("https://sftpgo.example.com".to_string()),
				Value::Value("key".to_string()),
			),
		)
		.unwrap();
		assert_eq!(layer.host.as_deref(), Some("https://sftpgo.example.com"));
		assert_eq!(layer.username, None);
		assert_eq!(layer.api_key.as_ref().map(|k| k.expose().as_str()), Some("key"));
		assert_eq!(layer.headers, Some(vec![("X-Tenant".to_string(), "blue".to_string())]));
	}

	#[test]
	fn unknown_values_abort_configuration() {
		let mut diags = Diagnostics::default();
		let layer = to_layer(&mut diags, &config(Value::Unknown, Value::Unknown));
		assert!(layer.is_none());
	}

	#[test]
	fn client_is_built_from_resolved_config() {
		let client = build_client(ProviderConfig {
			host: "https://sftpgo.example.com/base".parse().unwrap(),
			auth: AuthMethod::ApiKey(SecretString::from("key")),
			headers: vec![("X-Tenant".to_string(), "blue".to_string())],
		})
		.unwrap();
		assert_eq!(client.base_url().as_str(), "https://sftpgo.example.com/base");
	}

	#[test]
	fn provider_schema_starts_at_version_zero() {
		let schema = SftpgoProvider::new().schema(&mut Diagnostics::default()).unwrap();
		assert_eq!(schema.version, 0);
	}

	#[test]
	fn handle_reports_missing_configuration() {
		let handle = ClientHandle::default();
		let mut diags = Diagnostics::default();
		assert!(handle.get(&mut diags).is_none());
	}
}
