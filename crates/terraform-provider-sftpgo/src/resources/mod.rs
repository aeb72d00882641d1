// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Managed resources.
//!
//! Every SFTPGo object follows the same lifecycle, so a single adapter,
//! [`ApiResource`], implements the Terraform resource protocol and delegates
//! the object specific parts (schema, id parsing and REST calls) to a
//! [`ResourceKind`].

pub mod kinds;

use std::marker::PhantomData;

use async_trait::async_trait;
use sftpgo_client::SftpgoClient;
use tf_provider::attribute_path::AttributePath;
use tf_provider::resource::Resource;
use tf_provider::{Block, Diagnostics, Schema, Value, ValueEmpty};
use tracing::{debug, info, warn};

use crate::convert::value::known_str;
use crate::convert::{ApiModel, AttrPath, ConvertError};
use crate::diag;
use crate::models::{settle, ResourceModel};
use crate::provider::ClientHandle;

/// The object specific half of a managed resource.
#[async_trait]
pub trait ResourceKind: Send + Sync + 'static {
	type Model: ResourceModel<Api = Self::Api>;
	type Api: PartialEq + Send + Sync + 'static;
	/// What the REST API addresses the object by.
	type Key: Send + Sync;

	/// Resource type name without the `sftpgo_` prefix.
	const NAME: &'static str;

	fn block() -> Block;

	/// Parses a Terraform id, as stored in state or given to `terraform import`.
	fn parse_id(id: &str) -> Result<Self::Key, ConvertError>;

	fn key(api: &Self::Api) -> Self::Key;

	async fn create(client: &SftpgoClient, api: &Self::Api) -> sftpgo_client::Result<()>;

	async fn read(client: &SftpgoClient, key: &Self::Key) -> sftpgo_client::Result<Self::Api>;

	async fn update(
		client: &SftpgoClient,
		key: &Self::Key,
		api: &Self::Api,
	) -> sftpgo_client::Result<()>;

	async fn delete(client: &SftpgoClient, key: &Self::Key) -> sftpgo_client::Result<()>;
}

pub struct ApiResource<K> {
	client: ClientHandle,
	kind: PhantomData<fn() -> K>,
}

impl<K: ResourceKind> ApiResource<K> {
	pub fn new(client: ClientHandle) -> Self {
		Self {
			client,
			kind: PhantomData,
		}
	}

	fn expect_state(diags: &mut Diagnostics, state: Value<K::Model>, what: &str) -> Option<K::Model> {
		match state {
			Value::Value(model) => Some(model),
			_ => {
				diags.root_error(
					format!("Missing {} state", K::NAME),
					format!("the {what} state is null or unknown"),
				);
				None
			}
		}
	}

	fn to_api(diags: &mut Diagnostics, model: &K::Model) -> Option<K::Api> {
		match model.to_api(&AttrPath::root()) {
			Ok(api) => Some(api),
			Err(errors) => {
				diag::convert_errors(diags, &format!("Invalid {} attributes", K::NAME), errors);
				None
			}
		}
	}

	fn key_of(diags: &mut Diagnostics, model: &K::Model) -> Option<K::Key> {
		let Some(id) = known_str(model.id()) else {
			diags.root_error(
				format!("Missing {} id", K::NAME),
				"the state has no id, refresh or re-import the resource",
			);
			return None;
		};
		match K::parse_id(id) {
			Ok(key) => Some(key),
			Err(e) => {
				diag::convert_errors(diags, &format!("Invalid {} id", K::NAME), [e]);
				None
			}
		}
	}

	/// Reads the object back after a write and settles it against `desired`.
	async fn refresh(
		diags: &mut Diagnostics,
		client: &SftpgoClient,
		key: &K::Key,
		desired: &K::Model,
	) -> Option<K::Model> {
		match K::read(client, key).await {
			Ok(api) => Some(settle(desired, K::Model::from_api(&api))),
			Err(e) => {
				diag::client_error(diags, &format!("read {} after writing it", K::NAME), &e);
				None
			}
		}
	}
}

#[async_trait]
impl<K: ResourceKind> Resource for ApiResource<K> {
	type State<'a> = Value<K::Model>;
	type PrivateState<'a> = ValueEmpty;
	type ProviderMetaState<'a> = ValueEmpty;

	fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
		Some(Schema {
			version: 0,
			block: K::block(),
		})
	}

	async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
		let Value::Value(config) = config else {
			return Some(());
		};
		let errors = config.validate();
		if errors.is_empty() {
			Some(())
		} else {
			diag::convert_errors(diags, &format!("Invalid {} configuration", K::NAME), errors);
			None
		}
	}

	async fn read<'a>(
		&self,
		diags: &mut Diagnostics,
		state: Self::State<'a>,
		private_state: Self::PrivateState<'a>,
		_provider_meta_state: Self::ProviderMetaState<'a>,
	) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
		let Value::Value(prior) = state else {
			return Some((Value::Null, private_state));
		};
		let client = self.client.get(diags)?;
		let key = Self::key_of(diags, &prior)?;
		match K::read(&client, &key).await {
			Ok(api) => {
				let state = settle(&prior, K::Model::from_api(&api));
				Some((Value::Value(state), private_state))
			}
			Err(e) if e.is_not_found() => {
				warn!(
					resource = K::NAME,
					id = known_str(prior.id()).unwrap_or_default(),
					"object no longer exists, removing it from state"
				);
				Some((Value::Null, private_state))
			}
			Err(e) => {
				diag::client_error(diags, &format!("read {}", K::NAME), &e);
				None
			}
		}
	}

	async fn plan_create<'a>(
		&self,
		diags: &mut Diagnostics,
		proposed_state: Self::State<'a>,
		_config_state: Self::State<'a>,
		_provider_meta_state: Self::ProviderMetaState<'a>,
	) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
		let mut planned = Self::expect_state(diags, proposed_state, "proposed")?;
		planned.computed_unknown();
		Some((Value::Value(planned), Value::Null))
	}

	async fn plan_update<'a>(
		&self,
		diags: &mut Diagnostics,
		prior_state: Self::State<'a>,
		proposed_state: Self::State<'a>,
		_config_state: Self::State<'a>,
		prior_private_state: Self::PrivateState<'a>,
		_provider_meta_state: Self::ProviderMetaState<'a>,
	) -> Option<(Self::State<'a>, Self::PrivateState<'a>, Vec<AttributePath>)> {
		let prior = Self::expect_state(diags, prior_state, "prior")?;
		let mut planned = Self::expect_state(diags, proposed_state, "proposed")?;

		planned.merge_computed(&prior);
		let replace = planned.requires_replace(&prior);
		if !replace.is_empty() {
			planned.computed_unknown();
		} else if planned != prior {
			planned.mark_updated();
		}

		let replace = replace.iter().filter_map(diag::attribute_path).collect();
		Some((Value::Value(planned), prior_private_state, replace))
	}

	async fn plan_destroy<'a>(
		&self,
		_diags: &mut Diagnostics,
		_prior_state: Self::State<'a>,
		_prior_private_state: Self::PrivateState<'a>,
		_provider_meta_state: Self::ProviderMetaState<'a>,
	) -> Option<()> {
		Some(())
	}

	async fn create<'a>(
		&self,
		diags: &mut Diagnostics,
		planned_state: Self::State<'a>,
		_config_state: Self::State<'a>,
		planned_private_state: Self::PrivateState<'a>,
		_provider_meta_state: Self::ProviderMetaState<'a>,
	) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
		let planned = Self::expect_state(diags, planned_state, "planned")?;
		let client = self.client.get(diags)?;
		let api = Self::to_api(diags, &planned)?;

		if let Err(e) = K::create(&client, &api).await {
			diag::client_error(diags, &format!("create {}", K::NAME), &e);
			return None;
		}
		let key = K::key(&api);
		let state = Self::refresh(diags, &client, &key, &planned).await?;
		info!(
			resource = K::NAME,
			id = known_str(state.id()).unwrap_or_default(),
			"created"
		);
		Some((Value::Value(state), planned_private_state))
	}

	async fn update<'a>(
		&self,
		diags: &mut Diagnostics,
		prior_state: Self::State<'a>,
		planned_state: Self::State<'a>,
		_config_state: Self::State<'a>,
		planned_private_state: Self::PrivateState<'a>,
		_provider_meta_state: Self::ProviderMetaState<'a>,
	) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
		let prior = Self::expect_state(diags, prior_state, "prior")?;
		let planned = Self::expect_state(diags, planned_state, "planned")?;
		let client = self.client.get(diags)?;
		let key = Self::key_of(diags, &prior)?;
		let api = Self::to_api(diags, &planned)?;

		if let Err(e) = K::update(&client, &key, &api).await {
			diag::client_error(diags, &format!("update {}", K::NAME), &e);
			return None;
		}
		let state = Self::refresh(diags, &client, &key, &planned).await?;
		info!(
			resource = K::NAME,
			id = known_str(state.id()).unwrap_or_default(),
			"updated"
		);
		Some((Value::Value(state), planned_private_state))
	}

	async fn destroy<'a>(
		&self,
		diags: &mut Diagnostics,
		prior_state: Self::State<'a>,
		_provider_meta_state: Self::ProviderMetaState<'a>,
	) -> Option<()> {
		let prior = Self::expect_state(diags, prior_state, "prior")?;
		let client = self.client.get(diags)?;
		let key = Self::key_of(diags, &prior)?;
		let id = known_str(prior.id()).unwrap_or_default();

		match K::delete(&client, &key).await {
			Ok(()) => {
				info!(resource = K::NAME, id, "deleted");
				Some(())
			}
			Err(e) if e.is_not_found() => {
				debug!(resource = K::NAME, id, "already deleted");
				Some(())
			}
			Err(e) => {
				diag::client_error(diags, &format!("delete {}", K::NAME), &e);
				None
			}
		}
	}

	async fn import<'a>(
		&self,
		diags: &mut Diagnostics,
		id: String,
	) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
		let client = self.client.get(diags)?;
		let key = match K::parse_id(&id) {
			Ok(key) => key,
			Err(e) => {
				diag::convert_errors(diags, &format!("Invalid {} import id", K::NAME), [e]);
				return None;
			}
		};
		match K::read(&client, &key).await {
			Ok(api) => {
				info!(resource = K::NAME, id = %id, "imported");
				Some((Value::Value(K::Model::from_api(&api)), Value::Null))
			}
			Err(e) => {
				diag::client_error(diags, &format!("import {} {id:?}", K::NAME), &e);
				None
			}
		}
	}
}
