// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Data sources that list every object of one kind.

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sftpgo_client::types::IpListType;
use sftpgo_client::SftpgoClient;
use tf_provider::data_source::DataSource;
use tf_provider::{Block, Diagnostics, Schema, Value, ValueEmpty};
use tracing::debug;

use crate::convert::value::{int, StringValue};
use crate::convert::{
	check_discriminant, ApiModel, AttrPath, ConvertError, ConvertErrorKind, ConvertErrors,
};
use crate::diag;
use crate::models::admin::{self, AdminModel};
use crate::models::event_action::{self, EventActionModel};
use crate::models::event_rule::{self, EventRuleModel};
use crate::models::folder::{self, FolderModel};
use crate::models::group::{self, GroupModel};
use crate::models::ip_list::{self, IpListEntryModel};
use crate::models::role::{self, RoleModel};
use crate::models::user::{self, UserModel};
use crate::provider::ClientHandle;
use crate::schema::BlockBuilder;

/// One listing data source.
#[async_trait]
pub trait ListKind: Send + Sync + 'static {
	type Model: ApiModel + Send + Sync;
	type State: Clone + Serialize + DeserializeOwned + Send + Sync + 'static;
	/// Parameters taken from the configuration.
	type Query: Send + Sync;

	/// Data source type name without the `sftpgo_` prefix.
	const NAME: &'static str;

	fn block() -> Block;

	fn query(state: &Self::State) -> Result<Self::Query, ConvertErrors>;

	async fn fetch(
		client: &SftpgoClient,
		query: &Self::Query,
	) -> sftpgo_client::Result<Vec<<Self::Model as ApiModel>::Api>>;

	/// Stores the listed objects and the computed id into `state`.
	fn finish(state: Self::State, query: &Self::Query, items: Vec<Self::Model>) -> Self::State;
}

pub struct ListDataSource<K> {
	client: ClientHandle,
	kind: PhantomData<fn() -> K>,
}

impl<K: ListKind> ListDataSource<K> {
	pub fn new(client: ClientHandle) -> Self {
		Self {
			client,
			kind: PhantomData,
		}
	}
}

#[async_trait]
impl<K: ListKind> DataSource for ListDataSource<K> {
	type State<'a> = Value<K::State>;
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
		match K::query(&config) {
			Ok(_) => Some(()),
			// Unknown inputs are resolved by the time `read` runs.
			Err(errors) if errors.iter().all(|e| e.kind == ConvertErrorKind::Unknown) => Some(()),
			Err(errors) => {
				diag::convert_errors(diags, &format!("Invalid {} configuration", K::NAME), errors);
				None
			}
		}
	}

	async fn read<'a>(
		&self,
		diags: &mut Diagnostics,
		config: Self::State<'a>,
		_provider_meta_state: Self::ProviderMetaState<'a>,
	) -> Option<Self::State<'a>> {
		let Value::Value(config) = config else {
			diags.root_error(format!("Missing {} configuration", K::NAME), "the configuration is null");
			return None;
		};
		let query = match K::query(&config) {
			Ok(query) => query,
			Err(errors) => {
				diag::convert_errors(diags, &format!("Invalid {} configuration", K::NAME), errors);
				return None;
			}
		};
		let client = self.client.get(diags)?;
		let items = match K::fetch(&client, &query).await {
			Ok(items) => items,
			Err(e) => {
				diag::client_error(diags, &format!("list {}", K::NAME), &e);
				return None;
			}
		};
		debug!(data_source = K::NAME, count = items.len(), "listed");
		let items = items.iter().map(K::Model::from_api).collect();
		Some(Value::Value(K::finish(config, &query, items)))
	}
}

macro_rules! list_kind {
	(
		$kind:ident, $state:ident, $name:literal, $field:ident, $model:ty, $module:ident,
		$sensitive:literal, $list:ident, $description:literal
	) => {
		#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
		pub struct $state {
			pub id: StringValue,
			pub $field: Value<Vec<$model>>,
		}

		pub struct $kind;

		#[async_trait]
		impl ListKind for $kind {
			type Model = $model;
			type State = $state;
			type Query = ();

			const NAME: &'static str = $name;

			fn block() -> Block {
				BlockBuilder::new($description)
					.computed_string("id", "Constant identifier of the listing.")
					.computed_objects(stringify!($field), &$module::block(), $sensitive, "Every object.")
					.build()
			}

			fn query(_state: &$state) -> Result<(), ConvertErrors> {
				Ok(())
			}

			async fn fetch(
				client: &SftpgoClient,
				_query: &(),
			) -> sftpgo_client::Result<Vec<<$model as ApiModel>::Api>> {
				client.$list().await
			}

			fn finish(_state: $state, _query: &(), items: Vec<$model>) -> $state {
				$state {
					id: Value::Value($name.to_string()),
					$field: Value::Value(items),
				}
			}
		}
	};
}

list_kind!(
	Users, UsersState, "users", users, UserModel, user, true, list_users,
	"Every SFTPGo user."
);
list_kind!(
	Admins, AdminsState, "admins", admins, AdminModel, admin, false, list_admins,
	"Every SFTPGo admin."
);
list_kind!(
	Folders, FoldersState, "folders", folders, FolderModel, folder, true, list_folders,
	"Every SFTPGo virtual folder."
);
list_kind!(
	Groups, GroupsState, "groups", groups, GroupModel, group, true, list_groups,
	"Every SFTPGo group."
);
list_kind!(
	Roles, RolesState, "roles", roles, RoleModel, role, false, list_roles,
	"Every SFTPGo role."
);
list_kind!(
	EventActions, EventActionsState, "event_actions", actions, EventActionModel, event_action,
	true, list_event_actions, "Every SFTPGo event action."
);
list_kind!(
	EventRules, EventRulesState, "event_rules", rules, EventRuleModel, event_rule, false,
	list_event_rules, "Every SFTPGo event rule."
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpListEntriesState {
	pub id: StringValue,
	#[serde(rename = "type")]
	pub list_type: Value<i64>,
	pub entries: Value<Vec<IpListEntryModel>>,
}

pub struct IpListEntries;

#[async_trait]
impl ListKind for IpListEntries {
	type Model = IpListEntryModel;
	type State = IpListEntriesState;
	type Query = IpListType;

	const NAME: &'static str = "ip_list_entries";

	fn block() -> Block {
		BlockBuilder::new("Entries of one SFTPGo IP list.")
			.computed_string("id", "`ip_list_entries_<type>`.")
			.required_int("type", "1 allow list, 2 defender, 3 rate limiter safe list.")
			.computed_objects("entries", &ip_list::block(), false, "Every entry of the list.")
			.build()
	}

	fn query(state: &IpListEntriesState) -> Result<IpListType, ConvertErrors> {
		let path = AttrPath::root().attr("type");
		let value = int(&state.list_type, &path)?;
		check_discriminant(value, &path, "IP list type", 1, 3)?;
		IpListType::try_from(value)
			.map_err(|e| ConvertError::new(&path, ConvertErrorKind::Invalid(e.to_string())).into())
	}

	async fn fetch(
		client: &SftpgoClient,
		query: &IpListType,
	) -> sftpgo_client::Result<Vec<sftpgo_client::types::IpListEntry>> {
		client.list_ip_list_entries(*query).await
	}

	fn finish(
		state: IpListEntriesState,
		query: &IpListType,
		items: Vec<IpListEntryModel>,
	) -> IpListEntriesState {
		IpListEntriesState {
			id: Value::Value(format!("{}_{query}", Self::NAME)),
			entries: Value::Value(items),
			..state
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::schema::field_names;

	#[test]
	fn named_listings_expose_id_and_items() {
		assert_eq!(field_names(&Users::block()), ["id", "users"]);
		assert_eq!(field_names(&EventActions::block()), ["actions", "id"]);
		assert!(Users::block().attributes["users"].sensitive);
		assert!(!Roles::block().attributes["roles"].sensitive);
	}

	#[test]
	fn finish_fills_id_and_items() {
		let state = RolesState {
			id: Value::Unknown,
			roles: Value::Unknown,
		};
		let roles = vec![RoleModel::from_api(&sftpgo_client::types::Role {
			name: "ops".to_string(),
			..Default::default()
		})];
		let state = Roles::finish(state, &(), roles);
		assert_eq!(state.id, Value::Value("roles".to_string()));
		let Value::Value(roles) = state.roles else {
			panic!("expected roles");
		};
		assert_eq!(roles[0].name, Value::Value("ops".to_string()));
	}

	fn ip_state(list_type: Value<i64>) -> IpListEntriesState {
		IpListEntriesState {
			id: Value::Unknown,
			list_type,
			entries: Value::Unknown,
		}
	}

	#[test]
	fn ip_listing_requires_a_valid_type() {
		assert_eq!(
			IpListEntries::query(&ip_state(Value::Value(2))).unwrap(),
			IpListType::Defender
		);
		let err = IpListEntries::query(&ip_state(Value::Value(4))).unwrap_err();
		assert!(err.to_string().contains("IP list type"));
		assert!(IpListEntries::query(&ip_state(Value::Null)).is_err());
	}

	#[test]
	fn ip_listing_id_includes_the_type() {
		let state = IpListEntries::finish(
			ip_state(Value::Value(3)),
			&IpListType::RateLimiterSafeList,
			vec![],
		);
		assert_eq!(state.id, Value::Value("ip_list_entries_3".to_string()));
		assert_eq!(state.list_type, Value::Value(3));
		assert_eq!(state.entries, Value::Value(vec![]));
	}

	#[tokio::test]
	async fn read_without_configuration_fails() {
		let source = ListDataSource::<Roles>::new(ClientHandle::default());
		let mut diags = Diagnostics::default();
		let config = RolesState {
			id: Value::Unknown,
			roles: Value::Unknown,
		};
		assert!(source.read(&mut diags, Value::Value(config), Value::Null).await.is_none());
	}
}
