// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use sftpgo_client::types::{
	Admin, EventAction, EventRule, Folder, Group, IpListEntry, IpListType, Role, User,
};
use sftpgo_client::SftpgoClient;
use tf_provider::Block;

use super::ResourceKind;
use crate::convert::{AttrPath, ConvertError, ConvertErrorKind};
use crate::models::admin::{self, AdminModel};
use crate::models::event_action::{self, EventActionModel};
use crate::models::event_rule::{self, EventRuleModel};
use crate::models::folder::{self, FolderModel};
use crate::models::group::{self, GroupModel};
use crate::models::ip_list::{self, IpListEntryModel};
use crate::models::role::{self, RoleModel};
use crate::models::user::{self, UserModel};

/// Objects addressed by a single unique name.
fn parse_name(id: &str) -> Result<String, ConvertError> {
	if id.is_empty() {
		return Err(ConvertError::new(
			&AttrPath::root().attr("id"),
			ConvertErrorKind::Invalid("the id must not be empty".to_string()),
		));
	}
	Ok(id.to_string())
}

macro_rules! named_kind {
	(
		$kind:ident, $name:literal, $model:ty, $api:ty, $module:ident, $key:ident,
		$create:ident, $get:ident, $update:ident, $delete:ident
	) => {
		pub struct $kind;

		#[async_trait]
		impl ResourceKind for $kind {
			type Model = $model;
			type Api = $api;
			type Key = String;

			const NAME: &'static str = $name;

			fn block() -> Block {
				$module::block()
			}

			fn parse_id(id: &str) -> Result<String, ConvertError> {
				parse_name(id)
			}

			fn key(api: &$api) -> String {
				api.$key.clone()
			}

			async fn create(client: &SftpgoClient, api: &$api) -> sftpgo_client::Result<()> {
				client.$create(api).await
			}

			async fn read(client: &SftpgoClient, key: &String) -> sftpgo_client::Result<$api> {
				client.$get(key).await
			}

			async fn update(
				client: &SftpgoClient,
				key: &String,
				api: &$api,
			) -> sftpgo_client::Result<()> {
				client.$update(key, api).await
			}

			async fn delete(client: &SftpgoClient, key: &String) -> sftpgo_client::Result<()> {
				client.$delete(key).await
			}
		}
	};
}

named_kind!(
	UserKind, "user", UserModel, User, user, username,
	create_user, get_user, update_user, delete_user
);
named_kind!(
	AdminKind, "admin", AdminModel, Admin, admin, username,
	create_admin, get_admin, update_admin, delete_admin
);
named_kind!(
	FolderKind, "folder", FolderModel, Folder, folder, name,
	create_folder, get_folder, update_folder, delete_folder
);
named_kind!(
	GroupKind, "group", GroupModel, Group, group, name,
	create_group, get_group, update_group, delete_group
);
named_kind!(
	RoleKind, "role", RoleModel, Role, role, name,
	create_role, get_role, update_role, delete_role
);
named_kind!(
	EventActionKind, "event_action", EventActionModel, EventAction, event_action, name,
	create_event_action, get_event_action, update_event_action, delete_event_action
);
named_kind!(
	EventRuleKind, "event_rule", EventRuleModel, EventRule, event_rule, name,
	create_event_rule, get_event_rule, update_event_rule, delete_event_rule
);

pub struct IpListEntryKind;

#[async_trait]
impl ResourceKind for IpListEntryKind {
	type Model = IpListEntryModel;
	type Api = IpListEntry;
	type Key = (IpListType, String);

	const NAME: &'static str = "ip_list_entry";

	fn block() -> Block {
		ip_list::block()
	}

	fn parse_id(id: &str) -> Result<Self::Key, ConvertError> {
		ip_list::parse_entry_id(id)
	}

	fn key(api: &IpListEntry) -> Self::Key {
		(api.list_type, api.ipornet.clone())
	}

	async fn create(client: &SftpgoClient, api: &IpListEntry) -> sftpgo_client::Result<()> {
		client.create_ip_list_entry(api).await
	}

	async fn read(client: &SftpgoClient, key: &Self::Key) -> sftpgo_client::Result<IpListEntry> {
		client.get_ip_list_entry(key.0, &key.1).await
	}

	// Type and network force a replacement, so the key always matches `api`.
	async fn update(
		client: &SftpgoClient,
		_key: &Self::Key,
		api: &IpListEntry,
	) -> sftpgo_client::Result<()> {
		client.update_ip_list_entry(api).await
	}

	async fn delete(client: &SftpgoClient, key: &Self::Key) -> sftpgo_client::Result<()> {
		client.delete_ip_list_entry(key.0, &key.1).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn named_ids_must_not_be_empty() {
		assert_eq!(UserKind::parse_id("alice").unwrap(), "alice");
		let err = RoleKind::parse_id("").unwrap_err();
		assert!(err.to_string().contains("must not be empty"));
	}

	#[test]
	fn ip_list_ids_carry_type_and_network() {
		let (list_type, ipornet) = IpListEntryKind::parse_id("2_10.0.0.0/8").unwrap();
		assert_eq!(list_type, IpListType::Defender);
		assert_eq!(ipornet, "10.0.0.0/8");
		assert!(IpListEntryKind::parse_id("10.0.0.0/8").is_err());
	}

	#[test]
	fn key_comes_from_the_api_object() {
		let user = User {
			username: "bob".to_string(),
			..Default::default()
		};
		assert_eq!(UserKind::key(&user), "bob");

		let entry = IpListEntry {
			ipornet: "192.168.1.0/24".to_string(),
			list_type: IpListType::RateLimiterSafeList,
			..Default::default()
		};
		assert_eq!(
			IpListEntryKind::key(&entry),
			(IpListType::RateLimiterSafeList, "192.168.1.0/24".to_string())
		);
	}

	#[test]
	fn every_kind_has_an_id_attribute() {
		let blocks = [
			UserKind::block(),
			AdminKind::block(),
			FolderKind::block(),
			GroupKind::block(),
			RoleKind::block(),
			EventActionKind::block(),
			EventRuleKind::block(),
			IpListEntryKind::block(),
		];
		for block in &blocks {
			assert!(block.attributes.contains_key("id"));
		}
	}
}
