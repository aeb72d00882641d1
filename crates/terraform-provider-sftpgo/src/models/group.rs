// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Groups carry user settings that SFTPGo merges into every member.

use serde::{Deserialize, Serialize};
use sftpgo_client::types::{Group, GroupUserSettings};
use tf_provider::{Block, Value};

use super::filesystem::{self, FilesystemModel};
use super::filters::{self, UserFiltersModel};
use super::folder::{virtual_folder_block, VirtualFolderModel};
use super::{replace_if_changed, ResourceModel};
use crate::convert::value::{
	blocks, computed, int, known, list, non_zero, non_zero_object, object, string, with_nested,
	IntValue, StringMap, StringValue,
};
use crate::convert::{permissions, ApiModel, AttrPath, ConvertError, Result};
use crate::schema::BlockBuilder;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupModel {
	pub id: StringValue,
	pub numeric_id: IntValue,
	pub name: StringValue,
	pub description: StringValue,
	pub created_at: IntValue,
	pub updated_at: IntValue,
	pub user_settings: Value<GroupUserSettingsModel>,
	pub virtual_folders: Value<Vec<VirtualFolderModel>>,
}

impl ApiModel for GroupModel {
	type Api = Group;

	fn to_api(&self, path: &AttrPath) -> Result<Group> {
		Ok(Group {
			id: computed(&self.numeric_id),
			name: string(&self.name, &path.attr("name"))?,
			description: string(&self.description, &path.attr("description"))?,
			created_at: computed(&self.created_at),
			updated_at: computed(&self.updated_at),
			user_settings: object(&self.user_settings, &path.attr("user_settings"))?,
			virtual_folders: list(&self.virtual_folders, &path.attr("virtual_folders"))?,
		})
	}

	fn from_api(api: &Group) -> Self {
		Self {
			id: known(&api.name),
			numeric_id: known(&api.id),
			name: known(&api.name),
			description: non_zero(&api.description),
			created_at: known(&api.created_at),
			updated_at: known(&api.updated_at),
			user_settings: non_zero_object(&api.user_settings),
			virtual_folders: blocks(&api.virtual_folders),
		}
	}
}

impl ResourceModel for GroupModel {
	fn id(&self) -> &StringValue {
		&self.id
	}

	fn computed_unknown(&mut self) {
		self.id = self.name.clone();
		self.numeric_id = Value::Unknown;
		self.created_at = Value::Unknown;
		self.updated_at = Value::Unknown;
	}

	fn merge_computed(&mut self, server: &Self) {
		self.id = server.id.clone();
		self.numeric_id = server.numeric_id.clone();
		self.created_at = server.created_at.clone();
		self.updated_at = server.updated_at.clone();
	}

	fn merge_secrets(&mut self, desired: &Self) {
		with_nested(&mut self.user_settings, &desired.user_settings, |t, s| {
			with_nested(&mut t.filesystem, &s.filesystem, |t, s| t.merge_secrets(s));
		});
	}

	fn mark_updated(&mut self) {
		self.updated_at = Value::Unknown;
	}

	fn requires_replace(&self, prior: &Self) -> Vec<AttrPath> {
		let mut paths = Vec::new();
		replace_if_changed(&mut paths, "name", &self.name, &prior.name);
		paths
	}

	fn validate(&self) -> Vec<ConvertError> {
		let mut errors = Vec::new();
		if let Value::Value(settings) = &self.user_settings {
			if let Value::Value(fs) = &settings.filesystem {
				let path = AttrPath::root().attr("user_settings").attr("filesystem");
				fs.validate(&path, &mut errors);
			}
		}
		errors
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupUserSettingsModel {
	pub home_dir: StringValue,
	pub max_sessions: IntValue,
	pub quota_size: IntValue,
	pub quota_files: IntValue,
	pub permissions: StringMap,
	pub upload_bandwidth: IntValue,
	pub download_bandwidth: IntValue,
	pub upload_data_transfer: IntValue,
	pub download_data_transfer: IntValue,
	pub total_data_transfer: IntValue,
	pub expires_in: IntValue,
	pub filters: Value<UserFiltersModel>,
	pub filesystem: Value<FilesystemModel>,
}

impl ApiModel for GroupUserSettingsModel {
	type Api = GroupUserSettings;

	fn to_api(&self, path: &AttrPath) -> Result<GroupUserSettings> {
		Ok(GroupUserSettings {
			home_dir: string(&self.home_dir, &path.attr("home_dir"))?,
			max_sessions: int(&self.max_sessions, &path.attr("max_sessions"))?,
			quota_size: int(&self.quota_size, &path.attr("quota_size"))?,
			quota_files: int(&self.quota_files, &path.attr("quota_files"))?,
			permissions: permissions::to_api(&self.permissions, &path.attr("permissions"))?,
			upload_bandwidth: int(&self.upload_bandwidth, &path.attr("upload_bandwidth"))?,
			download_bandwidth: int(&self.download_bandwidth, &path.attr("download_bandwidth"))?,
			upload_data_transfer: int(&self.upload_data_transfer, &path.attr("upload_data_transfer"))?,
			download_data_transfer: int(
				&self.download_data_transfer,
				&path.attr("download_data_transfer"),
			)?,
			total_data_transfer: int(&self.total_data_transfer, &path.attr("total_data_transfer"))?,
			expires_in: int(&self.expires_in, &path.attr("expires_in"))?,
			filters: object(&self.filters, &path.attr("filters"))?,
			filesystem: object(&self.filesystem, &path.attr("filesystem"))?,
		})
	}

	fn from_api(api: &GroupUserSettings) -> Self {
		Self {
			home_dir: non_zero(&api.home_dir),
			max_sessions: non_zero(&api.max_sessions),
			quota_size: non_zero(&api.quota_size),
			quota_files: non_zero(&api.quota_files),
			permissions: permissions::from_api(&api.permissions),
			upload_bandwidth: non_zero(&api.upload_bandwidth),
			download_bandwidth: non_zero(&api.download_bandwidth),
			upload_data_transfer: non_zero(&api.upload_data_transfer),
			download_data_transfer: non_zero(&api.download_data_transfer),
			total_data_transfer: non_zero(&api.total_data_transfer),
			expires_in: non_zero(&api.expires_in),
			filters: non_zero_object(&api.filters),
			filesystem: non_zero_object(&api.filesystem),
		}
	}
}

pub fn block() -> Block {
	BlockBuilder::new("A group of users sharing settings and virtual folders.")
		.computed_string("id", "Same as `name`.")
		.computed_int("numeric_id", "Numeric id assigned by SFTPGo.")
		.required_string("name", "Unique group name.")
		.optional_string("description", "Free form description.")
		.computed_int("created_at", "Creation time, Unix milliseconds.")
		.computed_int("updated_at", "Last update time, Unix milliseconds.")
		.single(
			"user_settings",
			BlockBuilder::new("Settings applied to members. Placeholders such as `%username%` are expanded.")
				.optional_string("home_dir", "Home directory template.")
				.optional_int("max_sessions", "Concurrent sessions, 0 is unlimited.")
				.optional_int("quota_size", "Quota in bytes, 0 is unlimited.")
				.optional_int("quota_files", "Quota in files, 0 is unlimited.")
				.optional_string_map(
					"permissions",
					"Comma separated permissions per path, e.g. `{\"/\" = \"list,download\"}`.",
				)
				.optional_int("upload_bandwidth", "Upload limit in KB/s.")
				.optional_int("download_bandwidth", "Download limit in KB/s.")
				.optional_int("upload_data_transfer", "Upload transfer quota in MB.")
				.optional_int("download_data_transfer", "Download transfer quota in MB.")
				.optional_int("total_data_transfer", "Total transfer quota in MB.")
				.optional_int("expires_in", "New members expire after this many days.")
				.single("filters", filters::block())
				.single("filesystem", filesystem::block())
				.build(),
		)
		.list("virtual_folders", virtual_folder_block())
		.build()
}

#[cfg(test)]
mod tests {
	use super::*;
	use sftpgo_client::types::{Filesystem, S3Config, VirtualFolder};
	use sftpgo_kms::{KmsSecret, SecretStatus};
	use std::collections::BTreeMap;

	fn group() -> Group {
		Group {
			id: 2,
			name: "staff".to_string(),
			created_at: 10,
			updated_at: 20,
			user_settings: GroupUserSettings {
				home_dir: "/srv/%username%".to_string(),
				permissions: BTreeMap::from([(
					"/".to_string(),
					vec!["list".to_string(), "download".to_string()],
				)]),
				filesystem: Filesystem::S3(S3Config {
					bucket: "staff".to_string(),
					access_secret: Some(KmsSecret::new(SecretStatus::Secretbox, "", "", "x")),
					..Default::default()
				}),
				..Default::default()
			},
			virtual_folders: vec![VirtualFolder {
				name: "shared".to_string(),
				virtual_path: "/shared".to_string(),
				..Default::default()
			}],
			..Default::default()
		}
	}

	#[test]
	fn round_trips_including_the_numeric_id() {
		let api = group();
		let model = GroupModel::from_api(&api);
		let Value::Value(settings) = &model.user_settings else {
			panic!("user_settings should be set");
		};
		assert_eq!(
			settings.permissions,
			Value::Value(BTreeMap::from([(
				"/".to_string(),
				Value::Value("list,download".to_string())
			)]))
		);
		assert_eq!(model.numeric_id, Value::Value(2));
		assert_eq!(model.to_api(&AttrPath::root()).unwrap(), api);
	}

	#[test]
	fn nested_filesystem_secrets_come_from_the_plan() {
		let mut desired = GroupModel::from_api(&group());
		if let Value::Value(settings) = &mut desired.user_settings {
			if let Value::Value(fs) = &mut settings.filesystem {
				if let Value::Value(s3) = &mut fs.s3config {
					s3.access_secret = Value::Value("plain".to_string());
				}
			}
		}

		let mut server = GroupModel::from_api(&group());
		server.merge_secrets(&desired);
		assert_eq!(server, desired);
	}
}
