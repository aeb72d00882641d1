// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};
use sftpgo_client::types::{User, UserGroup};
use tf_provider::{Block, Value};

use super::filesystem::{self, FilesystemModel};
use super::filters::{self, UserFiltersModel};
use super::folder::{virtual_folder_block, VirtualFolderModel};
use super::{replace_if_changed, ResourceModel};
use crate::convert::value::{
	blocks, computed, int, known, list, non_empty, non_zero, non_zero_object, object, string,
	strings, with_nested, BoolValue, IntValue, StringList, StringMap, StringValue,
};
use crate::convert::{permissions, ApiModel, AttrPath, ConvertError, Result};
use crate::schema::BlockBuilder;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserModel {
	pub id: StringValue,
	pub numeric_id: IntValue,
	pub status: IntValue,
	pub username: StringValue,
	pub email: StringValue,
	pub expiration_date: IntValue,
	pub password: StringValue,
	pub public_keys: StringList,
	pub has_password: BoolValue,
	pub home_dir: StringValue,
	pub uid: IntValue,
	pub gid: IntValue,
	pub max_sessions: IntValue,
	pub quota_size: IntValue,
	pub quota_files: IntValue,
	pub permissions: StringMap,
	pub used_quota_size: IntValue,
	pub used_quota_files: IntValue,
	pub last_quota_update: IntValue,
	pub upload_bandwidth: IntValue,
	pub download_bandwidth: IntValue,
	pub upload_data_transfer: IntValue,
	pub download_data_transfer: IntValue,
	pub total_data_transfer: IntValue,
	pub created_at: IntValue,
	pub updated_at: IntValue,
	pub last_login: IntValue,
	pub last_password_change: IntValue,
	pub description: StringValue,
	pub additional_info: StringValue,
	pub groups: Value<Vec<UserGroupModel>>,
	pub role: StringValue,
	pub filters: Value<UserFiltersModel>,
	pub virtual_folders: Value<Vec<VirtualFolderModel>>,
	pub filesystem: Value<FilesystemModel>,
}

impl ApiModel for UserModel {
	type Api = User;

	fn to_api(&self, path: &AttrPath) -> Result<User> {
		let password = string(&self.password, &path.attr("password"))?;
		Ok(User {
			id: computed(&self.numeric_id),
			status: int(&self.status, &path.attr("status"))?,
			username: string(&self.username, &path.attr("username"))?,
			email: string(&self.email, &path.attr("email"))?,
			expiration_date: int(&self.expiration_date, &path.attr("expiration_date"))?,
			password: (!password.is_empty()).then_some(password),
			public_keys: strings(&self.public_keys, &path.attr("public_keys"))?,
			has_password: computed(&self.has_password),
			home_dir: string(&self.home_dir, &path.attr("home_dir"))?,
			uid: int(&self.uid, &path.attr("uid"))?,
			gid: int(&self.gid, &path.attr("gid"))?,
			max_sessions: int(&self.max_sessions, &path.attr("max_sessions"))?,
			quota_size: int(&self.quota_size, &path.attr("quota_size"))?,
			quota_files: int(&self.quota_files, &path.attr("quota_files"))?,
			permissions: permissions::to_api(&self.permissions, &path.attr("permissions"))?,
			used_quota_size: computed(&self.used_quota_size),
			used_quota_files: computed(&self.used_quota_files),
			last_quota_update: computed(&self.last_quota_update),
			upload_bandwidth: int(&self.upload_bandwidth, &path.attr("upload_bandwidth"))?,
			download_bandwidth: int(&self.download_bandwidth, &path.attr("download_bandwidth"))?,
			upload_data_transfer: int(&self.upload_data_transfer, &path.attr("upload_data_transfer"))?,
			download_data_transfer: int(
				&self.download_data_transfer,
				&path.attr("download_data_transfer"),
			)?,
			total_data_transfer: int(&self.total_data_transfer, &path.attr("total_data_transfer"))?,
			created_at: computed(&self.created_at),
			updated_at: computed(&self.updated_at),
			last_login: computed(&self.last_login),
			last_password_change: computed(&self.last_password_change),
			description: string(&self.description, &path.attr("description"))?,
			additional_info: string(&self.additional_info, &path.attr("additional_info"))?,
			groups: list(&self.groups, &path.attr("groups"))?,
			role: string(&self.role, &path.attr("role"))?,
			filters: object(&self.filters, &path.attr("filters"))?,
			virtual_folders: list(&self.virtual_folders, &path.attr("virtual_folders"))?,
			filesystem: object(&self.filesystem, &path.attr("filesystem"))?,
		})
	}

	fn from_api(api: &User) -> Self {
		Self {
			id: known(&api.username),
			numeric_id: known(&api.id),
			status: known(&api.status),
			username: known(&api.username),
			email: non_zero(&api.email),
			expiration_date: non_zero(&api.expiration_date),
			// Never returned in plaintext.
			password: Value::Null,
			public_keys: non_empty(&api.public_keys),
			has_password: known(&api.has_password),
			home_dir: non_zero(&api.home_dir),
			uid: non_zero(&api.uid),
			gid: non_zero(&api.gid),
			max_sessions: non_zero(&api.max_sessions),
			quota_size: non_zero(&api.quota_size),
			quota_files: non_zero(&api.quota_files),
			permissions: permissions::from_api(&api.permissions),
			used_quota_size: known(&api.used_quota_size),
			used_quota_files: known(&api.used_quota_files),
			last_quota_update: known(&api.last_quota_update),
			upload_bandwidth: non_zero(&api.upload_bandwidth),
			download_bandwidth: non_zero(&api.download_bandwidth),
			upload_data_transfer: non_zero(&api.upload_data_transfer),
			download_data_transfer: non_zero(&api.download_data_transfer),
			total_data_transfer: non_zero(&api.total_data_transfer),
			created_at: known(&api.created_at),
			updated_at: known(&api.updated_at),
			last_login: known(&api.last_login),
			last_password_change: known(&api.last_password_change),
			description: non_zero(&api.description),
			additional_info: non_zero(&api.additional_info),
			groups: blocks(&api.groups),
			role: non_zero(&api.role),
			filters: non_zero_object(&api.filters),
			virtual_folders: blocks(&api.virtual_folders),
			filesystem: non_zero_object(&api.filesystem),
		}
	}
}

impl ResourceModel for UserModel {
	fn id(&self) -> &StringValue {
		&self.id
	}

	fn computed_unknown(&mut self) {
		self.id = self.username.clone();
		self.numeric_id = Value::Unknown;
		self.has_password = Value::Unknown;
		self.used_quota_size = Value::Unknown;
		self.used_quota_files = Value::Unknown;
		self.last_quota_update = Value::Unknown;
		self.created_at = Value::Unknown;
		self.updated_at = Value::Unknown;
		self.last_login = Value::Unknown;
		self.last_password_change = Value::Unknown;
	}

	fn merge_computed(&mut self, server: &Self) {
		self.id = server.id.clone();
		self.numeric_id = server.numeric_id.clone();
		self.has_password = server.has_password.clone();
		self.used_quota_size = server.used_quota_size.clone();
		self.used_quota_files = server.used_quota_files.clone();
		self.last_quota_update = server.last_quota_update.clone();
		self.created_at = server.created_at.clone();
		self.updated_at = server.updated_at.clone();
		self.last_login = server.last_login.clone();
		self.last_password_change = server.last_password_change.clone();
	}

	fn merge_secrets(&mut self, desired: &Self) {
		self.password = desired.password.clone();
		with_nested(&mut self.filesystem, &desired.filesystem, |t, s| t.merge_secrets(s));
	}

	fn mark_updated(&mut self) {
		self.updated_at = Value::Unknown;
	}

	fn requires_replace(&self, prior: &Self) -> Vec<AttrPath> {
		let mut paths = Vec::new();
		replace_if_changed(&mut paths, "username", &self.username, &prior.username);
		paths
	}

	fn validate(&self) -> Vec<ConvertError> {
		let mut errors = Vec::new();
		if let Value::Value(fs) = &self.filesystem {
			fs.validate(&AttrPath::root().attr("filesystem"), &mut errors);
		}
		errors
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserGroupModel {
	pub name: StringValue,
	#[serde(rename = "type")]
	pub group_type: IntValue,
}

impl ApiModel for UserGroupModel {
	type Api = UserGroup;

	fn to_api(&self, path: &AttrPath) -> Result<UserGroup> {
		Ok(UserGroup {
			name: string(&self.name, &path.attr("name"))?,
			group_type: int(&self.group_type, &path.attr("type"))?,
		})
	}

	fn from_api(api: &UserGroup) -> Self {
		Self {
			name: non_zero(&api.name),
			group_type: non_zero(&api.group_type),
		}
	}
}

pub fn block() -> Block {
	BlockBuilder::new("An SFTPGo user.")
		.computed_string("id", "Same as `username`.")
		.computed_int("numeric_id", "Numeric id assigned by SFTPGo.")
		.required_int("status", "1 enabled, 0 disabled.")
		.required_string("username", "Unique username.")
		.optional_string("email", "Contact email.")
		.optional_int("expiration_date", "Account expiration, Unix milliseconds. 0 never expires.")
		.secret("password", "Login password. SFTPGo stores a hash and never returns it.")
		.optional_strings("public_keys", "Authorized SSH public keys.")
		.computed_bool("has_password", "Whether a password is set.")
		.optional_string("home_dir", "Absolute home directory path.")
		.optional_int("uid", "Owner uid for new files, local filesystem only.")
		.optional_int("gid", "Owner gid for new files, local filesystem only.")
		.optional_int("max_sessions", "Concurrent sessions, 0 is unlimited.")
		.optional_int("quota_size", "Quota in bytes, 0 is unlimited.")
		.optional_int("quota_files", "Quota in files, 0 is unlimited.")
		.optional_string_map(
			"permissions",
			"Comma separated permissions per path, e.g. `{\"/\" = \"*\"}`.",
		)
		.computed_int("used_quota_size", "Bytes used.")
		.computed_int("used_quota_files", "Files stored.")
		.computed_int("last_quota_update", "Last quota scan, Unix milliseconds.")
		.optional_int("upload_bandwidth", "Upload limit in KB/s.")
		.optional_int("download_bandwidth", "Download limit in KB/s.")
		.optional_int("upload_data_transfer", "Upload transfer quota in MB.")
		.optional_int("download_data_transfer", "Download transfer quota in MB.")
		.optional_int("total_data_transfer", "Total transfer quota in MB.")
		.computed_int("created_at", "Creation time, Unix milliseconds.")
		.computed_int("updated_at", "Last update time, Unix milliseconds.")
		.computed_int("last_login", "Last login, Unix milliseconds.")
		.computed_int("last_password_change", "Last password change, Unix milliseconds.")
		.optional_string("description", "Free form description.")
		.optional_string("additional_info", "Free form text for integrations.")
		.optional_string("role", "Role the user belongs to.")
		.list(
			"groups",
			BlockBuilder::new("Group membership.")
				.required_string("name", "Group name.")
				.required_int("type", "1 primary, 2 secondary, 3 membership only.")
				.build(),
		)
		.single("filters", filters::block())
		.list("virtual_folders", virtual_folder_block())
		.single("filesystem", filesystem::block())
		.build()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::convert::ConvertErrorKind;
	use sftpgo_client::types::{Filesystem, SftpFsConfig, UserFilters, VirtualFolder};
	use sftpgo_kms::{KmsSecret, SecretStatus};
	use std::collections::BTreeMap;

	fn api_user() -> User {
		User {
			id: 11,
			status: 1,
			username: "alice".to_string(),
			home_dir: "/srv/alice".to_string(),
			permissions: BTreeMap::from([("/".to_string(), vec!["*".to_string()])]),
			has_password: true,
			created_at: 1700000000000,
			updated_at: 1700000000000,
			groups: vec![UserGroup {
				name: "staff".to_string(),
				group_type: 1,
			}],
			filters: UserFilters {
				denied_protocols: vec!["FTP".to_string()],
				..Default::default()
			},
			virtual_folders: vec![VirtualFolder {
				name: "shared".to_string(),
				virtual_path: "/shared".to_string(),
				..Default::default()
			}],
			filesystem: Filesystem::Sftp(SftpFsConfig {
				endpoint: "upstream:22".to_string(),
				username: "alice".to_string(),
				private_key: Some(KmsSecret::new(SecretStatus::Aes256Gcm, "", "", "enc")),
				..Default::default()
			}),
			..Default::default()
		}
	}

	#[test]
	fn zero_values_read_back_as_null_except_status_and_timestamps() {
		let model = UserModel::from_api(&User {
			username: "bob".to_string(),
			..Default::default()
		});
		assert_eq!(model.id, Value::Value("bob".to_string()));
		assert_eq!(model.status, Value::Value(0));
		assert_eq!(model.created_at, Value::Value(0));
		assert_eq!(model.home_dir, Value::Null);
		assert_eq!(model.quota_size, Value::Null);
		assert_eq!(model.permissions, Value::Null);
		assert_eq!(model.filters, Value::Null);
		assert_eq!(model.filesystem, Value::Null);
		assert_eq!(model.groups, Value::Value(Vec::new()));
	}

	#[test]
	fn round_trips_a_full_user() {
		let api = api_user();
		let model = UserModel::from_api(&api);
		assert_eq!(model.password, Value::Null);
		assert_eq!(model.to_api(&AttrPath::root()).unwrap(), api);
	}

	#[test]
	fn settle_keeps_password_and_plaintext_key() {
		let mut desired = UserModel::from_api(&api_user());
		desired.password = Value::Value("s3cret".to_string());
		if let Value::Value(fs) = &mut desired.filesystem {
			if let Value::Value(sftp) = &mut fs.sftpconfig {
				sftp.private_key = Value::Value("-----BEGIN KEY-----".to_string());
			}
		}
		desired.computed_unknown();

		let server = UserModel::from_api(&api_user());
		let settled = super::super::settle(&desired, server);

		assert_eq!(settled.password, Value::Value("s3cret".to_string()));
		assert_eq!(settled.created_at, Value::Value(1700000000000));
		assert_eq!(settled.has_password, Value::Value(true));
		let api = settled.to_api(&AttrPath::root()).unwrap();
		assert_eq!(api.password.as_deref(), Some("s3cret"));
		let Filesystem::Sftp(sftp) = api.filesystem else {
			panic!("expected sftp filesystem");
		};
		assert_eq!(sftp.private_key, Some(KmsSecret::plain("-----BEGIN KEY-----")));
	}

	#[test]
	fn reports_every_unknown_collection_element() {
		let mut model = UserModel::from_api(&api_user());
		model.public_keys = Value::Value(vec![
			Value::Unknown,
			Value::Value("ssh-ed25519 AAAA".to_string()),
			Value::Unknown,
		]);
		let errors = model.to_api(&AttrPath::root()).unwrap_err();
		let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
		assert_eq!(paths, ["public_keys[0]", "public_keys[2]"]);
	}

	#[test]
	fn unknown_password_at_apply_is_an_error() {
		let mut model = UserModel::from_api(&api_user());
		model.password = Value::Unknown;
		let errors = model.to_api(&AttrPath::root()).unwrap_err();
		assert_eq!(errors.len(), 1);
		assert_eq!(errors.iter().next().map(|e| &e.kind), Some(&ConvertErrorKind::Unknown));
	}

	#[test]
	fn only_username_forces_replacement() {
		let prior = UserModel::from_api(&api_user());
		let mut proposed = prior.clone();
		proposed.home_dir = Value::Value("/srv/other".to_string());
		assert!(proposed.requires_replace(&prior).is_empty());
		proposed.username = Value::Value("alice2".to_string());
		assert_eq!(proposed.requires_replace(&prior), [AttrPath::root().attr("username")]);
	}
}
