// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

use super::{is_zero, Filesystem, Permissions, UserFilters, VirtualFolder};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
	#[serde(skip_serializing_if = "is_zero")]
	pub id: i64,
	pub status: i64,
	pub username: String,
	pub email: String,
	pub expiration_date: i64,
	/// Write only: SFTPGo never returns the plaintext password.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub password: Option<String>,
	pub public_keys: Vec<String>,
	pub has_password: bool,
	pub home_dir: String,
	pub uid: i64,
	pub gid: i64,
	pub max_sessions: i64,
	pub quota_size: i64,
	pub quota_files: i64,
	pub permissions: Permissions,
	pub used_quota_size: i64,
	pub used_quota_files: i64,
	pub last_quota_update: i64,
	pub upload_bandwidth: i64,
	pub download_bandwidth: i64,
	pub upload_data_transfer: i64,
	pub download_data_transfer: i64,
	pub total_data_transfer: i64,
	pub created_at: i64,
	pub updated_at: i64,
	pub last_login: i64,
	pub last_password_change: i64,
	pub description: String,
	pub additional_info: String,
	pub groups: Vec<UserGroup>,
	pub role: String,
	pub filters: UserFilters,
	pub virtual_folders: Vec<VirtualFolder>,
	pub filesystem: Filesystem,
}

/// Group membership. `type` is 1 primary, 2 secondary, 3 membership only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserGroup {
	pub name: String,
	#[serde(rename = "type")]
	pub group_type: i64,
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::S3Config;
	use serde_json::json;

	#[test]
	fn parses_api_response() {
		let user: User = serde_json::from_value(json!({
			"id": 7,
			"status": 1,
			"username": "alice",
			"has_password": true,
			"home_dir": "/srv/sftpgo/alice",
			"permissions": {"/": ["*"], "/uploads": ["list", "upload"]},
			"groups": [{"name": "staff", "type": 1}],
			"filesystem": {"provider": 1, "s3config": {"bucket": "b"}},
			"filters": {"hooks": {"pre_login_disabled": true}},
			"created_at": 1700000000000i64,
			"some_future_field": {"ignored": true}
		}))
		.unwrap();

		assert_eq!(user.id, 7);
		assert_eq!(user.permissions["/uploads"], vec!["list", "upload"]);
		assert_eq!(user.groups[0].group_type, 1);
		assert!(user.filters.hooks.pre_login_disabled);
		assert_eq!(
			user.filesystem,
			Filesystem::S3(S3Config {
				bucket: "b".to_string(),
				..Default::default()
			})
		);
		assert_eq!(user.password, None);
	}

	#[test]
	fn new_user_omits_id_and_unset_password() {
		let user = User {
			username: "bob".to_string(),
			status: 1,
			..Default::default()
		};
		let value = serde_json::to_value(&user).unwrap();
		assert!(value.get("id").is_none());
		assert!(value.get("password").is_none());
		assert_eq!(value["filesystem"]["provider"], 0);
	}
}
