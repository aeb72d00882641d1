// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

use super::{is_zero, Filesystem, Permissions, UserFilters, VirtualFolder};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
	#[serde(skip_serializing_if = "is_zero")]
	pub id: i64,
	pub name: String,
	pub description: String,
	pub created_at: i64,
	pub updated_at: i64,
	pub user_settings: GroupUserSettings,
	pub virtual_folders: Vec<VirtualFolder>,
}

/// Settings inherited by the members of a group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupUserSettings {
	pub home_dir: String,
	pub max_sessions: i64,
	pub quota_size: i64,
	pub quota_files: i64,
	pub permissions: Permissions,
	pub upload_bandwidth: i64,
	pub download_bandwidth: i64,
	pub upload_data_transfer: i64,
	pub download_data_transfer: i64,
	pub total_data_transfer: i64,
	pub expires_in: i64,
	pub filters: UserFilters,
	pub filesystem: Filesystem,
}
