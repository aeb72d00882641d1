// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

use super::{is_zero, Filesystem};

/// A folder shared between users and groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Folder {
	#[serde(skip_serializing_if = "is_zero")]
	pub id: i64,
	pub name: String,
	pub mapped_path: String,
	pub description: String,
	pub used_quota_size: i64,
	pub used_quota_files: i64,
	pub last_quota_update: i64,
	pub filesystem: Filesystem,
}

/// A folder mounted into a user or group at `virtual_path`.
///
/// Quota `-1` means "use the user quota", `0` means unlimited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VirtualFolder {
	pub name: String,
	pub virtual_path: String,
	pub quota_size: i64,
	pub quota_files: i64,
}
