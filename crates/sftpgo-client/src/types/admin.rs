// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

use super::is_zero;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Admin {
	#[serde(skip_serializing_if = "is_zero")]
	pub id: i64,
	pub status: i64,
	pub username: String,
	/// Write only.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub password: Option<String>,
	pub email: String,
	pub permissions: Vec<String>,
	pub filters: AdminFilters,
	pub description: String,
	pub additional_info: String,
	pub groups: Vec<AdminGroup>,
	pub role: String,
	pub created_at: i64,
	pub updated_at: i64,
	pub last_login: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminFilters {
	pub allow_list: Vec<String>,
	pub allow_api_key_auth: bool,
	pub require_two_factor: bool,
	pub require_password_change: bool,
	pub preferences: AdminPreferences,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminPreferences {
	/// Bit mask of WebAdmin user page sections to hide.
	pub hide_user_page_sections: i64,
	/// Default expiration for new users, in days.
	pub default_users_expiration: i64,
}

/// A group whose members this admin manages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminGroup {
	pub name: String,
	pub options: AdminGroupOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminGroupOptions {
	/// 0 primary, 1 secondary, 2 membership
	pub add_to_users_as: i64,
}
