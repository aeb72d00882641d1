// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

/// Login and transfer restrictions shared by users and group user settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserFilters {
	pub allowed_ip: Vec<String>,
	pub denied_ip: Vec<String>,
	pub denied_login_methods: Vec<String>,
	pub denied_protocols: Vec<String>,
	pub file_patterns: Vec<PatternsFilter>,
	pub max_upload_file_size: i64,
	pub tls_username: String,
	pub tls_certs: Vec<String>,
	pub hooks: HooksFilter,
	pub disable_fs_checks: bool,
	pub web_client: Vec<String>,
	pub allow_api_key_auth: bool,
	pub user_type: String,
	pub bandwidth_limits: Vec<BandwidthLimit>,
	pub external_auth_cache_time: i64,
	pub start_directory: String,
	pub two_factor_protocols: Vec<String>,
	pub ftp_security: i64,
	pub is_anonymous: bool,
	pub default_shares_expiration: i64,
	pub max_shares_expiration: i64,
	pub password_expiration: i64,
	pub password_strength: i64,
	pub require_password_change: bool,
	pub access_time: Vec<TimePeriod>,
}

/// Allowed and denied shell patterns for a virtual path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternsFilter {
	pub path: String,
	pub allowed_patterns: Vec<String>,
	pub denied_patterns: Vec<String>,
	pub deny_policy: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HooksFilter {
	pub external_auth_disabled: bool,
	pub pre_login_disabled: bool,
	pub check_password_disabled: bool,
}

/// Per-source bandwidth override, in KB/s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandwidthLimit {
	pub sources: Vec<String>,
	pub upload_bandwidth: i64,
	pub download_bandwidth: i64,
}

/// A weekly time window in which logins are allowed. `from`/`to` are `HH:MM`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimePeriod {
	pub day_of_week: i64,
	pub from: String,
	pub to: String,
}
