// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! SFTPGo REST API resource representations.
//!
//! Field names follow the API JSON. Every struct deserializes with
//! `#[serde(default)]` because SFTPGo omits zero values in many responses.

mod admin;
mod event_action;
mod event_rule;
mod filesystem;
mod filters;
mod folder;
mod group;
mod ip_list;
mod role;
mod user;

pub use admin::{Admin, AdminFilters, AdminGroup, AdminGroupOptions, AdminPreferences};
pub use event_action::{
	CommandConfig, CompressConfig, DataRetentionConfig, EmailConfig, EventAction,
	EventActionKind, FolderRetention, FsAction, HttpPart, HttpActionConfig, IdpConfig,
	PasswordExpirationConfig, UserInactivityConfig,
};
pub use event_rule::{
	ConditionOptions, ConditionPattern, EventConditions, EventRule, RuleAction,
	RuleActionOptions, Schedule,
};
pub use filesystem::{
	AzBlobConfig, CryptConfig, Filesystem, GcsConfig, HttpFsConfig, OsConfig, S3Config,
	SftpFsConfig,
};
pub use filters::{BandwidthLimit, HooksFilter, PatternsFilter, TimePeriod, UserFilters};
pub use folder::{Folder, VirtualFolder};
pub use group::{Group, GroupUserSettings};
pub use ip_list::{IpListEntry, IpListMode, IpListType};
pub use role::Role;
pub use user::{User, UserGroup};

use serde::{Deserialize, Serialize};

/// Path to permission list, e.g. `{"/": ["*"]}`.
pub type Permissions = std::collections::BTreeMap<String, Vec<String>>;

/// A generic key/value pair (HTTP headers, environment variables, renames).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyValue {
	pub key: String,
	pub value: String,
}

impl KeyValue {
	pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			value: value.into(),
		}
	}
}

pub(crate) fn is_zero(value: &i64) -> bool {
	*value == 0
}

/// Error for a discriminant outside the values SFTPGo defines.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field} {value}")]
pub struct InvalidDiscriminant {
	pub field: &'static str,
	pub value: i64,
}
