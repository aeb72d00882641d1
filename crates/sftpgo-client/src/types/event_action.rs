// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Event actions: what the event manager does when a rule fires.
//!
//! The API encodes the action kind as a `type` discriminant next to an
//! `options` object with one sub-config per kind. [`EventActionKind`] keeps only
//! the sub-config the kind uses, and the filesystem action does the same with
//! its own nested `type`.

use serde::{Deserialize, Serialize};
use sftpgo_kms::KmsSecret;

use super::{is_zero, InvalidDiscriminant, KeyValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EventActionWire", into = "EventActionWire")]
pub struct EventAction {
	pub id: i64,
	pub name: String,
	pub description: String,
	pub kind: EventActionKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventActionKind {
	Http(HttpActionConfig),
	Command(CommandConfig),
	Email(EmailConfig),
	Backup,
	UserQuotaReset,
	FolderQuotaReset,
	TransferQuotaReset,
	DataRetentionCheck(DataRetentionConfig),
	Filesystem(FsAction),
	MetadataCheck,
	PasswordExpirationCheck(PasswordExpirationConfig),
	UserExpirationCheck,
	IdentityProviderCheck(IdpConfig),
	UserInactivityCheck(UserInactivityConfig),
	RotateLogs,
}

impl Default for EventActionKind {
	fn default() -> Self {
		EventActionKind::Http(HttpActionConfig::default())
	}
}

impl EventActionKind {
	pub const MIN_TYPE: i64 = 1;
	pub const MAX_TYPE: i64 = 15;

	/// The `type` value SFTPGo uses for this kind.
	pub fn action_type(&self) -> i64 {
		match self {
			EventActionKind::Http(_) => 1,
			EventActionKind::Command(_) => 2,
			EventActionKind::Email(_) => 3,
			EventActionKind::Backup => 4,
			EventActionKind::UserQuotaReset => 5,
			EventActionKind::FolderQuotaReset => 6,
			EventActionKind::TransferQuotaReset => 7,
			EventActionKind::DataRetentionCheck(_) => 8,
			EventActionKind::Filesystem(_) => 9,
			EventActionKind::MetadataCheck => 10,
			EventActionKind::PasswordExpirationCheck(_) => 11,
			EventActionKind::UserExpirationCheck => 12,
			EventActionKind::IdentityProviderCheck(_) => 13,
			EventActionKind::UserInactivityCheck(_) => 14,
			EventActionKind::RotateLogs => 15,
		}
	}

	pub fn is_valid_type(action_type: i64) -> bool {
		(Self::MIN_TYPE..=Self::MAX_TYPE).contains(&action_type)
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpActionConfig {
	pub endpoint: String,
	pub username: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub password: Option<KmsSecret>,
	pub headers: Vec<KeyValue>,
	/// Seconds.
	pub timeout: i64,
	pub skip_tls_verify: bool,
	pub method: String,
	pub query_parameters: Vec<KeyValue>,
	pub body: String,
	pub parts: Vec<HttpPart>,
}

/// One part of a multipart HTTP request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpPart {
	pub name: String,
	pub filepath: String,
	pub headers: Vec<KeyValue>,
	pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
	pub cmd: String,
	pub args: Vec<String>,
	pub timeout: i64,
	pub env_vars: Vec<KeyValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
	pub recipients: Vec<String>,
	pub bcc: Vec<String>,
	pub subject: String,
	pub body: String,
	/// 0 text/plain, 1 text/html
	pub content_type: i64,
	pub attachments: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataRetentionConfig {
	pub folders: Vec<FolderRetention>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderRetention {
	pub path: String,
	/// Hours. 0 excludes the path from the check.
	pub retention: i64,
	pub delete_empty_dirs: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordExpirationConfig {
	/// Days before expiration at which users are notified.
	pub threshold: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdpConfig {
	/// 0 create or update, 1 create only
	pub mode: i64,
	pub template_user: String,
	pub template_admin: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInactivityConfig {
	/// Days.
	pub disable_threshold: i64,
	/// Days.
	pub delete_threshold: i64,
}

/// Filesystem operation run by a type 9 action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FsActionWire", into = "FsActionWire")]
pub enum FsAction {
	Rename(Vec<KeyValue>),
	Delete(Vec<String>),
	CreateDirs(Vec<String>),
	Exist(Vec<String>),
	Compress(CompressConfig),
	Copy(Vec<KeyValue>),
}

impl Default for FsAction {
	fn default() -> Self {
		FsAction::Rename(Vec::new())
	}
}

impl FsAction {
	pub const MIN_TYPE: i64 = 1;
	pub const MAX_TYPE: i64 = 6;

	pub fn action_type(&self) -> i64 {
		match self {
			FsAction::Rename(_) => 1,
			FsAction::Delete(_) => 2,
			FsAction::CreateDirs(_) => 3,
			FsAction::Exist(_) => 4,
			FsAction::Compress(_) => 5,
			FsAction::Copy(_) => 6,
		}
	}

	pub fn is_valid_type(action_type: i64) -> bool {
		(Self::MIN_TYPE..=Self::MAX_TYPE).contains(&action_type)
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressConfig {
	/// Archive path.
	pub name: String,
	pub paths: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct FsActionWire {
	#[serde(rename = "type")]
	action_type: i64,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	renames: Vec<KeyValue>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	deletes: Vec<String>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	mkdirs: Vec<String>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	exist: Vec<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	compress: Option<CompressConfig>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	copy: Vec<KeyValue>,
}

impl TryFrom<FsActionWire> for FsAction {
	type Error = InvalidDiscriminant;

	fn try_from(wire: FsActionWire) -> Result<Self, Self::Error> {
		Ok(match wire.action_type {
			1 => FsAction::Rename(wire.renames),
			2 => FsAction::Delete(wire.deletes),
			3 => FsAction::CreateDirs(wire.mkdirs),
			4 => FsAction::Exist(wire.exist),
			5 => FsAction::Compress(wire.compress.unwrap_or_default()),
			6 => FsAction::Copy(wire.copy),
			value => {
				return Err(InvalidDiscriminant {
					field: "filesystem action type",
					value,
				})
			}
		})
	}
}

impl From<FsAction> for FsActionWire {
	fn from(action: FsAction) -> Self {
		let mut wire = FsActionWire {
			action_type: action.action_type(),
			..Default::default()
		};
		match action {
			FsAction::Rename(v) => wire.renames = v,
			FsAction::Delete(v) => wire.deletes = v,
			FsAction::CreateDirs(v) => wire.mkdirs = v,
			FsAction::Exist(v) => wire.exist = v,
			FsAction::Compress(v) => wire.compress = Some(v),
			FsAction::Copy(v) => wire.copy = v,
		}
		wire
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct EventActionWire {
	#[serde(skip_serializing_if = "is_zero")]
	id: i64,
	name: String,
	description: String,
	#[serde(rename = "type")]
	action_type: i64,
	options: EventActionOptionsWire,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct EventActionOptionsWire {
	#[serde(skip_serializing_if = "Option::is_none")]
	http_config: Option<HttpActionConfig>,
	#[serde(skip_serializing_if = "Option::is_none")]
	cmd_config: Option<CommandConfig>,
	#[serde(skip_serializing_if = "Option::is_none")]
	email_config: Option<EmailConfig>,
	#[serde(skip_serializing_if = "Option::is_none")]
	retention_config: Option<DataRetentionConfig>,
	#[serde(skip_serializing_if = "Option::is_none")]
	fs_config: Option<FsAction>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pwd_expiration_config: Option<PasswordExpirationConfig>,
	#[serde(skip_serializing_if = "Option::is_none")]
	idp_config: Option<IdpConfig>,
	#[serde(skip_serializing_if = "Option::is_none")]
	user_inactivity_config: Option<UserInactivityConfig>,
}

impl TryFrom<EventActionWire> for EventAction {
	type Error = InvalidDiscriminant;

	fn try_from(wire: EventActionWire) -> Result<Self, Self::Error> {
		let options = wire.options;
		let kind = match wire.action_type {
			1 => EventActionKind::Http(options.http_config.unwrap_or_default()),
			2 => EventActionKind::Command(options.cmd_config.unwrap_or_default()),
			3 => EventActionKind::Email(options.email_config.unwrap_or_default()),
			4 => EventActionKind::Backup,
			5 => EventActionKind::UserQuotaReset,
			6 => EventActionKind::FolderQuotaReset,
			7 => EventActionKind::TransferQuotaReset,
			8 => EventActionKind::DataRetentionCheck(options.retention_config.unwrap_or_default()),
			9 => EventActionKind::Filesystem(options.fs_config.unwrap_or_default()),
			10 => EventActionKind::MetadataCheck,
			11 => EventActionKind::PasswordExpirationCheck(
				options.pwd_expiration_config.unwrap_or_default(),
			),
			12 => EventActionKind::UserExpirationCheck,
			13 => EventActionKind::IdentityProviderCheck(options.idp_config.unwrap_or_default()),
			14 => EventActionKind::UserInactivityCheck(
				options.user_inactivity_config.unwrap_or_default(),
			),
			15 => EventActionKind::RotateLogs,
			value => {
				return Err(InvalidDiscriminant {
					field: "event action type",
					value,
				})
			}
		};
		Ok(EventAction {
			id: wire.id,
			name: wire.name,
			description: wire.description,
			kind,
		})
	}
}

impl From<EventAction> for EventActionWire {
	fn from(action: EventAction) -> Self {
		let action_type = action.kind.action_type();
		let mut options = EventActionOptionsWire::default();
		match action.kind {
			EventActionKind::Http(c) => options.http_config = Some(c),
			EventActionKind::Command(c) => options.cmd_config = Some(c),
			EventActionKind::Email(c) => options.email_config = Some(c),
			EventActionKind::DataRetentionCheck(c) => options.retention_config = Some(c),
			EventActionKind::Filesystem(c) => options.fs_config = Some(c),
			EventActionKind::PasswordExpirationCheck(c) => options.pwd_expiration_config = Some(c),
			EventActionKind::IdentityProviderCheck(c) => options.idp_config = Some(c),
			EventActionKind::UserInactivityCheck(c) => options.user_inactivity_config = Some(c),
			EventActionKind::Backup
			| EventActionKind::UserQuotaReset
			| EventActionKind::FolderQuotaReset
			| EventActionKind::TransferQuotaReset
			| EventActionKind::MetadataCheck
			| EventActionKind::UserExpirationCheck
			| EventActionKind::RotateLogs => {}
		}
		EventActionWire {
			id: action.id,
			name: action.name,
			description: action.description,
			action_type,
			options,
		}
	}
}
