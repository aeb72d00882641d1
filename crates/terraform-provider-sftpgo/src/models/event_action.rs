// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Event actions run by event rules.
//!
//! `type` selects which block under `options` is read, the same way
//! `provider` works for filesystems. Filesystem actions carry a second
//! discriminant, `options.fs_config.type`.

use serde::{Deserialize, Serialize};
use sftpgo_client::types::{
	CommandConfig, CompressConfig, DataRetentionConfig, EmailConfig, EventAction,
	EventActionKind, FolderRetention, FsAction, HttpActionConfig, HttpPart, IdpConfig, KeyValue,
	PasswordExpirationConfig, UserInactivityConfig,
};
use tf_provider::{Block, Value};

use super::{replace_if_changed, ResourceModel};
use crate::convert::value::{
	blocks, computed, flag, int, known, known_int, list, non_empty, non_zero, non_zero_object,
	object, string, strings, with_nested, BoolValue, IntValue, StringList, StringValue,
};
use crate::convert::{
	check_discriminant, discriminant_error, secret, ApiModel, AttrPath, ConvertError, Result,
};
use crate::schema::BlockBuilder;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventActionModel {
	pub id: StringValue,
	pub numeric_id: IntValue,
	pub name: StringValue,
	pub description: StringValue,
	#[serde(rename = "type")]
	pub action_type: IntValue,
	pub options: Value<EventActionOptionsModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventActionOptionsModel {
	pub http_config: Value<HttpActionConfigModel>,
	pub cmd_config: Value<CommandConfigModel>,
	pub email_config: Value<EmailConfigModel>,
	pub retention_config: Value<DataRetentionConfigModel>,
	pub fs_config: Value<FsActionModel>,
	pub pwd_expiration_config: Value<PasswordExpirationConfigModel>,
	pub idp_config: Value<IdpConfigModel>,
	pub user_inactivity_config: Value<UserInactivityConfigModel>,
}

impl EventActionOptionsModel {
	fn empty() -> Self {
		Self {
			http_config: Value::Null,
			cmd_config: Value::Null,
			email_config: Value::Null,
			retention_config: Value::Null,
			fs_config: Value::Null,
			pwd_expiration_config: Value::Null,
			idp_config: Value::Null,
			user_inactivity_config: Value::Null,
		}
	}
}

/// Reads the options block selected by the action type, or its defaults.
fn selected<M>(
	options: Option<&EventActionOptionsModel>,
	path: &AttrPath,
	name: &'static str,
	pick: impl Fn(&EventActionOptionsModel) -> &Value<M>,
) -> Result<M::Api>
where
	M: ApiModel,
	M::Api: Default,
{
	match options {
		Some(options) => object(pick(options), &path.attr(name)),
		None => Ok(M::Api::default()),
	}
}

impl ApiModel for EventActionModel {
	type Api = EventAction;

	fn to_api(&self, path: &AttrPath) -> Result<EventAction> {
		let type_path = path.attr("type");
		let action_type = int(&self.action_type, &type_path)?;
		let options_path = path.attr("options");
		let options = match &self.options {
			Value::Value(options) => Some(options),
			Value::Null => None,
			Value::Unknown => return Err(ConvertError::unknown(&options_path).into()),
		};
		let p = &options_path;

		let kind = match action_type {
			1 => EventActionKind::Http(selected(options, p, "http_config", |o| &o.http_config)?),
			2 => EventActionKind::Command(selected(options, p, "cmd_config", |o| &o.cmd_config)?),
			3 => EventActionKind::Email(selected(options, p, "email_config", |o| &o.email_config)?),
			4 => EventActionKind::Backup,
			5 => EventActionKind::UserQuotaReset,
			6 => EventActionKind::FolderQuotaReset,
			7 => EventActionKind::TransferQuotaReset,
			8 => EventActionKind::DataRetentionCheck(selected(options, p, "retention_config", |o| {
				&o.retention_config
			})?),
			9 => EventActionKind::Filesystem(selected(options, p, "fs_config", |o| &o.fs_config)?),
			10 => EventActionKind::MetadataCheck,
			11 => EventActionKind::PasswordExpirationCheck(selected(
				options,
				p,
				"pwd_expiration_config",
				|o| &o.pwd_expiration_config,
			)?),
			12 => EventActionKind::UserExpirationCheck,
			13 => EventActionKind::IdentityProviderCheck(selected(options, p, "idp_config", |o| {
				&o.idp_config
			})?),
			14 => EventActionKind::UserInactivityCheck(selected(
				options,
				p,
				"user_inactivity_config",
				|o| &o.user_inactivity_config,
			)?),
			15 => EventActionKind::RotateLogs,
			other => {
				return Err(discriminant_error(
					&type_path,
					"event action type",
					other,
					EventActionKind::MIN_TYPE,
					EventActionKind::MAX_TYPE,
				))
			}
		};

		Ok(EventAction {
			id: computed(&self.numeric_id),
			name: string(&self.name, &path.attr("name"))?,
			description: string(&self.description, &path.attr("description"))?,
			kind,
		})
	}

	fn from_api(api: &EventAction) -> Self {
		let mut options = EventActionOptionsModel::empty();
		match &api.kind {
			EventActionKind::Http(c) => options.http_config = non_zero_object(c),
			EventActionKind::Command(c) => options.cmd_config = non_zero_object(c),
			EventActionKind::Email(c) => options.email_config = non_zero_object(c),
			EventActionKind::DataRetentionCheck(c) => options.retention_config = non_zero_object(c),
			EventActionKind::Filesystem(c) => {
				options.fs_config = Value::Value(FsActionModel::from_api(c))
			}
			EventActionKind::PasswordExpirationCheck(c) => {
				options.pwd_expiration_config = non_zero_object(c)
			}
			EventActionKind::IdentityProviderCheck(c) => options.idp_config = non_zero_object(c),
			EventActionKind::UserInactivityCheck(c) => {
				options.user_inactivity_config = non_zero_object(c)
			}
			EventActionKind::Backup
			| EventActionKind::UserQuotaReset
			| EventActionKind::FolderQuotaReset
			| EventActionKind::TransferQuotaReset
			| EventActionKind::MetadataCheck
			| EventActionKind::UserExpirationCheck
			| EventActionKind::RotateLogs => {}
		}

		Self {
			id: known(&api.name),
			numeric_id: known(&api.id),
			name: known(&api.name),
			description: non_zero(&api.description),
			action_type: known(&api.kind.action_type()),
			options: if options == EventActionOptionsModel::empty() {
				Value::Null
			} else {
				Value::Value(options)
			},
		}
	}
}

impl ResourceModel for EventActionModel {
	fn id(&self) -> &StringValue {
		&self.id
	}

	fn computed_unknown(&mut self) {
		self.id = self.name.clone();
		self.numeric_id = Value::Unknown;
	}

	fn merge_computed(&mut self, server: &Self) {
		self.id = server.id.clone();
		self.numeric_id = server.numeric_id.clone();
	}

	fn merge_secrets(&mut self, desired: &Self) {
		with_nested(&mut self.options, &desired.options, |t, s| {
			with_nested(&mut t.http_config, &s.http_config, |t, s| {
				t.password = s.password.clone();
			});
		});
	}

	fn requires_replace(&self, prior: &Self) -> Vec<AttrPath> {
		let mut paths = Vec::new();
		replace_if_changed(&mut paths, "name", &self.name, &prior.name);
		paths
	}

	fn validate(&self) -> Vec<ConvertError> {
		let root = AttrPath::root();
		let mut errors = Vec::new();
		if let Some(action_type) = known_int(&self.action_type) {
			if let Err(e) = check_discriminant(
				action_type,
				&root.attr("type"),
				"event action type",
				EventActionKind::MIN_TYPE,
				EventActionKind::MAX_TYPE,
			) {
				errors.push(e);
			}
		}
		if let Value::Value(options) = &self.options {
			if let Value::Value(fs) = &options.fs_config {
				if let Some(fs_type) = known_int(&fs.action_type) {
					let path = root.attr("options").attr("fs_config").attr("type");
					if let Err(e) = check_discriminant(
						fs_type,
						&path,
						"filesystem action type",
						FsAction::MIN_TYPE,
						FsAction::MAX_TYPE,
					) {
						errors.push(e);
					}
				}
			}
		}
		errors
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValueModel {
	pub key: StringValue,
	pub value: StringValue,
}

impl ApiModel for KeyValueModel {
	type Api = KeyValue;

	fn to_api(&self, path: &AttrPath) -> Result<KeyValue> {
		Ok(KeyValue {
			key: string(&self.key, &path.attr("key"))?,
			value: string(&self.value, &path.attr("value"))?,
		})
	}

	fn from_api(api: &KeyValue) -> Self {
		Self {
			key: non_zero(&api.key),
			value: non_zero(&api.value),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpActionConfigModel {
	pub endpoint: StringValue,
	pub username: StringValue,
	pub password: StringValue,
	pub headers: Value<Vec<KeyValueModel>>,
	pub timeout: IntValue,
	pub skip_tls_verify: BoolValue,
	pub method: StringValue,
	pub query_parameters: Value<Vec<KeyValueModel>>,
	pub body: StringValue,
	pub parts: Value<Vec<HttpPartModel>>,
}

impl ApiModel for HttpActionConfigModel {
	type Api = HttpActionConfig;

	fn to_api(&self, path: &AttrPath) -> Result<HttpActionConfig> {
		Ok(HttpActionConfig {
			endpoint: string(&self.endpoint, &path.attr("endpoint"))?,
			username: string(&self.username, &path.attr("username"))?,
			password: secret::to_api(&self.password, &path.attr("password"))?,
			headers: list(&self.headers, &path.attr("headers"))?,
			timeout: int(&self.timeout, &path.attr("timeout"))?,
			skip_tls_verify: flag(&self.skip_tls_verify, &path.attr("skip_tls_verify"))?,
			method: string(&self.method, &path.attr("method"))?,
			query_parameters: list(&self.query_parameters, &path.attr("query_parameters"))?,
			body: string(&self.body, &path.attr("body"))?,
			parts: list(&self.parts, &path.attr("parts"))?,
		})
	}

	fn from_api(api: &HttpActionConfig) -> Self {
		Self {
			endpoint: non_zero(&api.endpoint),
			username: non_zero(&api.username),
			password: secret::from_api(&api.password),
			headers: blocks(&api.headers),
			timeout: non_zero(&api.timeout),
			skip_tls_verify: non_zero(&api.skip_tls_verify),
			method: non_zero(&api.method),
			query_parameters: blocks(&api.query_parameters),
			body: non_zero(&api.body),
			parts: blocks(&api.parts),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpPartModel {
	pub name: StringValue,
	pub filepath: StringValue,
	pub headers: Value<Vec<KeyValueModel>>,
	pub body: StringValue,
}

impl ApiModel for HttpPartModel {
	type Api = HttpPart;

	fn to_api(&self, path: &AttrPath) -> Result<HttpPart> {
		Ok(HttpPart {
			name: string(&self.name, &path.attr("name"))?,
			filepath: string(&self.filepath, &path.attr("filepath"))?,
			headers: list(&self.headers, &path.attr("headers"))?,
			body: string(&self.body, &path.attr("body"))?,
		})
	}

	fn from_api(api: &HttpPart) -> Self {
		Self {
			name: non_zero(&api.name),
			filepath: non_zero(&api.filepath),
			headers: blocks(&api.headers),
			body: non_zero(&api.body),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandConfigModel {
	pub cmd: StringValue,
	pub args: StringList,
	pub timeout: IntValue,
	pub env_vars: Value<Vec<KeyValueModel>>,
}

impl ApiModel for CommandConfigModel {
	type Api = CommandConfig;

	fn to_api(&self, path: &AttrPath) -> Result<CommandConfig> {
		Ok(CommandConfig {
			cmd: string(&self.cmd, &path.attr("cmd"))?,
			args: strings(&self.args, &path.attr("args"))?,
			timeout: int(&self.timeout, &path.attr("timeout"))?,
			env_vars: list(&self.env_vars, &path.attr("env_vars"))?,
		})
	}

	fn from_api(api: &CommandConfig) -> Self {
		Self {
			cmd: non_zero(&api.cmd),
			args: non_empty(&api.args),
			timeout: non_zero(&api.timeout),
			env_vars: blocks(&api.env_vars),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailConfigModel {
	pub recipients: StringList,
	pub bcc: StringList,
	pub subject: StringValue,
	pub body: StringValue,
	pub content_type: IntValue,
	pub attachments: StringList,
}

impl ApiModel for EmailConfigModel {
	type Api = EmailConfig;

	fn to_api(&self, path: &AttrPath) -> Result<EmailConfig> {
		Ok(EmailConfig {
			recipients: strings(&self.recipients, &path.attr("recipients"))?,
			bcc: strings(&self.bcc, &path.attr("bcc"))?,
			subject: string(&self.subject, &path.attr("subject"))?,
			body: string(&self.body, &path.attr("body"))?,
			content_type: int(&self.content_type, &path.attr("content_type"))?,
			attachments: strings(&self.attachments, &path.attr("attachments"))?,
		})
	}

	fn from_api(api: &EmailConfig) -> Self {
		Self {
			recipients: non_empty(&api.recipients),
			bcc: non_empty(&api.bcc),
			subject: non_zero(&api.subject),
			body: non_zero(&api.body),
			content_type: non_zero(&api.content_type),
			attachments: non_empty(&api.attachments),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRetentionConfigModel {
	pub folders: Value<Vec<FolderRetentionModel>>,
}

impl ApiModel for DataRetentionConfigModel {
	type Api = DataRetentionConfig;

	fn to_api(&self, path: &AttrPath) -> Result<DataRetentionConfig> {
		Ok(DataRetentionConfig {
			folders: list(&self.folders, &path.attr("folders"))?,
		})
	}

	fn from_api(api: &DataRetentionConfig) -> Self {
		Self {
			folders: blocks(&api.folders),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderRetentionModel {
	pub path: StringValue,
	pub retention: IntValue,
	pub delete_empty_dirs: BoolValue,
}

impl ApiModel for FolderRetentionModel {
	type Api = FolderRetention;

	fn to_api(&self, path: &AttrPath) -> Result<FolderRetention> {
		Ok(FolderRetention {
			path: string(&self.path, &path.attr("path"))?,
			retention: int(&self.retention, &path.attr("retention"))?,
			delete_empty_dirs: flag(&self.delete_empty_dirs, &path.attr("delete_empty_dirs"))?,
		})
	}

	fn from_api(api: &FolderRetention) -> Self {
		Self {
			path: non_zero(&api.path),
			retention: non_zero(&api.retention),
			delete_empty_dirs: non_zero(&api.delete_empty_dirs),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FsActionModel {
	#[serde(rename = "type")]
	pub action_type: IntValue,
	pub renames: Value<Vec<KeyValueModel>>,
	pub deletes: StringList,
	pub mkdirs: StringList,
	pub exist: StringList,
	pub compress: Value<CompressConfigModel>,
	pub copy: Value<Vec<KeyValueModel>>,
}

impl ApiModel for FsActionModel {
	type Api = FsAction;

	fn to_api(&self, path: &AttrPath) -> Result<FsAction> {
		let type_path = path.attr("type");
		Ok(match int(&self.action_type, &type_path)? {
			1 => FsAction::Rename(list(&self.renames, &path.attr("renames"))?),
			2 => FsAction::Delete(strings(&self.deletes, &path.attr("deletes"))?),
			3 => FsAction::CreateDirs(strings(&self.mkdirs, &path.attr("mkdirs"))?),
			4 => FsAction::Exist(strings(&self.exist, &path.attr("exist"))?),
			5 => FsAction::Compress(object(&self.compress, &path.attr("compress"))?),
			6 => FsAction::Copy(list(&self.copy, &path.attr("copy"))?),
			other => {
				return Err(discriminant_error(
					&type_path,
					"filesystem action type",
					other,
					FsAction::MIN_TYPE,
					FsAction::MAX_TYPE,
				))
			}
		})
	}

	fn from_api(api: &FsAction) -> Self {
		let mut model = Self {
			action_type: known(&api.action_type()),
			renames: Value::Value(Vec::new()),
			deletes: Value::Null,
			mkdirs: Value::Null,
			exist: Value::Null,
			compress: Value::Null,
			copy: Value::Value(Vec::new()),
		};
		match api {
			FsAction::Rename(v) => model.renames = blocks(v),
			FsAction::Delete(v) => model.deletes = non_empty(v),
			FsAction::CreateDirs(v) => model.mkdirs = non_empty(v),
			FsAction::Exist(v) => model.exist = non_empty(v),
			FsAction::Compress(v) => model.compress = non_zero_object(v),
			FsAction::Copy(v) => model.copy = blocks(v),
		}
		model
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressConfigModel {
	pub name: StringValue,
	pub paths: StringList,
}

impl ApiModel for CompressConfigModel {
	type Api = CompressConfig;

	fn to_api(&self, path: &AttrPath) -> Result<CompressConfig> {
		Ok(CompressConfig {
			name: string(&self.name, &path.attr("name"))?,
			paths: strings(&self.paths, &path.attr("paths"))?,
		})
	}

	fn from_api(api: &CompressConfig) -> Self {
		Self {
			name: non_zero(&api.name),
			paths: non_empty(&api.paths),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordExpirationConfigModel {
	pub threshold: IntValue,
}

impl ApiModel for PasswordExpirationConfigModel {
	type Api = PasswordExpirationConfig;

	fn to_api(&self, path: &AttrPath) -> Result<PasswordExpirationConfig> {
		Ok(PasswordExpirationConfig {
			threshold: int(&self.threshold, &path.attr("threshold"))?,
		})
	}

	fn from_api(api: &PasswordExpirationConfig) -> Self {
		Self {
			threshold: non_zero(&api.threshold),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdpConfigModel {
	pub mode: IntValue,
	pub template_user: StringValue,
	pub template_admin: StringValue,
}

impl ApiModel for IdpConfigModel {
	type Api = IdpConfig;

	fn to_api(&self, path: &AttrPath) -> Result<IdpConfig> {
		Ok(IdpConfig {
			mode: int(&self.mode, &path.attr("mode"))?,
			template_user: string(&self.template_user, &path.attr("template_user"))?,
			template_admin: string(&self.template_admin, &path.attr("template_admin"))?,
		})
	}

	fn from_api(api: &IdpConfig) -> Self {
		Self {
			mode: non_zero(&api.mode),
			template_user: non_zero(&api.template_user),
			template_admin: non_zero(&api.template_admin),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInactivityConfigModel {
	pub disable_threshold: IntValue,
	pub delete_threshold: IntValue,
}

impl ApiModel for UserInactivityConfigModel {
	type Api = UserInactivityConfig;

	fn to_api(&self, path: &AttrPath) -> Result<UserInactivityConfig> {
		Ok(UserInactivityConfig {
			disable_threshold: int(&self.disable_threshold, &path.attr("disable_threshold"))?,
			delete_threshold: int(&self.delete_threshold, &path.attr("delete_threshold"))?,
		})
	}

	fn from_api(api: &UserInactivityConfig) -> Self {
		Self {
			disable_threshold: non_zero(&api.disable_threshold),
			delete_threshold: non_zero(&api.delete_threshold),
		}
	}
}

fn key_value_block(description: &str) -> Block {
	BlockBuilder::new(description)
		.required_string("key", "Name.")
		.optional_string("value", "Value. Placeholders such as `{{VirtualPath}}` are expanded.")
		.build()
}

pub fn block() -> Block {
	let http = BlockBuilder::new("Calls an HTTP endpoint.")
		.optional_string("endpoint", "Absolute URL. Placeholders are allowed in the query.")
		.optional_string("username", "Basic auth username.")
		.secret("password", "Basic auth password, plaintext or SFTPGo KMS secret.")
		.optional_int("timeout", "Seconds, 1 to 180.")
		.optional_bool("skip_tls_verify", "Skip TLS certificate verification.")
		.optional_string("method", "`GET`, `POST`, `PUT`, `DELETE`.")
		.optional_string("body", "Request body.")
		.list("headers", key_value_block("Request header."))
		.list("query_parameters", key_value_block("Query parameter."))
		.list(
			"parts",
			BlockBuilder::new("Multipart body part.")
				.required_string("name", "Part name.")
				.optional_string("filepath", "Virtual path of a file to attach.")
				.optional_string("body", "Inline part body.")
				.list("headers", key_value_block("Part header."))
				.build(),
		)
		.build();

	let cmd = BlockBuilder::new("Runs a local command.")
		.optional_string("cmd", "Absolute path of the command.")
		.optional_strings("args", "Command arguments.")
		.optional_int("timeout", "Seconds, 1 to 120.")
		.list("env_vars", key_value_block("Environment variable."))
		.build();

	let email = BlockBuilder::new("Sends an email.")
		.optional_strings("recipients", "Recipient addresses.")
		.optional_strings("bcc", "Blind copy addresses.")
		.optional_string("subject", "Subject template.")
		.optional_string("body", "Body template.")
		.optional_int("content_type", "0 text/plain, 1 text/html.")
		.optional_strings("attachments", "Virtual paths of files to attach.")
		.build();

	let retention = BlockBuilder::new("Deletes files older than a retention period.")
		.list(
			"folders",
			BlockBuilder::new("Retention rule for one path.")
				.required_string("path", "Virtual path.")
				.optional_int("retention", "Hours. 0 excludes the path.")
				.optional_bool("delete_empty_dirs", "Remove directories left empty.")
				.build(),
		)
		.build();

	let fs = BlockBuilder::new("Filesystem operation. Only the attribute matching `type` is used.")
		.required_int("type", "1 rename, 2 delete, 3 create dirs, 4 exist, 5 compress, 6 copy.")
		.optional_strings("deletes", "Paths to delete.")
		.optional_strings("mkdirs", "Directories to create.")
		.optional_strings("exist", "Paths that must exist.")
		.list("renames", key_value_block("Rename `key` to `value`."))
		.list("copy", key_value_block("Copy `key` to `value`."))
		.single(
			"compress",
			BlockBuilder::new("Creates a zip archive.")
				.optional_string("name", "Archive virtual path.")
				.optional_strings("paths", "Paths to include.")
				.build(),
		)
		.build();

	let options = BlockBuilder::new("Type specific options. Only the block matching `type` is used.")
		.single("http_config", http)
		.single("cmd_config", cmd)
		.single("email_config", email)
		.single("retention_config", retention)
		.single("fs_config", fs)
		.single(
			"pwd_expiration_config",
			BlockBuilder::new("Password expiration notifications.")
				.optional_int("threshold", "Notify this many days before expiration.")
				.build(),
		)
		.single(
			"idp_config",
			BlockBuilder::new("Identity provider account check.")
				.optional_int("mode", "0 create or update, 1 create only.")
				.optional_string("template_user", "JSON user template.")
				.optional_string("template_admin", "JSON admin template.")
				.build(),
		)
		.single(
			"user_inactivity_config",
			BlockBuilder::new("Inactive user handling.")
				.optional_int("disable_threshold", "Disable after this many inactive days.")
				.optional_int("delete_threshold", "Delete after this many inactive days.")
				.build(),
		)
		.build();

	BlockBuilder::new("An action that event rules can execute.")
		.computed_string("id", "Same as `name`.")
		.computed_int("numeric_id", "Numeric id assigned by SFTPGo.")
		.required_string("name", "Unique action name.")
		.optional_string("description", "Free form description.")
		.required_int(
			"type",
			"1 HTTP, 2 command, 3 email, 4 backup, 5 user quota reset, 6 folder quota reset, \
			 7 transfer quota reset, 8 data retention check, 9 filesystem, 10 metadata check, \
			 11 password expiration check, 12 user expiration check, 13 identity provider \
			 account check, 14 user inactivity check, 15 rotate logs",
		)
		.single("options", options)
		.build()
}

#[cfg(test)]
mod tests {
	use super::*;
	use sftpgo_kms::{KmsSecret, SecretStatus};

	fn http_action() -> EventAction {
		EventAction {
			id: 7,
			name: "webhook".to_string(),
			description: "notify CI".to_string(),
			kind: EventActionKind::Http(HttpActionConfig {
				endpoint: "https://ci.example.com/hook".to_string(),
				password: Some(KmsSecret::new(SecretStatus::Aes256Gcm, "", "", "enc")),
				headers: vec![KeyValue::new("X-Event", "{{Event}}")],
				timeout: 20,
				method: "POST".to_string(),
				parts: vec![HttpPart {
					name: "file".to_string(),
					filepath: "{{VirtualPath}}".to_string(),
					..Default::default()
				}],
				..Default::default()
			}),
		}
	}

	#[test]
	fn round_trips_an_http_action() {
		let api = http_action();
		let model = EventActionModel::from_api(&api);
		assert_eq!(model.action_type, Value::Value(1));
		let Value::Value(options) = &model.options else {
			panic!("options should be set");
		};
		assert!(matches!(options.http_config, Value::Value(_)));
		assert_eq!(options.cmd_config, Value::Null);
		assert_eq!(model.to_api(&AttrPath::root()).unwrap(), api);
	}

	#[test]
	fn actions_without_options_have_no_options_block() {
		let api = EventAction {
			name: "backup".to_string(),
			kind: EventActionKind::Backup,
			..Default::default()
		};
		let model = EventActionModel::from_api(&api);
		assert_eq!(model.options, Value::Null);
		assert_eq!(model.action_type, Value::Value(4));
		assert_eq!(model.to_api(&AttrPath::root()).unwrap(), api);
	}

	#[test]
	fn filesystem_action_uses_only_the_selected_operation() {
		let api = EventAction {
			name: "archive".to_string(),
			kind: EventActionKind::Filesystem(FsAction::Compress(CompressConfig {
				name: "/archive.zip".to_string(),
				paths: vec!["/uploads".to_string()],
			})),
			..Default::default()
		};
		let mut model = EventActionModel::from_api(&api);
		if let Value::Value(options) = &mut model.options {
			if let Value::Value(fs) = &mut options.fs_config {
				assert_eq!(fs.action_type, Value::Value(5));
				assert_eq!(fs.renames, Value::Value(Vec::new()));
				fs.deletes = Value::Value(vec![Value::Value("/ignored".to_string())]);
			}
		}
		assert_eq!(model.to_api(&AttrPath::root()).unwrap(), api);
	}

	#[test]
	fn invalid_types_are_reported_with_their_path() {
		let mut model = EventActionModel::from_api(&EventAction {
			name: "mv".to_string(),
			kind: EventActionKind::Filesystem(FsAction::Rename(vec![KeyValue::new("/a", "/b")])),
			..Default::default()
		});
		if let Value::Value(options) = &mut model.options {
			if let Value::Value(fs) = &mut options.fs_config {
				fs.action_type = Value::Value(7);
			}
		}
		let errors = model.validate();
		assert_eq!(errors.len(), 1);
		assert_eq!(errors[0].path.to_string(), "options.fs_config.type");
		let err = model.to_api(&AttrPath::root()).unwrap_err();
		assert_eq!(
			err.to_string(),
			"options.fs_config.type: invalid filesystem action type 7, expected 1 to 6"
		);

		model.action_type = Value::Value(16);
		assert_eq!(model.validate().len(), 2);
	}

	#[test]
	fn http_password_comes_from_the_plan() {
		let mut desired = EventActionModel::from_api(&http_action());
		if let Value::Value(options) = &mut desired.options {
			if let Value::Value(http) = &mut options.http_config {
				http.password = Value::Value("plain".to_string());
			}
		}
		let mut server = EventActionModel::from_api(&http_action());
		server.merge_secrets(&desired);
		assert_eq!(server, desired);
	}
}
