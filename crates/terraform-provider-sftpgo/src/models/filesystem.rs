// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The `filesystem` block shared by users, folders and group user settings.
//!
//! `provider` selects the backend and only the matching sub-block is read.
//! Reading back fills only the sub-block of the active backend.

use serde::{Deserialize, Serialize};
use sftpgo_client::types::{
	AzBlobConfig, CryptConfig, Filesystem, GcsConfig, HttpFsConfig, OsConfig, S3Config,
	SftpFsConfig,
};
use tf_provider::{Block, Value};

use crate::convert::value::{
	flag, int, known, known_int, non_empty, non_zero, non_zero_object, object, string, strings,
	with_nested, BoolValue, IntValue, StringList, StringValue,
};
use crate::convert::{
	check_discriminant, discriminant_error, secret, ApiModel, AttrPath, ConvertError, Result,
};
use crate::schema::BlockBuilder;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilesystemModel {
	pub provider: IntValue,
	pub osconfig: Value<OsConfigModel>,
	pub s3config: Value<S3ConfigModel>,
	pub gcsconfig: Value<GcsConfigModel>,
	pub azblobconfig: Value<AzBlobConfigModel>,
	pub cryptconfig: Value<CryptConfigModel>,
	pub sftpconfig: Value<SftpConfigModel>,
	pub httpconfig: Value<HttpConfigModel>,
}

impl FilesystemModel {
	fn empty(provider: i64) -> Self {
		Self {
			provider: known(&provider),
			osconfig: Value::Null,
			s3config: Value::Null,
			gcsconfig: Value::Null,
			azblobconfig: Value::Null,
			cryptconfig: Value::Null,
			sftpconfig: Value::Null,
			httpconfig: Value::Null,
		}
	}

	pub fn validate(&self, path: &AttrPath, errors: &mut Vec<ConvertError>) {
		if let Some(provider) = known_int(&self.provider) {
			if let Err(e) = check_discriminant(
				provider,
				&path.attr("provider"),
				"filesystem provider",
				Filesystem::PROVIDER_LOCAL,
				Filesystem::PROVIDER_HTTP,
			) {
				errors.push(e);
			}
		}
	}

	/// Copies write-only secrets from `desired`, which SFTPGo only returns
	/// encrypted.
	pub fn merge_secrets(&mut self, desired: &Self) {
		with_nested(&mut self.s3config, &desired.s3config, |t, s| {
			t.access_secret = s.access_secret.clone();
			t.sse_customer_key = s.sse_customer_key.clone();
		});
		with_nested(&mut self.gcsconfig, &desired.gcsconfig, |t, s| {
			t.credentials = s.credentials.clone();
		});
		with_nested(&mut self.azblobconfig, &desired.azblobconfig, |t, s| {
			t.account_key = s.account_key.clone();
			t.sas_url = s.sas_url.clone();
		});
		with_nested(&mut self.cryptconfig, &desired.cryptconfig, |t, s| {
			t.passphrase = s.passphrase.clone();
		});
		with_nested(&mut self.sftpconfig, &desired.sftpconfig, |t, s| {
			t.password = s.password.clone();
			t.private_key = s.private_key.clone();
			t.key_passphrase = s.key_passphrase.clone();
		});
		with_nested(&mut self.httpconfig, &desired.httpconfig, |t, s| {
			t.password = s.password.clone();
			t.api_key = s.api_key.clone();
		});
	}
}

impl ApiModel for FilesystemModel {
	type Api = Filesystem;

	fn to_api(&self, path: &AttrPath) -> Result<Filesystem> {
		let provider = int(&self.provider, &path.attr("provider"))?;
		Ok(match provider {
			Filesystem::PROVIDER_LOCAL => {
				Filesystem::Local(object(&self.osconfig, &path.attr("osconfig"))?)
			}
			Filesystem::PROVIDER_S3 => Filesystem::S3(object(&self.s3config, &path.attr("s3config"))?),
			Filesystem::PROVIDER_GCS => {
				Filesystem::Gcs(object(&self.gcsconfig, &path.attr("gcsconfig"))?)
			}
			Filesystem::PROVIDER_AZURE_BLOB => {
				Filesystem::AzureBlob(object(&self.azblobconfig, &path.attr("azblobconfig"))?)
			}
			Filesystem::PROVIDER_CRYPT => {
				Filesystem::Crypt(object(&self.cryptconfig, &path.attr("cryptconfig"))?)
			}
			Filesystem::PROVIDER_SFTP => {
				Filesystem::Sftp(object(&self.sftpconfig, &path.attr("sftpconfig"))?)
			}
			Filesystem::PROVIDER_HTTP => {
				Filesystem::Http(object(&self.httpconfig, &path.attr("httpconfig"))?)
			}
			other => {
				return Err(discriminant_error(
					&path.attr("provider"),
					"filesystem provider",
					other,
					Filesystem::PROVIDER_LOCAL,
					Filesystem::PROVIDER_HTTP,
				))
			}
		})
	}

	fn from_api(api: &Filesystem) -> Self {
		let mut model = Self::empty(api.provider());
		match api {
			Filesystem::Local(c) => model.osconfig = non_zero_object(c),
			Filesystem::S3(c) => model.s3config = non_zero_object(c),
			Filesystem::Gcs(c) => model.gcsconfig = non_zero_object(c),
			Filesystem::AzureBlob(c) => model.azblobconfig = non_zero_object(c),
			Filesystem::Crypt(c) => model.cryptconfig = non_zero_object(c),
			Filesystem::Sftp(c) => model.sftpconfig = non_zero_object(c),
			Filesystem::Http(c) => model.httpconfig = non_zero_object(c),
		}
		model
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsConfigModel {
	pub read_buffer_size: IntValue,
	pub write_buffer_size: IntValue,
}

impl ApiModel for OsConfigModel {
	type Api = OsConfig;

	fn to_api(&self, path: &AttrPath) -> Result<OsConfig> {
		Ok(OsConfig {
			read_buffer_size: int(&self.read_buffer_size, &path.attr("read_buffer_size"))?,
			write_buffer_size: int(&self.write_buffer_size, &path.attr("write_buffer_size"))?,
		})
	}

	fn from_api(api: &OsConfig) -> Self {
		Self {
			read_buffer_size: non_zero(&api.read_buffer_size),
			write_buffer_size: non_zero(&api.write_buffer_size),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct S3ConfigModel {
	pub bucket: StringValue,
	pub key_prefix: StringValue,
	pub region: StringValue,
	pub access_key: StringValue,
	pub access_secret: StringValue,
	pub role_arn: StringValue,
	pub endpoint: StringValue,
	pub storage_class: StringValue,
	pub acl: StringValue,
	pub upload_part_size: IntValue,
	pub upload_concurrency: IntValue,
	pub upload_part_max_time: IntValue,
	pub download_part_size: IntValue,
	pub download_concurrency: IntValue,
	pub download_part_max_time: IntValue,
	pub force_path_style: BoolValue,
	pub skip_tls_verify: BoolValue,
	pub sse_customer_key: StringValue,
}

impl ApiModel for S3ConfigModel {
	type Api = S3Config;

	fn to_api(&self, path: &AttrPath) -> Result<S3Config> {
		Ok(S3Config {
			bucket: string(&self.bucket, &path.attr("bucket"))?,
			key_prefix: string(&self.key_prefix, &path.attr("key_prefix"))?,
			region: string(&self.region, &path.attr("region"))?,
			access_key: string(&self.access_key, &path.attr("access_key"))?,
			access_secret: secret::to_api(&self.access_secret, &path.attr("access_secret"))?,
			role_arn: string(&self.role_arn, &path.attr("role_arn"))?,
			endpoint: string(&self.endpoint, &path.attr("endpoint"))?,
			storage_class: string(&self.storage_class, &path.attr("storage_class"))?,
			acl: string(&self.acl, &path.attr("acl"))?,
			upload_part_size: int(&self.upload_part_size, &path.attr("upload_part_size"))?,
			upload_concurrency: int(&self.upload_concurrency, &path.attr("upload_concurrency"))?,
			upload_part_max_time: int(&self.upload_part_max_time, &path.attr("upload_part_max_time"))?,
			download_part_size: int(&self.download_part_size, &path.attr("download_part_size"))?,
			download_concurrency: int(&self.download_concurrency, &path.attr("download_concurrency"))?,
			download_part_max_time: int(
				&self.download_part_max_time,
				&path.attr("download_part_max_time"),
			)?,
			force_path_style: flag(&self.force_path_style, &path.attr("force_path_style"))?,
			skip_tls_verify: flag(&self.skip_tls_verify, &path.attr("skip_tls_verify"))?,
			sse_customer_key: secret::to_api(&self.sse_customer_key, &path.attr("sse_customer_key"))?,
		})
	}

	fn from_api(api: &S3Config) -> Self {
		Self {
			bucket: non_zero(&api.bucket),
			key_prefix: non_zero(&api.key_prefix),
			region: non_zero(&api.region),
			access_key: non_zero(&api.access_key),
			access_secret: secret::from_api(&api.access_secret),
			role_arn: non_zero(&api.role_arn),
			endpoint: non_zero(&api.endpoint),
			storage_class: non_zero(&api.storage_class),
			acl: non_zero(&api.acl),
			upload_part_size: non_zero(&api.upload_part_size),
			upload_concurrency: non_zero(&api.upload_concurrency),
			upload_part_max_time: non_zero(&api.upload_part_max_time),
			download_part_size: non_zero(&api.download_part_size),
			download_concurrency: non_zero(&api.download_concurrency),
			download_part_max_time: non_zero(&api.download_part_max_time),
			force_path_style: non_zero(&api.force_path_style),
			skip_tls_verify: non_zero(&api.skip_tls_verify),
			sse_customer_key: secret::from_api(&api.sse_customer_key),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GcsConfigModel {
	pub bucket: StringValue,
	pub key_prefix: StringValue,
	pub credentials: StringValue,
	pub automatic_credentials: IntValue,
	pub storage_class: StringValue,
	pub acl: StringValue,
	pub upload_part_size: IntValue,
	pub upload_part_max_time: IntValue,
}

impl ApiModel for GcsConfigModel {
	type Api = GcsConfig;

	fn to_api(&self, path: &AttrPath) -> Result<GcsConfig> {
		Ok(GcsConfig {
			bucket: string(&self.bucket, &path.attr("bucket"))?,
			key_prefix: string(&self.key_prefix, &path.attr("key_prefix"))?,
			credentials: secret::to_api(&self.credentials, &path.attr("credentials"))?,
			automatic_credentials: int(
				&self.automatic_credentials,
				&path.attr("automatic_credentials"),
			)?,
			storage_class: string(&self.storage_class, &path.attr("storage_class"))?,
			acl: string(&self.acl, &path.attr("acl"))?,
			upload_part_size: int(&self.upload_part_size, &path.attr("upload_part_size"))?,
			upload_part_max_time: int(&self.upload_part_max_time, &path.attr("upload_part_max_time"))?,
		})
	}

	fn from_api(api: &GcsConfig) -> Self {
		Self {
			bucket: non_zero(&api.bucket),
			key_prefix: non_zero(&api.key_prefix),
			credentials: secret::from_api(&api.credentials),
			automatic_credentials: non_zero(&api.automatic_credentials),
			storage_class: non_zero(&api.storage_class),
			acl: non_zero(&api.acl),
			upload_part_size: non_zero(&api.upload_part_size),
			upload_part_max_time: non_zero(&api.upload_part_max_time),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AzBlobConfigModel {
	pub container: StringValue,
	pub account_name: StringValue,
	pub account_key: StringValue,
	pub sas_url: StringValue,
	pub endpoint: StringValue,
	pub key_prefix: StringValue,
	pub upload_part_size: IntValue,
	pub upload_concurrency: IntValue,
	pub download_part_size: IntValue,
	pub download_concurrency: IntValue,
	pub use_emulator: BoolValue,
	pub access_tier: StringValue,
}

impl ApiModel for AzBlobConfigModel {
	type Api = AzBlobConfig;

	fn to_api(&self, path: &AttrPath) -> Result<AzBlobConfig> {
		Ok(AzBlobConfig {
			container: string(&self.container, &path.attr("container"))?,
			account_name: string(&self.account_name, &path.attr("account_name"))?,
			account_key: secret::to_api(&self.account_key, &path.attr("account_key"))?,
			sas_url: secret::to_api(&self.sas_url, &path.attr("sas_url"))?,
			endpoint: string(&self.endpoint, &path.attr("endpoint"))?,
			key_prefix: string(&self.key_prefix, &path.attr("key_prefix"))?,
			upload_part_size: int(&self.upload_part_size, &path.attr("upload_part_size"))?,
			upload_concurrency: int(&self.upload_concurrency, &path.attr("upload_concurrency"))?,
			download_part_size: int(&self.download_part_size, &path.attr("download_part_size"))?,
			download_concurrency: int(&self.download_concurrency, &path.attr("download_concurrency"))?,
			use_emulator: flag(&self.use_emulator, &path.attr("use_emulator"))?,
			access_tier: string(&self.access_tier, &path.attr("access_tier"))?,
		})
	}

	fn from_api(api: &AzBlobConfig) -> Self {
		Self {
			container: non_zero(&api.container),
			account_name: non_zero(&api.account_name),
			account_key: secret::from_api(&api.account_key),
			sas_url: secret::from_api(&api.sas_url),
			endpoint: non_zero(&api.endpoint),
			key_prefix: non_zero(&api.key_prefix),
			upload_part_size: non_zero(&api.upload_part_size),
			upload_concurrency: non_zero(&api.upload_concurrency),
			download_part_size: non_zero(&api.download_part_size),
			download_concurrency: non_zero(&api.download_concurrency),
			use_emulator: non_zero(&api.use_emulator),
			access_tier: non_zero(&api.access_tier),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptConfigModel {
	pub passphrase: StringValue,
	pub read_buffer_size: IntValue,
	pub write_buffer_size: IntValue,
}

impl ApiModel for CryptConfigModel {
	type Api = CryptConfig;

	fn to_api(&self, path: &AttrPath) -> Result<CryptConfig> {
		Ok(CryptConfig {
			passphrase: secret::to_api(&self.passphrase, &path.attr("passphrase"))?,
			read_buffer_size: int(&self.read_buffer_size, &path.attr("read_buffer_size"))?,
			write_buffer_size: int(&self.write_buffer_size, &path.attr("write_buffer_size"))?,
		})
	}

	fn from_api(api: &CryptConfig) -> Self {
		Self {
			passphrase: secret::from_api(&api.passphrase),
			read_buffer_size: non_zero(&api.read_buffer_size),
			write_buffer_size: non_zero(&api.write_buffer_size),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SftpConfigModel {
	pub endpoint: StringValue,
	pub username: StringValue,
	pub password: StringValue,
	pub private_key: StringValue,
	pub key_passphrase: StringValue,
	pub fingerprints: StringList,
	pub prefix: StringValue,
	pub disable_concurrent_reads: BoolValue,
	pub buffer_size: IntValue,
	pub equality_check_mode: IntValue,
}

impl ApiModel for SftpConfigModel {
	type Api = SftpFsConfig;

	fn to_api(&self, path: &AttrPath) -> Result<SftpFsConfig> {
		Ok(SftpFsConfig {
			endpoint: string(&self.endpoint, &path.attr("endpoint"))?,
			username: string(&self.username, &path.attr("username"))?,
			password: secret::to_api(&self.password, &path.attr("password"))?,
			private_key: secret::to_api(&self.private_key, &path.attr("private_key"))?,
			key_passphrase: secret::to_api(&self.key_passphrase, &path.attr("key_passphrase"))?,
			fingerprints: strings(&self.fingerprints, &path.attr("fingerprints"))?,
			prefix: string(&self.prefix, &path.attr("prefix"))?,
			disable_concurrent_reads: flag(
				&self.disable_concurrent_reads,
				&path.attr("disable_concurrent_reads"),
			)?,
			buffer_size: int(&self.buffer_size, &path.attr("buffer_size"))?,
			equality_check_mode: int(&self.equality_check_mode, &path.attr("equality_check_mode"))?,
		})
	}

	fn from_api(api: &SftpFsConfig) -> Self {
		Self {
			endpoint: non_zero(&api.endpoint),
			username: non_zero(&api.username),
			password: secret::from_api(&api.password),
			private_key: secret::from_api(&api.private_key),
			key_passphrase: secret::from_api(&api.key_passphrase),
			fingerprints: non_empty(&api.fingerprints),
			prefix: non_zero(&api.prefix),
			disable_concurrent_reads: non_zero(&api.disable_concurrent_reads),
			buffer_size: non_zero(&api.buffer_size),
			equality_check_mode: non_zero(&api.equality_check_mode),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfigModel {
	pub endpoint: StringValue,
	pub username: StringValue,
	pub password: StringValue,
	pub api_key: StringValue,
	pub skip_tls_verify: BoolValue,
	pub equality_check_mode: IntValue,
}

impl ApiModel for HttpConfigModel {
	type Api = HttpFsConfig;

	fn to_api(&self, path: &AttrPath) -> Result<HttpFsConfig> {
		Ok(HttpFsConfig {
			endpoint: string(&self.endpoint, &path.attr("endpoint"))?,
			username: string(&self.username, &path.attr("username"))?,
			password: secret::to_api(&self.password, &path.attr("password"))?,
			api_key: secret::to_api(&self.api_key, &path.attr("api_key"))?,
			skip_tls_verify: flag(&self.skip_tls_verify, &path.attr("skip_tls_verify"))?,
			equality_check_mode: int(&self.equality_check_mode, &path.attr("equality_check_mode"))?,
		})
	}

	fn from_api(api: &HttpFsConfig) -> Self {
		Self {
			endpoint: non_zero(&api.endpoint),
			username: non_zero(&api.username),
			password: secret::from_api(&api.password),
			api_key: secret::from_api(&api.api_key),
			skip_tls_verify: non_zero(&api.skip_tls_verify),
			equality_check_mode: non_zero(&api.equality_check_mode),
		}
	}
}

pub fn block() -> Block {
	let secret_help = "Plaintext, or an SFTPGo KMS secret in its `$status$key$len$data` form.";
	BlockBuilder::new("Storage backend. Only the block matching `provider` is used.")
		.required_int(
			"provider",
			"0 local, 1 S3, 2 Google Cloud Storage, 3 Azure Blob, 4 encrypted local, 5 SFTP, 6 HTTP",
		)
		.single(
			"osconfig",
			BlockBuilder::new("Local filesystem tuning.")
				.optional_int("read_buffer_size", "Read buffer in MB, 0 disables buffering.")
				.optional_int("write_buffer_size", "Write buffer in MB, 0 disables buffering.")
				.build(),
		)
		.single(
			"s3config",
			BlockBuilder::new("S3 compatible object storage.")
				.optional_string("bucket", "Bucket name.")
				.optional_string("key_prefix", "Restricts access to this prefix, e.g. `users/alice/`.")
				.optional_string("region", "Bucket region.")
				.optional_string("access_key", "Access key ID.")
				.secret("access_secret", secret_help)
				.optional_string("role_arn", "IAM role to assume.")
				.optional_string("endpoint", "Custom endpoint for S3 compatible services.")
				.optional_string("storage_class", "Storage class for uploads.")
				.optional_string("acl", "Canned ACL for uploads.")
				.optional_int("upload_part_size", "Multipart upload part size in MB.")
				.optional_int("upload_concurrency", "Parts uploaded in parallel.")
				.optional_int("upload_part_max_time", "Seconds allowed per uploaded part.")
				.optional_int("download_part_size", "Multipart download part size in MB.")
				.optional_int("download_concurrency", "Parts downloaded in parallel.")
				.optional_int("download_part_max_time", "Seconds allowed per downloaded part.")
				.optional_bool("force_path_style", "Use path-style addressing.")
				.optional_bool("skip_tls_verify", "Skip TLS certificate verification.")
				.secret("sse_customer_key", secret_help)
				.build(),
		)
		.single(
			"gcsconfig",
			BlockBuilder::new("Google Cloud Storage.")
				.optional_string("bucket", "Bucket name.")
				.optional_string("key_prefix", "Restricts access to this prefix.")
				.secret("credentials", secret_help)
				.optional_int("automatic_credentials", "1 to use application default credentials.")
				.optional_string("storage_class", "Storage class for uploads.")
				.optional_string("acl", "Predefined ACL for uploads.")
				.optional_int("upload_part_size", "Upload chunk size in MB.")
				.optional_int("upload_part_max_time", "Seconds allowed per uploaded chunk.")
				.build(),
		)
		.single(
			"azblobconfig",
			BlockBuilder::new("Azure Blob Storage.")
				.optional_string("container", "Container name.")
				.optional_string("account_name", "Storage account name.")
				.secret("account_key", secret_help)
				.secret("sas_url", secret_help)
				.optional_string("endpoint", "Custom endpoint.")
				.optional_string("key_prefix", "Restricts access to this prefix.")
				.optional_int("upload_part_size", "Block size in MB.")
				.optional_int("upload_concurrency", "Blocks uploaded in parallel.")
				.optional_int("download_part_size", "Download part size in MB.")
				.optional_int("download_concurrency", "Parts downloaded in parallel.")
				.optional_bool("use_emulator", "Target the Azurite emulator.")
				.optional_string("access_tier", "Blob access tier.")
				.build(),
		)
		.single(
			"cryptconfig",
			BlockBuilder::new("Local filesystem encrypted with a passphrase.")
				.secret("passphrase", secret_help)
				.optional_int("read_buffer_size", "Read buffer in MB.")
				.optional_int("write_buffer_size", "Write buffer in MB.")
				.build(),
		)
		.single(
			"sftpconfig",
			BlockBuilder::new("Another SFTP server.")
				.optional_string("endpoint", "`host:port` of the remote server.")
				.optional_string("username", "Remote username.")
				.secret("password", secret_help)
				.secret("private_key", secret_help)
				.secret("key_passphrase", secret_help)
				.optional_strings("fingerprints", "Accepted host key fingerprints.")
				.optional_string("prefix", "Remote directory to restrict the user to.")
				.optional_bool("disable_concurrent_reads", "Disable concurrent reads.")
				.optional_int("buffer_size", "Buffer size in MB, enables buffered transfers.")
				.optional_int("equality_check_mode", "0 compare hashes, 1 compare size and mtime.")
				.build(),
		)
		.single(
			"httpconfig",
			BlockBuilder::new("HTTP filesystem backend.")
				.optional_string("endpoint", "Base URL of the backend.")
				.optional_string("username", "Basic auth username.")
				.secret("password", secret_help)
				.secret("api_key", secret_help)
				.optional_bool("skip_tls_verify", "Skip TLS certificate verification.")
				.optional_int("equality_check_mode", "0 compare hashes, 1 compare size and mtime.")
				.build(),
		)
		.build()
}
