// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Storage backends.
//!
//! On the wire a filesystem is a `provider` discriminant plus one populated
//! sub-config object. Here it is an enum, so a value can never carry the
//! configuration of a backend it does not use.

use serde::{Deserialize, Serialize};
use sftpgo_kms::KmsSecret;

use super::InvalidDiscriminant;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FilesystemWire", into = "FilesystemWire")]
pub enum Filesystem {
	Local(OsConfig),
	S3(S3Config),
	Gcs(GcsConfig),
	AzureBlob(AzBlobConfig),
	Crypt(CryptConfig),
	Sftp(SftpFsConfig),
	Http(HttpFsConfig),
}

impl Default for Filesystem {
	fn default() -> Self {
		Filesystem::Local(OsConfig::default())
	}
}

impl Filesystem {
	pub const PROVIDER_LOCAL: i64 = 0;
	pub const PROVIDER_S3: i64 = 1;
	pub const PROVIDER_GCS: i64 = 2;
	pub const PROVIDER_AZURE_BLOB: i64 = 3;
	pub const PROVIDER_CRYPT: i64 = 4;
	pub const PROVIDER_SFTP: i64 = 5;
	pub const PROVIDER_HTTP: i64 = 6;

	/// The `provider` value SFTPGo uses for this backend.
	pub fn provider(&self) -> i64 {
		match self {
			Filesystem::Local(_) => Self::PROVIDER_LOCAL,
			Filesystem::S3(_) => Self::PROVIDER_S3,
			Filesystem::Gcs(_) => Self::PROVIDER_GCS,
			Filesystem::AzureBlob(_) => Self::PROVIDER_AZURE_BLOB,
			Filesystem::Crypt(_) => Self::PROVIDER_CRYPT,
			Filesystem::Sftp(_) => Self::PROVIDER_SFTP,
			Filesystem::Http(_) => Self::PROVIDER_HTTP,
		}
	}

	pub fn is_valid_provider(provider: i64) -> bool {
		(Self::PROVIDER_LOCAL..=Self::PROVIDER_HTTP).contains(&provider)
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OsConfig {
	pub read_buffer_size: i64,
	pub write_buffer_size: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct S3Config {
	pub bucket: String,
	pub key_prefix: String,
	pub region: String,
	pub access_key: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub access_secret: Option<KmsSecret>,
	pub role_arn: String,
	pub endpoint: String,
	pub storage_class: String,
	pub acl: String,
	pub upload_part_size: i64,
	pub upload_concurrency: i64,
	pub upload_part_max_time: i64,
	pub download_part_size: i64,
	pub download_concurrency: i64,
	pub download_part_max_time: i64,
	pub force_path_style: bool,
	pub skip_tls_verify: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sse_customer_key: Option<KmsSecret>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcsConfig {
	pub bucket: String,
	pub key_prefix: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub credentials: Option<KmsSecret>,
	pub automatic_credentials: i64,
	pub storage_class: String,
	pub acl: String,
	pub upload_part_size: i64,
	pub upload_part_max_time: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AzBlobConfig {
	pub container: String,
	pub account_name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub account_key: Option<KmsSecret>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sas_url: Option<KmsSecret>,
	pub endpoint: String,
	pub key_prefix: String,
	pub upload_part_size: i64,
	pub upload_concurrency: i64,
	pub download_part_size: i64,
	pub download_concurrency: i64,
	pub use_emulator: bool,
	pub access_tier: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptConfig {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub passphrase: Option<KmsSecret>,
	pub read_buffer_size: i64,
	pub write_buffer_size: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SftpFsConfig {
	pub endpoint: String,
	pub username: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub password: Option<KmsSecret>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub private_key: Option<KmsSecret>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub key_passphrase: Option<KmsSecret>,
	pub fingerprints: Vec<String>,
	pub prefix: String,
	pub disable_concurrent_reads: bool,
	pub buffer_size: i64,
	pub equality_check_mode: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpFsConfig {
	pub endpoint: String,
	pub username: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub password: Option<KmsSecret>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub api_key: Option<KmsSecret>,
	pub skip_tls_verify: bool,
	pub equality_check_mode: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct FilesystemWire {
	provider: i64,
	#[serde(skip_serializing_if = "Option::is_none")]
	osconfig: Option<OsConfig>,
	#[serde(skip_serializing_if = "Option::is_none")]
	s3config: Option<S3Config>,
	#[serde(skip_serializing_if = "Option::is_none")]
	gcsconfig: Option<GcsConfig>,
	#[serde(skip_serializing_if = "Option::is_none")]
	azblobconfig: Option<AzBlobConfig>,
	#[serde(skip_serializing_if = "Option::is_none")]
	cryptconfig: Option<CryptConfig>,
	#[serde(skip_serializing_if = "Option::is_none")]
	sftpconfig: Option<SftpFsConfig>,
	#[serde(skip_serializing_if = "Option::is_none")]
	httpconfig: Option<HttpFsConfig>,
}

impl TryFrom<FilesystemWire> for Filesystem {
	type Error = InvalidDiscriminant;

	fn try_from(wire: FilesystemWire) -> Result<Self, Self::Error> {
		Ok(match wire.provider {
			Self::PROVIDER_LOCAL => Filesystem::Local(wire.osconfig.unwrap_or_default()),
			Self::PROVIDER_S3 => Filesystem::S3(wire.s3config.unwrap_or_default()),
			Self::PROVIDER_GCS => Filesystem::Gcs(wire.gcsconfig.unwrap_or_default()),
			Self::PROVIDER_AZURE_BLOB => {
				Filesystem::AzureBlob(wire.azblobconfig.unwrap_or_default())
			}
			Self::PROVIDER_CRYPT => Filesystem::Crypt(wire.cryptconfig.unwrap_or_default()),
			Self::PROVIDER_SFTP => Filesystem::Sftp(wire.sftpconfig.unwrap_or_default()),
			Self::PROVIDER_HTTP => Filesystem::Http(wire.httpconfig.unwrap_or_default()),
			value => {
				return Err(InvalidDiscriminant {
					field: "filesystem provider",
					value,
				})
			}
		})
	}
}

impl From<Filesystem> for FilesystemWire {
	fn from(fs: Filesystem) -> Self {
		let mut wire = FilesystemWire {
			provider: fs.provider(),
			..Default::default()
		};
		match fs {
			Filesystem::Local(c) => wire.osconfig = Some(c),
			Filesystem::S3(c) => wire.s3config = Some(c),
			Filesystem::Gcs(c) => wire.gcsconfig = Some(c),
			Filesystem::AzureBlob(c) => wire.azblobconfig = Some(c),
			Filesystem::Crypt(c) => wire.cryptconfig = Some(c),
			Filesystem::Sftp(c) => wire.sftpconfig = Some(c),
			Filesystem::Http(c) => wire.httpconfig = Some(c),
		}
		wire
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use sftpgo_kms::SecretStatus;

	#[test]
	fn only_the_selected_config_is_serialized() {
		let fs = Filesystem::S3(S3Config {
			bucket: "backups".to_string(),
			region: "eu-west-1".to_string(),
			access_secret: Some(KmsSecret::plain("secret")),
			..Default::default()
		});
		let value = serde_json::to_value(&fs).unwrap();
		assert_eq!(value["provider"], 1);
		assert_eq!(value["s3config"]["bucket"], "backups");
		assert_eq!(value["s3config"]["access_secret"]["status"], "Plain");
		for other in ["osconfig", "gcsconfig", "azblobconfig", "cryptconfig", "sftpconfig", "httpconfig"]
		{
			assert!(value.get(other).is_none(), "{other} should be absent");
		}
	}

	#[test]
	fn ignores_configs_of_other_providers() {
		let fs: Filesystem = serde_json::from_value(json!({
			"provider": 5,
			"s3config": {"bucket": "ignored"},
			"sftpconfig": {
				"endpoint": "sftp.example.com:22",
				"username": "mirror",
				"password": {"status": "AES-256-GCM", "payload": "enc", "additional_data": "mirror"},
				"fingerprints": ["SHA256:abc"]
			}
		}))
		.unwrap();

		match fs {
			Filesystem::Sftp(config) => {
				assert_eq!(config.endpoint, "sftp.example.com:22");
				assert_eq!(config.fingerprints, vec!["SHA256:abc".to_string()]);
				assert_eq!(
					config.password.unwrap().status,
					Some(SecretStatus::Aes256Gcm)
				);
			}
			other => panic!("unexpected filesystem {other:?}"),
		}
	}

	#[test]
	fn missing_sub_config_uses_defaults() {
		let fs: Filesystem = serde_json::from_value(json!({"provider": 2})).unwrap();
		assert_eq!(fs, Filesystem::Gcs(GcsConfig::default()));
		let fs: Filesystem = serde_json::from_value(json!({})).unwrap();
		assert_eq!(fs, Filesystem::default());
	}

	#[test]
	fn provider_constants_match_variants() {
		let cases = [
			(Filesystem::Local(OsConfig::default()), Filesystem::PROVIDER_LOCAL),
			(Filesystem::S3(S3Config::default()), Filesystem::PROVIDER_S3),
			(Filesystem::Gcs(GcsConfig::default()), Filesystem::PROVIDER_GCS),
			(Filesystem::AzureBlob(AzBlobConfig::default()), Filesystem::PROVIDER_AZURE_BLOB),
			(Filesystem::Crypt(CryptConfig::default()), Filesystem::PROVIDER_CRYPT),
			(Filesystem::Sftp(SftpFsConfig::default()), Filesystem::PROVIDER_SFTP),
			(Filesystem::Http(HttpFsConfig::default()), Filesystem::PROVIDER_HTTP),
		];
		for (fs, provider) in cases {
			assert_eq!(fs.provider(), provider);
			let value = serde_json::to_value(&fs).unwrap();
			assert_eq!(serde_json::from_value::<Filesystem>(value).unwrap(), fs);
		}
	}

	#[test]
	fn rejects_unknown_provider() {
		let err = serde_json::from_value::<Filesystem>(json!({"provider": 9})).unwrap_err();
		assert!(err.to_string().contains("invalid filesystem provider 9"));
	}
}
