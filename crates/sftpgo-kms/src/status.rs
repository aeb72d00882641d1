// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How a secret payload is protected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecretStatus {
	Plain,
	Aes256Gcm,
	/// `AES256-GCM`, written by older SFTPGo releases. Kept apart from
	/// [`SecretStatus::Aes256Gcm`] so a decoded secret encodes back unchanged.
	Aes256GcmLegacy,
	Secretbox,
	Gcp,
	Aws,
	VaultTransit,
	AzureKeyVault,
	Redacted,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown secret status: {0}")]
pub struct UnknownStatus(pub String);

impl SecretStatus {
	pub const ALL: [SecretStatus; 9] = [
		SecretStatus::Plain,
		SecretStatus::Aes256Gcm,
		SecretStatus::Aes256GcmLegacy,
		SecretStatus::Secretbox,
		SecretStatus::Gcp,
		SecretStatus::Aws,
		SecretStatus::VaultTransit,
		SecretStatus::AzureKeyVault,
		SecretStatus::Redacted,
	];

	/// The label SFTPGo uses on the wire and in the encoded string form.
	pub fn as_str(&self) -> &'static str {
		match self {
			SecretStatus::Plain => "Plain",
			SecretStatus::Aes256Gcm => "AES-256-GCM",
			SecretStatus::Aes256GcmLegacy => "AES256-GCM",
			SecretStatus::Secretbox => "Secretbox",
			SecretStatus::Gcp => "GCP",
			SecretStatus::Aws => "AWS",
			SecretStatus::VaultTransit => "VaultTransit",
			SecretStatus::AzureKeyVault => "AzureKeyVault",
			SecretStatus::Redacted => "Redacted",
		}
	}

	pub fn is_plain(&self) -> bool {
		matches!(self, SecretStatus::Plain)
	}
}

impl fmt::Display for SecretStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for SecretStatus {
	type Err = UnknownStatus;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		SecretStatus::ALL
			.iter()
			.find(|status| status.as_str() == s)
			.copied()
			.ok_or_else(|| UnknownStatus(s.to_string()))
	}
}

impl Serialize for SecretStatus {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for SecretStatus {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let label = String::deserialize(deserializer)?;
		label.parse().map_err(serde::de::Error::custom)
	}
}

/// Serde adapter for an optional status where SFTPGo writes `""` for "none".
pub(crate) mod optional {
	use super::SecretStatus;
	use serde::{Deserialize, Deserializer, Serializer};

	pub fn serialize<S: Serializer>(
		status: &Option<SecretStatus>,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(status.map(|s| s.as_str()).unwrap_or(""))
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(
		deserializer: D,
	) -> Result<Option<SecretStatus>, D::Error> {
		let label = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
		if label.is_empty() {
			return Ok(None);
		}
		label.parse().map(Some).map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn labels_round_trip() {
		for status in SecretStatus::ALL {
			assert_eq!(status.as_str().parse::<SecretStatus>(), Ok(status));
		}
	}

	#[test]
	fn legacy_aes_label_keeps_its_spelling() {
		assert_eq!("AES256-GCM".parse(), Ok(SecretStatus::Aes256GcmLegacy));
		assert_eq!(SecretStatus::Aes256GcmLegacy.to_string(), "AES256-GCM");
		assert_eq!(SecretStatus::Aes256Gcm.to_string(), "AES-256-GCM");
	}

	#[test]
	fn rejects_unknown_and_case_variants() {
		assert!("plain".parse::<SecretStatus>().is_err());
		assert!("ROT13".parse::<SecretStatus>().is_err());
		assert!("".parse::<SecretStatus>().is_err());
	}
}
