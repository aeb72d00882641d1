// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

use crate::status::{self, SecretStatus};

/// A secret as exchanged with the SFTPGo REST API.
///
/// A `None` status means no secret is set. Empty fields are omitted from the
/// JSON form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KmsSecret {
	#[serde(
		default,
		with = "status::optional",
		skip_serializing_if = "Option::is_none"
	)]
	pub status: Option<SecretStatus>,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub payload: String,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub key: String,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub additional_data: String,
}

impl KmsSecret {
	/// A secret SFTPGo will encrypt on write.
	pub fn plain(payload: impl Into<String>) -> Self {
		Self {
			status: Some(SecretStatus::Plain),
			payload: payload.into(),
			..Self::default()
		}
	}

	pub fn new(
		status: SecretStatus,
		key: impl Into<String>,
		additional_data: impl Into<String>,
		payload: impl Into<String>,
	) -> Self {
		Self {
			status: Some(status),
			payload: payload.into(),
			key: key.into(),
			additional_data: additional_data.into(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.status.is_none()
	}

	pub fn is_plain(&self) -> bool {
		self.status.is_some_and(|s| s.is_plain())
	}
}
