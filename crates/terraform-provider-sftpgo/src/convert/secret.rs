// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Secret attributes hold the single-string KMS form.

use sftpgo_kms::KmsSecret;
use tf_provider::Value;

use super::value::StringValue;
use super::{AttrPath, ConvertError, Result};

/// Null and `""` both mean "no secret".
pub fn to_api(value: &StringValue, path: &AttrPath) -> Result<Option<KmsSecret>> {
	match value {
		Value::Value(s) if s.is_empty() => Ok(None),
		Value::Value(s) => Ok(Some(sftpgo_kms::decode(s))),
		Value::Null => Ok(None),
		Value::Unknown => Err(ConvertError::unknown(path).into()),
	}
}

pub fn from_api(secret: &Option<KmsSecret>) -> StringValue {
	match secret.as_ref().map(sftpgo_kms::encode) {
		Some(encoded) if !encoded.is_empty() => Value::Value(encoded),
		_ => Value::Null,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use sftpgo_kms::SecretStatus;

	#[test]
	fn plaintext_becomes_plain_secret() {
		let secret = to_api(&Value::Value("hunter2".to_string()), &AttrPath::root()).unwrap();
		assert_eq!(secret, Some(KmsSecret::plain("hunter2")));
	}

	#[test]
	fn encrypted_form_survives_a_round_trip() {
		let server = Some(KmsSecret::new(SecretStatus::Aes256Gcm, "", "alice", "cipher"));
		let attr = from_api(&server);
		assert_eq!(attr, Value::Value("$AES-256-GCM$$5$alicecipher".to_string()));
		assert_eq!(to_api(&attr, &AttrPath::root()).unwrap(), server);
	}

	#[test]
	fn empty_forms_are_no_secret() {
		assert_eq!(to_api(&Value::Null, &AttrPath::root()).unwrap(), None);
		assert_eq!(to_api(&Value::Value(String::new()), &AttrPath::root()).unwrap(), None);
		assert_eq!(from_api(&None), Value::Null);
		assert_eq!(from_api(&Some(KmsSecret::default())), Value::Null);
	}
}
