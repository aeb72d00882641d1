// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret wrapper for credentials handled by the SFTPGo provider.
//!
//! [`Secret<T>`] hides its contents from `Debug` and `Display`, so a provider
//! password, an API key or a cached bearer token can travel through structs
//! that are logged with `tracing` without leaking. The inner value is zeroized
//! when the wrapper is dropped. Call [`Secret::expose`] at the point where the
//! plaintext is actually needed (building an HTTP header).

use std::fmt;

use zeroize::Zeroize;

/// Placeholder printed instead of a secret value.
pub const REDACTED: &str = "[REDACTED]";

/// A value that must never show up in logs or debug output.
pub struct Secret<T: Zeroize> {
	inner: T,
}

/// The common case: a secret string.
pub type SecretString = Secret<String>;

impl<T: Zeroize> Secret<T> {
	pub fn new(inner: T) -> Self {
		Self { inner }
	}

	/// Borrow the plaintext value.
	pub fn expose(&self) -> &T {
		&self.inner
	}
}

impl SecretString {
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}
}

impl<T: Zeroize> Drop for Secret<T> {
	fn drop(&mut self) {
		self.inner.zeroize();
	}
}

impl<T: Zeroize + Clone> Clone for Secret<T> {
	fn clone(&self) -> Self {
		Self::new(self.inner.clone())
	}
}

impl<T: Zeroize + PartialEq> PartialEq for Secret<T> {
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

impl<T: Zeroize + Eq> Eq for Secret<T> {}

impl<T: Zeroize> fmt::Debug for Secret<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl<T: Zeroize> fmt::Display for Secret<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		Self::new(value.to_string())
	}
}

#[cfg(feature = "serde")]
mod serde_impl {
	use super::{Secret, REDACTED};
	use serde::{Deserialize, Deserializer, Serialize, Serializer};
	use zeroize::Zeroize;

	impl<'de, T: Zeroize + Deserialize<'de>> Deserialize<'de> for Secret<T> {
		fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
			T::deserialize(deserializer).map(Secret::new)
		}
	}

	/// Serializing never writes the plaintext.
	impl<T: Zeroize> Serialize for Secret<T> {
		fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
			serializer.serialize_str(REDACTED)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn debug_and_display_are_redacted() {
		let secret = SecretString::new("hunter2".to_string());
		assert_eq!(format!("{secret:?}"), REDACTED);
		assert_eq!(format!("{secret}"), REDACTED);
		assert_eq!(secret.expose(), "hunter2");
	}

	#[test]
	fn redacted_inside_derived_debug() {
		#[derive(Debug)]
		#[allow(dead_code)]
		struct Credentials {
			username: String,
			password: SecretString,
		}

		let creds = Credentials {
			username: "admin".to_string(),
			password: SecretString::from("p4ss"),
		};
		let rendered = format!("{creds:?}");
		assert!(rendered.contains("admin"));
		assert!(!rendered.contains("p4ss"));
	}

	#[cfg(feature = "serde")]
	#[test]
	fn deserializes_plaintext_and_serializes_redacted() {
		let secret: SecretString = serde_json::from_str("\"api-key\"").unwrap();
		assert_eq!(secret.expose(), "api-key");
		assert_eq!(serde_json::to_string(&secret).unwrap(), "\"[REDACTED]\"");
	}

	proptest! {
		#[test]
		fn never_leaks_through_formatting(value in "[a-zA-Z0-9]{8,32}") {
			let secret = SecretString::new(value.clone());
			let debug = format!("{secret:?}");
			let display = format!("{secret}");
			prop_assert!(!debug.contains(&value));
			prop_assert!(!display.contains(&value));
			prop_assert_eq!(secret.expose(), &value);
		}
	}
}
