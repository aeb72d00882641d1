// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::fmt;

use serde::{Deserialize, Serialize};

use super::InvalidDiscriminant;

/// Which list an entry belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum IpListType {
	#[default]
	AllowList,
	Defender,
	RateLimiterSafeList,
}

impl TryFrom<i64> for IpListType {
	type Error = InvalidDiscriminant;

	fn try_from(value: i64) -> Result<Self, Self::Error> {
		match value {
			1 => Ok(IpListType::AllowList),
			2 => Ok(IpListType::Defender),
			3 => Ok(IpListType::RateLimiterSafeList),
			value => Err(InvalidDiscriminant {
				field: "IP list type",
				value,
			}),
		}
	}
}

impl From<IpListType> for i64 {
	fn from(value: IpListType) -> Self {
		match value {
			IpListType::AllowList => 1,
			IpListType::Defender => 2,
			IpListType::RateLimiterSafeList => 3,
		}
	}
}

impl fmt::Display for IpListType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", i64::from(*self))
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum IpListMode {
	#[default]
	Allow,
	Deny,
}

impl TryFrom<i64> for IpListMode {
	type Error = InvalidDiscriminant;

	fn try_from(value: i64) -> Result<Self, Self::Error> {
		match value {
			1 => Ok(IpListMode::Allow),
			2 => Ok(IpListMode::Deny),
			value => Err(InvalidDiscriminant {
				field: "IP list mode",
				value,
			}),
		}
	}
}

impl From<IpListMode> for i64 {
	fn from(value: IpListMode) -> Self {
		match value {
			IpListMode::Allow => 1,
			IpListMode::Deny => 2,
		}
	}
}

/// An IP address or CIDR network in one of the IP lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpListEntry {
	pub ipornet: String,
	pub description: String,
	#[serde(rename = "type")]
	pub list_type: IpListType,
	pub mode: IpListMode,
	/// Bit mask: 1 SSH, 2 FTP, 4 WebDAV, 8 HTTP. 0 means every protocol.
	pub protocols: i64,
	pub created_at: i64,
	pub updated_at: i64,
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn discriminants_use_api_numbers() {
		let entry = IpListEntry {
			ipornet: "10.0.0.0/8".to_string(),
			list_type: IpListType::Defender,
			mode: IpListMode::Deny,
			..Default::default()
		};
		let value = serde_json::to_value(&entry).unwrap();
		assert_eq!(value["type"], 2);
		assert_eq!(value["mode"], 2);
	}

	#[test]
	fn rejects_out_of_range_type() {
		let err = serde_json::from_value::<IpListEntry>(json!({"type": 4})).unwrap_err();
		assert!(err.to_string().contains("invalid IP list type 4"));
	}
}
