// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Permission maps: `path -> [perm]` in the API, `path -> "p1,p2"` in
//! Terraform. The comma is the only separator and the order is kept.

use std::collections::BTreeMap;

use sftpgo_client::types::Permissions;
use tf_provider::Value;

use super::value::{element, StringMap};
use super::{collect_all, AttrPath, ConvertError, Result};

pub fn split(joined: &str) -> Vec<String> {
	if joined.is_empty() {
		Vec::new()
	} else {
		joined.split(',').map(str::to_string).collect()
	}
}

pub fn join(perms: &[String]) -> String {
	perms.join(",")
}

pub fn to_api(value: &StringMap, path: &AttrPath) -> Result<Permissions> {
	match value {
		Value::Value(map) => {
			let entries = collect_all(map.iter().map(|(dir, perms)| {
				element(perms, &path.key(dir.as_str())).map(|p| (dir.clone(), split(&p)))
			}))?;
			Ok(entries.into_iter().collect())
		}
		Value::Null => Ok(Permissions::new()),
		Value::Unknown => Err(ConvertError::unknown(path).into()),
	}
}

pub fn from_api(perms: &Permissions) -> StringMap {
	if perms.is_empty() {
		return Value::Null;
	}
	Value::Value(
		perms
			.iter()
			.map(|(dir, p)| (dir.clone(), Value::Value(join(p))))
			.collect::<BTreeMap<_, _>>(),
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn api(entries: Vec<(&str, Vec<&str>)>) -> Permissions {
		entries
			.into_iter()
			.map(|(k, v)| (k.to_string(), v.into_iter().map(String::from).collect()))
			.collect()
	}

	#[test]
	fn joins_and_splits_in_order() {
		let perms = api(vec![("/", vec!["*"]), ("/p1", vec!["list", "download"])]);
		let attrs = from_api(&perms);
		let Value::Value(map) = &attrs else {
			panic!("expected a map");
		};
		assert_eq!(map["/"], Value::Value("*".to_string()));
		assert_eq!(map["/p1"], Value::Value("list,download".to_string()));
		assert_eq!(to_api(&attrs, &AttrPath::root()).unwrap(), perms);
	}

	#[test]
	fn does_not_trim_around_commas() {
		assert_eq!(split("list, upload"), vec!["list", " upload"]);
	}

	#[test]
	fn empty_map_is_null() {
		assert_eq!(from_api(&Permissions::new()), Value::Null);
		assert!(to_api(&Value::Null, &AttrPath::root()).unwrap().is_empty());
	}

	#[test]
	fn unknown_entry_points_at_its_key() {
		let attrs: StringMap = Value::Value(BTreeMap::from([(
			"/in".to_string(),
			Value::Unknown,
		)]));
		let err = to_api(&attrs, &AttrPath::root().attr("permissions")).unwrap_err();
		assert_eq!(err.to_string(), "permissions[\"/in\"]: value is not known yet");
	}

	proptest! {
		#[test]
		fn round_trips(perms in prop::collection::btree_map(
			"/[a-z]{0,8}",
			prop::collection::vec("[a-z_*]{1,12}", 1..5),
			0..5,
		)) {
			let back = to_api(&from_api(&perms), &AttrPath::root()).unwrap();
			prop_assert_eq!(back, perms);
		}
	}
}
