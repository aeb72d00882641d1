// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! IP list entries. An entry is identified by its list type and network, so
//! the Terraform id is `<type>_<ipornet>`, e.g. `2_192.168.0.0/24`.

use serde::{Deserialize, Serialize};
use sftpgo_client::types::{IpListEntry, IpListMode, IpListType};
use tf_provider::{Block, Value};

use super::{replace_if_changed, ResourceModel};
use crate::convert::value::{
	computed, int, known, known_int, known_str, non_zero, string, IntValue, StringValue,
};
use crate::convert::{
	check_discriminant, discriminant_error, ApiModel, AttrPath, ConvertError, ConvertErrorKind,
	Result,
};
use crate::schema::BlockBuilder;

const TYPE_MIN: i64 = 1;
const TYPE_MAX: i64 = 3;
const MODE_MIN: i64 = 1;
const MODE_MAX: i64 = 2;

/// Formats the Terraform id of an entry.
pub fn entry_id(list_type: IpListType, ipornet: &str) -> String {
	format!("{list_type}_{ipornet}")
}

/// Splits an id produced by [`entry_id`].
pub fn parse_entry_id(id: &str) -> std::result::Result<(IpListType, String), ConvertError> {
	let invalid = || {
		ConvertError::new(
			&AttrPath::root().attr("id"),
			ConvertErrorKind::Invalid(format!(
				"expected `<type>_<ipornet>` such as `1_10.0.0.0/8`, got {id:?}"
			)),
		)
	};
	let (list_type, ipornet) = id.split_once('_').ok_or_else(invalid)?;
	let list_type: i64 = list_type.parse().map_err(|_| invalid())?;
	let list_type = IpListType::try_from(list_type).map_err(|_| invalid())?;
	if ipornet.is_empty() {
		return Err(invalid());
	}
	Ok((list_type, ipornet.to_string()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpListEntryModel {
	pub id: StringValue,
	pub ipornet: StringValue,
	pub description: StringValue,
	#[serde(rename = "type")]
	pub list_type: IntValue,
	pub mode: IntValue,
	pub protocols: IntValue,
	pub created_at: IntValue,
	pub updated_at: IntValue,
}

impl ApiModel for IpListEntryModel {
	type Api = IpListEntry;

	fn to_api(&self, path: &AttrPath) -> Result<IpListEntry> {
		let type_path = path.attr("type");
		let list_type = int(&self.list_type, &type_path)?;
		let list_type = IpListType::try_from(list_type).map_err(|_| {
			discriminant_error(&type_path, "IP list type", list_type, TYPE_MIN, TYPE_MAX)
		})?;
		let mode_path = path.attr("mode");
		let mode = int(&self.mode, &mode_path)?;
		let mode = IpListMode::try_from(mode)
			.map_err(|_| discriminant_error(&mode_path, "IP list mode", mode, MODE_MIN, MODE_MAX))?;

		Ok(IpListEntry {
			ipornet: string(&self.ipornet, &path.attr("ipornet"))?,
			description: string(&self.description, &path.attr("description"))?,
			list_type,
			mode,
			protocols: int(&self.protocols, &path.attr("protocols"))?,
			created_at: computed(&self.created_at),
			updated_at: computed(&self.updated_at),
		})
	}

	fn from_api(api: &IpListEntry) -> Self {
		Self {
			id: Value::Value(entry_id(api.list_type, &api.ipornet)),
			ipornet: known(&api.ipornet),
			description: non_zero(&api.description),
			list_type: known(&i64::from(api.list_type)),
			mode: known(&i64::from(api.mode)),
			protocols: non_zero(&api.protocols),
			created_at: known(&api.created_at),
			updated_at: known(&api.updated_at),
		}
	}
}

impl ResourceModel for IpListEntryModel {
	fn id(&self) -> &StringValue {
		&self.id
	}

	fn computed_unknown(&mut self) {
		self.id = match (known_int(&self.list_type), known_str(&self.ipornet)) {
			(Some(list_type), Some(ipornet)) => match IpListType::try_from(list_type) {
				Ok(list_type) => Value::Value(entry_id(list_type, ipornet)),
				Err(_) => Value::Unknown,
			},
			_ => Value::Unknown,
		};
		self.created_at = Value::Unknown;
		self.updated_at = Value::Unknown;
	}

	fn merge_computed(&mut self, server: &Self) {
		self.id = server.id.clone();
		self.created_at = server.created_at.clone();
		self.updated_at = server.updated_at.clone();
	}

	fn mark_updated(&mut self) {
		self.updated_at = Value::Unknown;
	}

	fn requires_replace(&self, prior: &Self) -> Vec<AttrPath> {
		let mut paths = Vec::new();
		replace_if_changed(&mut paths, "type", &self.list_type, &prior.list_type);
		replace_if_changed(&mut paths, "ipornet", &self.ipornet, &prior.ipornet);
		paths
	}

	fn validate(&self) -> Vec<ConvertError> {
		let root = AttrPath::root();
		let checks = [
			(&self.list_type, "type", "IP list type", TYPE_MIN, TYPE_MAX),
			(&self.mode, "mode", "IP list mode", MODE_MIN, MODE_MAX),
		];
		checks
			.into_iter()
			.filter_map(|(value, name, field, min, max)| {
				let value = known_int(value)?;
				check_discriminant(value, &root.attr(name), field, min, max).err()
			})
			.collect()
	}
}

pub fn block() -> Block {
	BlockBuilder::new("An entry of one of the SFTPGo IP lists.")
		.computed_string("id", "`<type>_<ipornet>`.")
		.required_int("type", "1 allow list, 2 defender, 3 rate limiter safe list.")
		.required_string("ipornet", "IP address or network in CIDR notation.")
		.required_int("mode", "1 allow, 2 deny. The defender list only supports deny.")
		.optional_string("description", "Free form description.")
		.optional_int("protocols", "Bit mask: 1 SSH, 2 FTP, 4 WebDAV, 8 HTTP. 0 means all.")
		.computed_int("created_at", "Creation time, Unix milliseconds.")
		.computed_int("updated_at", "Last update time, Unix milliseconds.")
		.build()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn id_combines_type_and_network() {
		let model = IpListEntryModel::from_api(&IpListEntry {
			ipornet: "192.168.0.0/24".to_string(),
			list_type: IpListType::Defender,
			mode: IpListMode::Deny,
			..Default::default()
		});
		assert_eq!(model.id, Value::Value("2_192.168.0.0/24".to_string()));
		assert_eq!(model.list_type, Value::Value(2));
		assert_eq!(model.mode, Value::Value(2));
		assert_eq!(model.protocols, Value::Null);

		let (list_type, ipornet) = parse_entry_id("2_192.168.0.0/24").unwrap();
		assert_eq!(list_type, IpListType::Defender);
		assert_eq!(ipornet, "192.168.0.0/24");
	}

	#[test]
	fn rejects_malformed_ids() {
		for id in ["", "10.0.0.1", "x_10.0.0.1", "4_10.0.0.1", "1_"] {
			assert!(parse_entry_id(id).is_err(), "{id:?} should be rejected");
		}
	}

	#[test]
	fn out_of_range_discriminants() {
		let mut model = IpListEntryModel::from_api(&IpListEntry {
			ipornet: "10.0.0.1".to_string(),
			..Default::default()
		});
		model.list_type = Value::Value(4);
		model.mode = Value::Value(0);

		let messages: Vec<String> = model.validate().iter().map(|e| e.to_string()).collect();
		assert_eq!(
			messages,
			[
				"type: invalid IP list type 4, expected 1 to 3",
				"mode: invalid IP list mode 0, expected 1 to 2"
			]
		);
		assert!(model.to_api(&AttrPath::root()).is_err());
	}

	#[test]
	fn plan_knows_the_id_up_front() {
		let mut model = IpListEntryModel::from_api(&IpListEntry {
			ipornet: "10.0.0.1".to_string(),
			list_type: IpListType::RateLimiterSafeList,
			..Default::default()
		});
		model.id = Value::Null;
		model.computed_unknown();
		assert_eq!(model.id, Value::Value("3_10.0.0.1".to_string()));
		assert_eq!(model.created_at, Value::Unknown);
	}
}
