// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};
use sftpgo_client::types::Role;
use tf_provider::{Block, Value};

use super::{replace_if_changed, ResourceModel};
use crate::convert::value::{computed, known, non_zero, string, IntValue, StringValue};
use crate::convert::{ApiModel, AttrPath, Result};
use crate::schema::BlockBuilder;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleModel {
	pub id: StringValue,
	pub numeric_id: IntValue,
	pub name: StringValue,
	pub description: StringValue,
	pub created_at: IntValue,
	pub updated_at: IntValue,
}

impl ApiModel for RoleModel {
	type Api = Role;

	fn to_api(&self, path: &AttrPath) -> Result<Role> {
		Ok(Role {
			id: computed(&self.numeric_id),
			name: string(&self.name, &path.attr("name"))?,
			description: string(&self.description, &path.attr("description"))?,
			created_at: computed(&self.created_at),
			updated_at: computed(&self.updated_at),
		})
	}

	fn from_api(api: &Role) -> Self {
		Self {
			id: known(&api.name),
			numeric_id: known(&api.id),
			name: known(&api.name),
			description: non_zero(&api.description),
			created_at: known(&api.created_at),
			updated_at: known(&api.updated_at),
		}
	}
}

impl ResourceModel for RoleModel {
	fn id(&self) -> &StringValue {
		&self.id
	}

	fn computed_unknown(&mut self) {
		self.id = self.name.clone();
		self.numeric_id = Value::Unknown;
		self.created_at = Value::Unknown;
		self.updated_at = Value::Unknown;
	}

	fn merge_computed(&mut self, server: &Self) {
		self.id = server.id.clone();
		self.numeric_id = server.numeric_id.clone();
		self.created_at = server.created_at.clone();
		self.updated_at = server.updated_at.clone();
	}

	fn mark_updated(&mut self) {
		self.updated_at = Value::Unknown;
	}

	fn requires_replace(&self, prior: &Self) -> Vec<AttrPath> {
		let mut paths = Vec::new();
		replace_if_changed(&mut paths, "name", &self.name, &prior.name);
		paths
	}
}

pub fn block() -> Block {
	BlockBuilder::new("An SFTPGo role. Admins with a role only manage users of that role.")
		.computed_string("id", "Same as `name`.")
		.computed_int("numeric_id", "Numeric id assigned by SFTPGo.")
		.required_string("name", "Unique role name.")
		.optional_string("description", "Free form description.")
		.computed_int("created_at", "Creation time, Unix milliseconds.")
		.computed_int("updated_at", "Last update time, Unix milliseconds.")
		.build()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn timestamps_are_always_materialized() {
		let model = RoleModel::from_api(&Role {
			name: "ops".to_string(),
			..Default::default()
		});
		assert_eq!(model.id, Value::Value("ops".to_string()));
		assert_eq!(model.description, Value::Null);
		assert_eq!(model.created_at, Value::Value(0));
		assert_eq!(model.updated_at, Value::Value(0));
	}

	#[test]
	fn create_plan_can_convert_with_unknown_timestamps() {
		let mut model = RoleModel::from_api(&Role {
			name: "ops".to_string(),
			description: "operators".to_string(),
			..Default::default()
		});
		model.computed_unknown();
		let api = model.to_api(&AttrPath::root()).unwrap();
		assert_eq!(api.name, "ops");
		assert_eq!(api.created_at, 0);
	}

	#[test]
	fn server_objects_round_trip_with_their_numeric_id() {
		let api = Role {
			id: 3,
			name: "ops".to_string(),
			description: "operators".to_string(),
			created_at: 1_700_000_000_000,
			updated_at: 1_700_000_100_000,
		};
		let model = RoleModel::from_api(&api);
		assert_eq!(model.numeric_id, Value::Value(3));
		assert_eq!(model.to_api(&AttrPath::root()).unwrap(), api);
	}

	#[test]
	fn renaming_forces_replacement() {
		let prior = RoleModel::from_api(&Role {
			name: "ops".to_string(),
			..Default::default()
		});
		let mut proposed = prior.clone();
		proposed.description = Value::Value("changed".to_string());
		assert!(proposed.requires_replace(&prior).is_empty());

		proposed.name = Value::Value("sre".to_string());
		let paths = proposed.requires_replace(&prior);
		assert_eq!(paths, [AttrPath::root().attr("name")]);
	}
}
