// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};
use sftpgo_client::types::{Admin, AdminFilters, AdminGroup, AdminGroupOptions, AdminPreferences};
use tf_provider::{Block, Value};

use super::{replace_if_changed, ResourceModel};
use crate::convert::value::{
	blocks, computed, flag, int, known, list, non_empty, non_zero, non_zero_object, object, string,
	strings, BoolValue, IntValue, StringList, StringValue,
};
use crate::convert::{ApiModel, AttrPath, Result};
use crate::schema::BlockBuilder;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminModel {
	pub id: StringValue,
	pub numeric_id: IntValue,
	pub status: IntValue,
	pub username: StringValue,
	pub password: StringValue,
	pub email: StringValue,
	pub permissions: StringList,
	pub filters: Value<AdminFiltersModel>,
	pub description: StringValue,
	pub additional_info: StringValue,
	pub groups: Value<Vec<AdminGroupModel>>,
	pub role: StringValue,
	pub created_at: IntValue,
	pub updated_at: IntValue,
	pub last_login: IntValue,
}

impl ApiModel for AdminModel {
	type Api = Admin;

	fn to_api(&self, path: &AttrPath) -> Result<Admin> {
		let password = string(&self.password, &path.attr("password"))?;
		Ok(Admin {
			id: computed(&self.numeric_id),
			status: int(&self.status, &path.attr("status"))?,
			username: string(&self.username, &path.attr("username"))?,
			password: (!password.is_empty()).then_some(password),
			email: string(&self.email, &path.attr("email"))?,
			permissions: strings(&self.permissions, &path.attr("permissions"))?,
			filters: object(&self.filters, &path.attr("filters"))?,
			description: string(&self.description, &path.attr("description"))?,
			additional_info: string(&self.additional_info, &path.attr("additional_info"))?,
			groups: list(&self.groups, &path.attr("groups"))?,
			role: string(&self.role, &path.attr("role"))?,
			created_at: computed(&self.created_at),
			updated_at: computed(&self.updated_at),
			last_login: computed(&self.last_login),
		})
	}

	fn from_api(api: &Admin) -> Self {
		Self {
			id: known(&api.username),
			numeric_id: known(&api.id),
			status: known(&api.status),
			username: known(&api.username),
			password: Value::Null,
			email: non_zero(&api.email),
			permissions: non_empty(&api.permissions),
			filters: non_zero_object(&api.filters),
			description: non_zero(&api.description),
			additional_info: non_zero(&api.additional_info),
			groups: blocks(&api.groups),
			role: non_zero(&api.role),
			created_at: known(&api.created_at),
			updated_at: known(&api.updated_at),
			last_login: known(&api.last_login),
		}
	}
}

impl ResourceModel for AdminModel {
	fn id(&self) -> &StringValue {
		&self.id
	}

	fn computed_unknown(&mut self) {
		self.id = self.username.clone();
		self.numeric_id = Value::Unknown;
		self.created_at = Value::Unknown;
		self.updated_at = Value::Unknown;
		self.last_login = Value::Unknown;
	}

	fn merge_computed(&mut self, server: &Self) {
		self.id = server.id.clone();
		self.numeric_id = server.numeric_id.clone();
		self.created_at = server.created_at.clone();
		self.updated_at = server.updated_at.clone();
		self.last_login = server.last_login.clone();
	}

	fn merge_secrets(&mut self, desired: &Self) {
		self.password = desired.password.clone();
	}

	fn mark_updated(&mut self) {
		self.updated_at = Value::Unknown;
	}

	fn requires_replace(&self, prior: &Self) -> Vec<AttrPath> {
		let mut paths = Vec::new();
		replace_if_changed(&mut paths, "username", &self.username, &prior.username);
		paths
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminFiltersModel {
	pub allow_list: StringList,
	pub allow_api_key_auth: BoolValue,
	pub require_two_factor: BoolValue,
	pub require_password_change: BoolValue,
	pub preferences: Value<AdminPreferencesModel>,
}

impl ApiModel for AdminFiltersModel {
	type Api = AdminFilters;

	fn to_api(&self, path: &AttrPath) -> Result<AdminFilters> {
		Ok(AdminFilters {
			allow_list: strings(&self.allow_list, &path.attr("allow_list"))?,
			allow_api_key_auth: flag(&self.allow_api_key_auth, &path.attr("allow_api_key_auth"))?,
			require_two_factor: flag(&self.require_two_factor, &path.attr("require_two_factor"))?,
			require_password_change: flag(
				&self.require_password_change,
				&path.attr("require_password_change"),
			)?,
			preferences: object(&self.preferences, &path.attr("preferences"))?,
		})
	}

	fn from_api(api: &AdminFilters) -> Self {
		Self {
			allow_list: non_empty(&api.allow_list),
			allow_api_key_auth: non_zero(&api.allow_api_key_auth),
			require_two_factor: non_zero(&api.require_two_factor),
			require_password_change: non_zero(&api.require_password_change),
			preferences: non_zero_object(&api.preferences),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminPreferencesModel {
	pub hide_user_page_sections: IntValue,
	pub default_users_expiration: IntValue,
}

impl ApiModel for AdminPreferencesModel {
	type Api = AdminPreferences;

	fn to_api(&self, path: &AttrPath) -> Result<AdminPreferences> {
		Ok(AdminPreferences {
			hide_user_page_sections: int(
				&self.hide_user_page_sections,
				&path.attr("hide_user_page_sections"),
			)?,
			default_users_expiration: int(
				&self.default_users_expiration,
				&path.attr("default_users_expiration"),
			)?,
		})
	}

	fn from_api(api: &AdminPreferences) -> Self {
		Self {
			hide_user_page_sections: non_zero(&api.hide_user_page_sections),
			default_users_expiration: non_zero(&api.default_users_expiration),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminGroupModel {
	pub name: StringValue,
	pub options: Value<AdminGroupOptionsModel>,
}

impl ApiModel for AdminGroupModel {
	type Api = AdminGroup;

	fn to_api(&self, path: &AttrPath) -> Result<AdminGroup> {
		Ok(AdminGroup {
			name: string(&self.name, &path.attr("name"))?,
			options: object(&self.options, &path.attr("options"))?,
		})
	}

	fn from_api(api: &AdminGroup) -> Self {
		Self {
			name: non_zero(&api.name),
			options: non_zero_object(&api.options),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminGroupOptionsModel {
	pub add_to_users_as: IntValue,
}

impl ApiModel for AdminGroupOptionsModel {
	type Api = AdminGroupOptions;

	fn to_api(&self, path: &AttrPath) -> Result<AdminGroupOptions> {
		Ok(AdminGroupOptions {
			add_to_users_as: int(&self.add_to_users_as, &path.attr("add_to_users_as"))?,
		})
	}

	fn from_api(api: &AdminGroupOptions) -> Self {
		Self {
			add_to_users_as: non_zero(&api.add_to_users_as),
		}
	}
}

pub fn block() -> Block {
	BlockBuilder::new("An SFTPGo administrator.")
		.computed_string("id", "Same as `username`.")
		.computed_int("numeric_id", "Numeric id assigned by SFTPGo.")
		.required_int("status", "1 enabled, 0 disabled.")
		.required_string("username", "Unique username.")
		.secret("password", "Login password. SFTPGo stores a hash and never returns it.")
		.optional_string("email", "Contact email.")
		.optional_strings("permissions", "Admin permissions, e.g. `*` or `add_users`.")
		.optional_string("description", "Free form description.")
		.optional_string("additional_info", "Free form text for integrations.")
		.optional_string("role", "Restricts the admin to users of this role.")
		.computed_int("created_at", "Creation time, Unix milliseconds.")
		.computed_int("updated_at", "Last update time, Unix milliseconds.")
		.computed_int("last_login", "Last login, Unix milliseconds.")
		.single(
			"filters",
			BlockBuilder::new("Login restrictions.")
				.optional_strings("allow_list", "Networks allowed to log in, in CIDR notation.")
				.optional_bool("allow_api_key_auth", "Allow API key authentication.")
				.optional_bool("require_two_factor", "Require two-factor authentication.")
				.optional_bool("require_password_change", "Force a password change at next login.")
				.single(
					"preferences",
					BlockBuilder::new("WebAdmin preferences.")
						.optional_int("hide_user_page_sections", "Bit mask of user page sections to hide.")
						.optional_int("default_users_expiration", "Default expiration for new users, in days.")
						.build(),
				)
				.build(),
		)
		.list(
			"groups",
			BlockBuilder::new("Groups suggested when this admin creates users.")
				.required_string("name", "Group name.")
				.single(
					"options",
					BlockBuilder::new("Group options.")
						.optional_int("add_to_users_as", "0 primary, 1 secondary, 2 membership.")
						.build(),
				)
				.build(),
		)
		.build()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn round_trips_nested_admin_blocks() {
		let api = Admin {
			id: 4,
			status: 1,
			username: "root".to_string(),
			permissions: vec!["*".to_string()],
			filters: AdminFilters {
				allow_list: vec!["10.0.0.0/8".to_string()],
				preferences: AdminPreferences {
					default_users_expiration: 30,
					..Default::default()
				},
				..Default::default()
			},
			groups: vec![AdminGroup {
				name: "staff".to_string(),
				options: AdminGroupOptions { add_to_users_as: 1 },
			}],
			created_at: 5,
			updated_at: 6,
			..Default::default()
		};
		let model = AdminModel::from_api(&api);
		assert_eq!(model.to_api(&AttrPath::root()).unwrap(), api);
	}

	#[test]
	fn primary_group_option_reads_back_as_null() {
		let model = AdminGroupModel::from_api(&AdminGroup {
			name: "staff".to_string(),
			options: AdminGroupOptions { add_to_users_as: 0 },
		});
		assert_eq!(model.options, Value::Null);
	}

	#[test]
	fn password_is_write_only() {
		let mut desired = AdminModel::from_api(&Admin {
			username: "root".to_string(),
			status: 1,
			..Default::default()
		});
		desired.password = Value::Value("pw".to_string());

		let mut server = AdminModel::from_api(&Admin {
			username: "root".to_string(),
			status: 1,
			..Default::default()
		});
		assert_eq!(server.password, Value::Null);
		server.merge_secrets(&desired);
		assert_eq!(server, desired);
	}
}
