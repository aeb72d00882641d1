// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};
use sftpgo_client::types::{
	ConditionOptions, ConditionPattern, EventConditions, EventRule, RuleAction, RuleActionOptions,
	Schedule,
};
use tf_provider::{Block, Value};

use super::{replace_if_changed, ResourceModel};
use crate::convert::value::{
	blocks, computed, flag, int, ints, known, list, non_empty, non_zero, non_zero_object, object,
	string, strings, BoolValue, IntList, IntValue, StringList, StringValue,
};
use crate::convert::{ApiModel, AttrPath, Result};
use crate::schema::BlockBuilder;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRuleModel {
	pub id: StringValue,
	pub numeric_id: IntValue,
	pub name: StringValue,
	pub status: IntValue,
	pub description: StringValue,
	pub created_at: IntValue,
	pub updated_at: IntValue,
	pub trigger: IntValue,
	pub conditions: Value<EventConditionsModel>,
	pub actions: Value<Vec<RuleActionModel>>,
}

impl ApiModel for EventRuleModel {
	type Api = EventRule;

	fn to_api(&self, path: &AttrPath) -> Result<EventRule> {
		Ok(EventRule {
			id: computed(&self.numeric_id),
			name: string(&self.name, &path.attr("name"))?,
			status: int(&self.status, &path.attr("status"))?,
			description: string(&self.description, &path.attr("description"))?,
			created_at: computed(&self.created_at),
			updated_at: computed(&self.updated_at),
			trigger: int(&self.trigger, &path.attr("trigger"))?,
			conditions: object(&self.conditions, &path.attr("conditions"))?,
			actions: list(&self.actions, &path.attr("actions"))?,
		})
	}

	fn from_api(api: &EventRule) -> Self {
		Self {
			id: known(&api.name),
			numeric_id: known(&api.id),
			name: known(&api.name),
			status: known(&api.status),
			description: non_zero(&api.description),
			created_at: known(&api.created_at),
			updated_at: known(&api.updated_at),
			trigger: known(&api.trigger),
			conditions: non_zero_object(&api.conditions),
			actions: blocks(&api.actions),
		}
	}
}

impl ResourceModel for EventRuleModel {
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventConditionsModel {
	pub fs_events: StringList,
	pub provider_events: StringList,
	pub schedules: Value<Vec<ScheduleModel>>,
	pub idp_login_event: IntValue,
	pub options: Value<ConditionOptionsModel>,
}

impl ApiModel for EventConditionsModel {
	type Api = EventConditions;

	fn to_api(&self, path: &AttrPath) -> Result<EventConditions> {
		Ok(EventConditions {
			fs_events: strings(&self.fs_events, &path.attr("fs_events"))?,
			provider_events: strings(&self.provider_events, &path.attr("provider_events"))?,
			schedules: list(&self.schedules, &path.attr("schedules"))?,
			idp_login_event: int(&self.idp_login_event, &path.attr("idp_login_event"))?,
			options: object(&self.options, &path.attr("options"))?,
		})
	}

	fn from_api(api: &EventConditions) -> Self {
		Self {
			fs_events: non_empty(&api.fs_events),
			provider_events: non_empty(&api.provider_events),
			schedules: blocks(&api.schedules),
			idp_login_event: non_zero(&api.idp_login_event),
			options: non_zero_object(&api.options),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleModel {
	pub hour: StringValue,
	pub day_of_week: StringValue,
	pub day_of_month: StringValue,
	pub month: StringValue,
}

impl ApiModel for ScheduleModel {
	type Api = Schedule;

	fn to_api(&self, path: &AttrPath) -> Result<Schedule> {
		Ok(Schedule {
			hour: string(&self.hour, &path.attr("hour"))?,
			day_of_week: string(&self.day_of_week, &path.attr("day_of_week"))?,
			day_of_month: string(&self.day_of_month, &path.attr("day_of_month"))?,
			month: string(&self.month, &path.attr("month"))?,
		})
	}

	fn from_api(api: &Schedule) -> Self {
		Self {
			hour: non_zero(&api.hour),
			day_of_week: non_zero(&api.day_of_week),
			day_of_month: non_zero(&api.day_of_month),
			month: non_zero(&api.month),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionOptionsModel {
	pub names: Value<Vec<ConditionPatternModel>>,
	pub group_names: Value<Vec<ConditionPatternModel>>,
	pub role_names: Value<Vec<ConditionPatternModel>>,
	pub fs_paths: Value<Vec<ConditionPatternModel>>,
	pub protocols: StringList,
	pub event_statuses: IntList,
	pub provider_objects: StringList,
	pub min_file_size: IntValue,
	pub max_file_size: IntValue,
	pub concurrent_execution: BoolValue,
}

impl ApiModel for ConditionOptionsModel {
	type Api = ConditionOptions;

	fn to_api(&self, path: &AttrPath) -> Result<ConditionOptions> {
		Ok(ConditionOptions {
			names: list(&self.names, &path.attr("names"))?,
			group_names: list(&self.group_names, &path.attr("group_names"))?,
			role_names: list(&self.role_names, &path.attr("role_names"))?,
			fs_paths: list(&self.fs_paths, &path.attr("fs_paths"))?,
			protocols: strings(&self.protocols, &path.attr("protocols"))?,
			event_statuses: ints(&self.event_statuses, &path.attr("event_statuses"))?,
			provider_objects: strings(&self.provider_objects, &path.attr("provider_objects"))?,
			min_file_size: int(&self.min_file_size, &path.attr("min_file_size"))?,
			max_file_size: int(&self.max_file_size, &path.attr("max_file_size"))?,
			concurrent_execution: flag(&self.concurrent_execution, &path.attr("concurrent_execution"))?,
		})
	}

	fn from_api(api: &ConditionOptions) -> Self {
		Self {
			names: blocks(&api.names),
			group_names: blocks(&api.group_names),
			role_names: blocks(&api.role_names),
			fs_paths: blocks(&api.fs_paths),
			protocols: non_empty(&api.protocols),
			event_statuses: non_empty(&api.event_statuses),
			provider_objects: non_empty(&api.provider_objects),
			min_file_size: non_zero(&api.min_file_size),
			max_file_size: non_zero(&api.max_file_size),
			concurrent_execution: non_zero(&api.concurrent_execution),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionPatternModel {
	pub pattern: StringValue,
	pub inverse_match: BoolValue,
}

impl ApiModel for ConditionPatternModel {
	type Api = ConditionPattern;

	fn to_api(&self, path: &AttrPath) -> Result<ConditionPattern> {
		Ok(ConditionPattern {
			pattern: string(&self.pattern, &path.attr("pattern"))?,
			inverse_match: flag(&self.inverse_match, &path.attr("inverse_match"))?,
		})
	}

	fn from_api(api: &ConditionPattern) -> Self {
		Self {
			pattern: non_zero(&api.pattern),
			inverse_match: non_zero(&api.inverse_match),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleActionModel {
	pub name: StringValue,
	pub order: IntValue,
	pub options: Value<RuleActionOptionsModel>,
}

impl ApiModel for RuleActionModel {
	type Api = RuleAction;

	fn to_api(&self, path: &AttrPath) -> Result<RuleAction> {
		Ok(RuleAction {
			name: string(&self.name, &path.attr("name"))?,
			order: int(&self.order, &path.attr("order"))?,
			options: object(&self.options, &path.attr("options"))?,
		})
	}

	fn from_api(api: &RuleAction) -> Self {
		Self {
			name: non_zero(&api.name),
			order: non_zero(&api.order),
			options: non_zero_object(&api.options),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleActionOptionsModel {
	pub is_failure_action: BoolValue,
	pub stop_on_failure: BoolValue,
	pub execute_sync: BoolValue,
}

impl ApiModel for RuleActionOptionsModel {
	type Api = RuleActionOptions;

	fn to_api(&self, path: &AttrPath) -> Result<RuleActionOptions> {
		Ok(RuleActionOptions {
			is_failure_action: flag(&self.is_failure_action, &path.attr("is_failure_action"))?,
			stop_on_failure: flag(&self.stop_on_failure, &path.attr("stop_on_failure"))?,
			execute_sync: flag(&self.execute_sync, &path.attr("execute_sync"))?,
		})
	}

	fn from_api(api: &RuleActionOptions) -> Self {
		Self {
			is_failure_action: non_zero(&api.is_failure_action),
			stop_on_failure: non_zero(&api.stop_on_failure),
			execute_sync: non_zero(&api.execute_sync),
		}
	}
}

fn pattern_block(description: &str) -> Block {
	BlockBuilder::new(description)
		.required_string("pattern", "Shell-like pattern, e.g. `user*`.")
		.optional_bool("inverse_match", "Match when the pattern does not.")
		.build()
}

pub fn block() -> Block {
	let options = BlockBuilder::new("Filters narrowing when the rule fires.")
		.optional_strings("protocols", "Protocols, e.g. `SFTP`, `HTTP`.")
		.optional_ints("event_statuses", "1 ok, 2 failed, 3 quota exceeded.")
		.optional_strings("provider_objects", "Object types for provider events, e.g. `user`.")
		.optional_int("min_file_size", "Minimum file size in bytes.")
		.optional_int("max_file_size", "Maximum file size in bytes.")
		.optional_bool("concurrent_execution", "Allow concurrent runs in a cluster.")
		.list("names", pattern_block("User or admin name pattern."))
		.list("group_names", pattern_block("Group name pattern."))
		.list("role_names", pattern_block("Role name pattern."))
		.list("fs_paths", pattern_block("Virtual path pattern."))
		.build();

	let conditions = BlockBuilder::new("When the rule fires.")
		.optional_strings("fs_events", "Filesystem events, e.g. `upload`, `download`.")
		.optional_strings("provider_events", "Provider events: `add`, `update`, `delete`.")
		.optional_int("idp_login_event", "0 any, 1 user, 2 admin.")
		.list(
			"schedules",
			BlockBuilder::new("Cron-like schedule, evaluated in UTC.")
				.required_string("hour", "Hour field.")
				.required_string("day_of_week", "Day of week field.")
				.required_string("day_of_month", "Day of month field.")
				.required_string("month", "Month field.")
				.build(),
		)
		.single("options", options)
		.build();

	BlockBuilder::new("A rule binding a trigger to a list of event actions.")
		.computed_string("id", "Same as `name`.")
		.computed_int("numeric_id", "Numeric id assigned by SFTPGo.")
		.required_string("name", "Unique rule name.")
		.required_int("status", "1 enabled, 0 disabled.")
		.optional_string("description", "Free form description.")
		.computed_int("created_at", "Creation time, Unix milliseconds.")
		.computed_int("updated_at", "Last update time, Unix milliseconds.")
		.required_int(
			"trigger",
			"1 filesystem event, 2 provider event, 3 schedule, 4 IP blocked, \
			 5 certificate renewal, 6 on demand, 7 identity provider login",
		)
		.single("conditions", conditions)
		.list(
			"actions",
			BlockBuilder::new("Action to execute, by name.")
				.required_string("name", "Event action name.")
				.optional_int("order", "Execution order, lower first.")
				.single(
					"options",
					BlockBuilder::new("Execution options.")
						.optional_bool("is_failure_action", "Run only when a previous action failed.")
						.optional_bool("stop_on_failure", "Stop the chain if this action fails.")
						.optional_bool("execute_sync", "Run synchronously, upload events only.")
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
	fn round_trips_a_scheduled_rule() {
		let api = EventRule {
			id: 9,
			name: "nightly".to_string(),
			status: 1,
			trigger: 3,
			created_at: 1,
			updated_at: 2,
			conditions: EventConditions {
				schedules: vec![Schedule {
					hour: "2".to_string(),
					day_of_week: "*".to_string(),
					day_of_month: "*".to_string(),
					month: "*".to_string(),
				}],
				options: ConditionOptions {
					names: vec![ConditionPattern {
						pattern: "svc-*".to_string(),
						inverse_match: true,
					}],
					event_statuses: vec![1, 2],
					..Default::default()
				},
				..Default::default()
			},
			actions: vec![RuleAction {
				name: "backup".to_string(),
				order: 1,
				options: RuleActionOptions {
					stop_on_failure: true,
					..Default::default()
				},
			}],
			..Default::default()
		};
		let model = EventRuleModel::from_api(&api);
		assert_eq!(model.trigger, Value::Value(3));
		assert_eq!(model.to_api(&AttrPath::root()).unwrap(), api);
	}

	#[test]
	fn empty_conditions_read_back_as_null() {
		let model = EventRuleModel::from_api(&EventRule {
			name: "on-demand".to_string(),
			trigger: 6,
			..Default::default()
		});
		assert_eq!(model.conditions, Value::Null);
		assert_eq!(model.actions, Value::Value(Vec::new()));
		assert_eq!(model.status, Value::Value(0));
	}

	#[test]
	fn errors_accumulate_across_actions() {
		let mut model = EventRuleModel::from_api(&EventRule {
			name: "r".to_string(),
			trigger: 6,
			actions: vec![RuleAction::default(), RuleAction::default(), RuleAction::default()],
			..Default::default()
		});
		if let Value::Value(actions) = &mut model.actions {
			actions[0].name = Value::Unknown;
			actions[2].order = Value::Unknown;
		}
		let errors = model.to_api(&AttrPath::root()).unwrap_err();
		assert_eq!(
			errors.to_string(),
			"actions[0].name: value is not known yet; actions[2].order: value is not known yet"
		);
	}
}
