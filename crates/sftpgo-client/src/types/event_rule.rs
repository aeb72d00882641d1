// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

use super::is_zero;

/// An event rule: a trigger, the conditions to match and the actions to run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventRule {
	#[serde(skip_serializing_if = "is_zero")]
	pub id: i64,
	pub name: String,
	pub status: i64,
	pub description: String,
	pub created_at: i64,
	pub updated_at: i64,
	/// 1 filesystem event, 2 provider event, 3 schedule, 4 IP blocked,
	/// 5 certificate renewal, 6 on demand, 7 identity provider login
	pub trigger: i64,
	pub conditions: EventConditions,
	pub actions: Vec<RuleAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConditions {
	pub fs_events: Vec<String>,
	pub provider_events: Vec<String>,
	pub schedules: Vec<Schedule>,
	pub idp_login_event: i64,
	pub options: ConditionOptions,
}

/// Cron-like schedule, every field uses crontab syntax.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schedule {
	pub hour: String,
	pub day_of_week: String,
	pub day_of_month: String,
	pub month: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionOptions {
	pub names: Vec<ConditionPattern>,
	pub group_names: Vec<ConditionPattern>,
	pub role_names: Vec<ConditionPattern>,
	pub fs_paths: Vec<ConditionPattern>,
	pub protocols: Vec<String>,
	pub event_statuses: Vec<i64>,
	pub provider_objects: Vec<String>,
	pub min_file_size: i64,
	pub max_file_size: i64,
	pub concurrent_execution: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionPattern {
	pub pattern: String,
	pub inverse_match: bool,
}

/// Reference to an event action by name, with its position in the rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleAction {
	pub name: String,
	pub order: i64,
	pub options: RuleActionOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleActionOptions {
	pub is_failure_action: bool,
	pub stop_on_failure: bool,
	pub execute_sync: bool,
}
