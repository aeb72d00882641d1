// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The `filters` block of users and group user settings.

use serde::{Deserialize, Serialize};
use sftpgo_client::types::{BandwidthLimit, HooksFilter, PatternsFilter, TimePeriod, UserFilters};
use tf_provider::{Block, Value};

use crate::convert::value::{
	blocks, flag, int, list, non_empty, non_zero, non_zero_object, object, string, strings,
	BoolValue, IntValue, StringList, StringValue,
};
use crate::convert::{ApiModel, AttrPath, Result};
use crate::schema::BlockBuilder;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFiltersModel {
	pub allowed_ip: StringList,
	pub denied_ip: StringList,
	pub denied_login_methods: StringList,
	pub denied_protocols: StringList,
	pub file_patterns: Value<Vec<PatternsFilterModel>>,
	pub max_upload_file_size: IntValue,
	pub tls_username: StringValue,
	pub tls_certs: StringList,
	pub hooks: Value<HooksFilterModel>,
	pub disable_fs_checks: BoolValue,
	pub web_client: StringList,
	pub allow_api_key_auth: BoolValue,
	pub user_type: StringValue,
	pub bandwidth_limits: Value<Vec<BandwidthLimitModel>>,
	pub external_auth_cache_time: IntValue,
	pub start_directory: StringValue,
	pub two_factor_protocols: StringList,
	pub ftp_security: IntValue,
	pub is_anonymous: BoolValue,
	pub default_shares_expiration: IntValue,
	pub max_shares_expiration: IntValue,
	pub password_expiration: IntValue,
	pub password_strength: IntValue,
	pub require_password_change: BoolValue,
	pub access_time: Value<Vec<TimePeriodModel>>,
}

impl ApiModel for UserFiltersModel {
	type Api = UserFilters;

	fn to_api(&self, path: &AttrPath) -> Result<UserFilters> {
		Ok(UserFilters {
			allowed_ip: strings(&self.allowed_ip, &path.attr("allowed_ip"))?,
			denied_ip: strings(&self.denied_ip, &path.attr("denied_ip"))?,
			denied_login_methods: strings(
				&self.denied_login_methods,
				&path.attr("denied_login_methods"),
			)?,
			denied_protocols: strings(&self.denied_protocols, &path.attr("denied_protocols"))?,
			file_patterns: list(&self.file_patterns, &path.attr("file_patterns"))?,
			max_upload_file_size: int(&self.max_upload_file_size, &path.attr("max_upload_file_size"))?,
			tls_username: string(&self.tls_username, &path.attr("tls_username"))?,
			tls_certs: strings(&self.tls_certs, &path.attr("tls_certs"))?,
			hooks: object(&self.hooks, &path.attr("hooks"))?,
			disable_fs_checks: flag(&self.disable_fs_checks, &path.attr("disable_fs_checks"))?,
			web_client: strings(&self.web_client, &path.attr("web_client"))?,
			allow_api_key_auth: flag(&self.allow_api_key_auth, &path.attr("allow_api_key_auth"))?,
			user_type: string(&self.user_type, &path.attr("user_type"))?,
			bandwidth_limits: list(&self.bandwidth_limits, &path.attr("bandwidth_limits"))?,
			external_auth_cache_time: int(
				&self.external_auth_cache_time,
				&path.attr("external_auth_cache_time"),
			)?,
			start_directory: string(&self.start_directory, &path.attr("start_directory"))?,
			two_factor_protocols: strings(
				&self.two_factor_protocols,
				&path.attr("two_factor_protocols"),
			)?,
			ftp_security: int(&self.ftp_security, &path.attr("ftp_security"))?,
			is_anonymous: flag(&self.is_anonymous, &path.attr("is_anonymous"))?,
			default_shares_expiration: int(
				&self.default_shares_expiration,
				&path.attr("default_shares_expiration"),
			)?,
			max_shares_expiration: int(&self.max_shares_expiration, &path.attr("max_shares_expiration"))?,
			password_expiration: int(&self.password_expiration, &path.attr("password_expiration"))?,
			password_strength: int(&self.password_strength, &path.attr("password_strength"))?,
			require_password_change: flag(
				&self.require_password_change,
				&path.attr("require_password_change"),
			)?,
			access_time: list(&self.access_time, &path.attr("access_time"))?,
		})
	}

	fn from_api(api: &UserFilters) -> Self {
		Self {
			allowed_ip: non_empty(&api.allowed_ip),
			denied_ip: non_empty(&api.denied_ip),
			denied_login_methods: non_empty(&api.denied_login_methods),
			denied_protocols: non_empty(&api.denied_protocols),
			file_patterns: blocks(&api.file_patterns),
			max_upload_file_size: non_zero(&api.max_upload_file_size),
			tls_username: non_zero(&api.tls_username),
			tls_certs: non_empty(&api.tls_certs),
			hooks: non_zero_object(&api.hooks),
			disable_fs_checks: non_zero(&api.disable_fs_checks),
			web_client: non_empty(&api.web_client),
			allow_api_key_auth: non_zero(&api.allow_api_key_auth),
			user_type: non_zero(&api.user_type),
			bandwidth_limits: blocks(&api.bandwidth_limits),
			external_auth_cache_time: non_zero(&api.external_auth_cache_time),
			start_directory: non_zero(&api.start_directory),
			two_factor_protocols: non_empty(&api.two_factor_protocols),
			ftp_security: non_zero(&api.ftp_security),
			is_anonymous: non_zero(&api.is_anonymous),
			default_shares_expiration: non_zero(&api.default_shares_expiration),
			max_shares_expiration: non_zero(&api.max_shares_expiration),
			password_expiration: non_zero(&api.password_expiration),
			password_strength: non_zero(&api.password_strength),
			require_password_change: non_zero(&api.require_password_change),
			access_time: blocks(&api.access_time),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternsFilterModel {
	pub path: StringValue,
	pub allowed_patterns: StringList,
	pub denied_patterns: StringList,
	pub deny_policy: IntValue,
}

impl ApiModel for PatternsFilterModel {
	type Api = PatternsFilter;

	fn to_api(&self, path: &AttrPath) -> Result<PatternsFilter> {
		Ok(PatternsFilter {
			path: string(&self.path, &path.attr("path"))?,
			allowed_patterns: strings(&self.allowed_patterns, &path.attr("allowed_patterns"))?,
			denied_patterns: strings(&self.denied_patterns, &path.attr("denied_patterns"))?,
			deny_policy: int(&self.deny_policy, &path.attr("deny_policy"))?,
		})
	}

	fn from_api(api: &PatternsFilter) -> Self {
		Self {
			path: non_zero(&api.path),
			allowed_patterns: non_empty(&api.allowed_patterns),
			denied_patterns: non_empty(&api.denied_patterns),
			deny_policy: non_zero(&api.deny_policy),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HooksFilterModel {
	pub external_auth_disabled: BoolValue,
	pub pre_login_disabled: BoolValue,
	pub check_password_disabled: BoolValue,
}

impl ApiModel for HooksFilterModel {
	type Api = HooksFilter;

	fn to_api(&self, path: &AttrPath) -> Result<HooksFilter> {
		Ok(HooksFilter {
			external_auth_disabled: flag(
				&self.external_auth_disabled,
				&path.attr("external_auth_disabled"),
			)?,
			pre_login_disabled: flag(&self.pre_login_disabled, &path.attr("pre_login_disabled"))?,
			check_password_disabled: flag(
				&self.check_password_disabled,
				&path.attr("check_password_disabled"),
			)?,
		})
	}

	fn from_api(api: &HooksFilter) -> Self {
		Self {
			external_auth_disabled: non_zero(&api.external_auth_disabled),
			pre_login_disabled: non_zero(&api.pre_login_disabled),
			check_password_disabled: non_zero(&api.check_password_disabled),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandwidthLimitModel {
	pub sources: StringList,
	pub upload_bandwidth: IntValue,
	pub download_bandwidth: IntValue,
}

impl ApiModel for BandwidthLimitModel {
	type Api = BandwidthLimit;

	fn to_api(&self, path: &AttrPath) -> Result<BandwidthLimit> {
		Ok(BandwidthLimit {
			sources: strings(&self.sources, &path.attr("sources"))?,
			upload_bandwidth: int(&self.upload_bandwidth, &path.attr("upload_bandwidth"))?,
			download_bandwidth: int(&self.download_bandwidth, &path.attr("download_bandwidth"))?,
		})
	}

	fn from_api(api: &BandwidthLimit) -> Self {
		Self {
			sources: non_empty(&api.sources),
			upload_bandwidth: non_zero(&api.upload_bandwidth),
			download_bandwidth: non_zero(&api.download_bandwidth),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePeriodModel {
	pub day_of_week: IntValue,
	pub from: StringValue,
	pub to: StringValue,
}

impl ApiModel for TimePeriodModel {
	type Api = TimePeriod;

	fn to_api(&self, path: &AttrPath) -> Result<TimePeriod> {
		Ok(TimePeriod {
			day_of_week: int(&self.day_of_week, &path.attr("day_of_week"))?,
			from: string(&self.from, &path.attr("from"))?,
			to: string(&self.to, &path.attr("to"))?,
		})
	}

	fn from_api(api: &TimePeriod) -> Self {
		Self {
			day_of_week: non_zero(&api.day_of_week),
			from: non_zero(&api.from),
			to: non_zero(&api.to),
		}
	}
}

pub fn block() -> Block {
	BlockBuilder::new("Login and transfer restrictions.")
		.optional_strings("allowed_ip", "Networks allowed to log in, in CIDR notation.")
		.optional_strings("denied_ip", "Networks denied, in CIDR notation.")
		.optional_strings("denied_login_methods", "Login methods the user cannot use.")
		.optional_strings("denied_protocols", "Protocols the user cannot use.")
		.optional_int("max_upload_file_size", "Maximum upload size in bytes, 0 means unlimited.")
		.optional_string("tls_username", "Certificate field used as the username, e.g. `CommonName`.")
		.optional_strings("tls_certs", "Client certificates accepted for TLS login.")
		.optional_bool("disable_fs_checks", "Skip home directory checks at login.")
		.optional_strings("web_client", "Web client features to disable.")
		.optional_bool("allow_api_key_auth", "Allow impersonation through API keys.")
		.optional_string("user_type", "`LDAPUser`, `OSUser` or empty.")
		.optional_int("external_auth_cache_time", "Seconds to cache external auth results.")
		.optional_string("start_directory", "Initial directory after login.")
		.optional_strings("two_factor_protocols", "Protocols that require two-factor auth.")
		.optional_int("ftp_security", "1 requires TLS for FTP.")
		.optional_bool("is_anonymous", "Anonymous user, read and list only.")
		.optional_int("default_shares_expiration", "Default share expiration in days.")
		.optional_int("max_shares_expiration", "Maximum share expiration in days.")
		.optional_int("password_expiration", "Password lifetime in days.")
		.optional_int("password_strength", "Minimum password entropy.")
		.optional_bool("require_password_change", "Force a password change at next login.")
		.list(
			"file_patterns",
			BlockBuilder::new("Shell-like patterns allowed or denied per path.")
				.required_string("path", "Virtual path the patterns apply to.")
				.optional_strings("allowed_patterns", "Allowed patterns, e.g. `*.jpg`.")
				.optional_strings("denied_patterns", "Denied patterns.")
				.optional_int("deny_policy", "0 default, 1 hide denied files.")
				.build(),
		)
		.single(
			"hooks",
			BlockBuilder::new("Per-user hook overrides.")
				.optional_bool("external_auth_disabled", "Skip the external auth hook.")
				.optional_bool("pre_login_disabled", "Skip the pre-login hook.")
				.optional_bool("check_password_disabled", "Skip the check password hook.")
				.build(),
		)
		.list(
			"bandwidth_limits",
			BlockBuilder::new("Bandwidth limits per source network.")
				.optional_strings("sources", "Source networks in CIDR notation.")
				.optional_int("upload_bandwidth", "Upload limit in KB/s.")
				.optional_int("download_bandwidth", "Download limit in KB/s.")
				.build(),
		)
		.list(
			"access_time",
			BlockBuilder::new("Time windows in which login is allowed.")
				.optional_int("day_of_week", "0 Sunday to 6 Saturday.")
				.optional_string("from", "Start time, `HH:MM`.")
				.optional_string("to", "End time, `HH:MM`.")
				.build(),
		)
		.build()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::convert::ConvertErrorKind;

	#[test]
	fn nested_lists_stay_materialized_when_empty() {
		let model = UserFiltersModel::from_api(&UserFilters {
			max_upload_file_size: 1024,
			..Default::default()
		});
		assert_eq!(model.file_patterns, Value::Value(Vec::new()));
		assert_eq!(model.bandwidth_limits, Value::Value(Vec::new()));
		assert_eq!(model.allowed_ip, Value::Null);
		assert_eq!(model.hooks, Value::Null);
	}

	#[test]
	fn round_trips_nested_filters() {
		let api = UserFilters {
			denied_protocols: vec!["FTP".to_string()],
			file_patterns: vec![PatternsFilter {
				path: "/uploads".to_string(),
				denied_patterns: vec!["*.exe".to_string()],
				deny_policy: 1,
				..Default::default()
			}],
			hooks: HooksFilter {
				pre_login_disabled: true,
				..Default::default()
			},
			access_time: vec![TimePeriod {
				day_of_week: 1,
				from: "08:00".to_string(),
				to: "18:00".to_string(),
			}],
			..Default::default()
		};
		let model = UserFiltersModel::from_api(&api);
		assert_eq!(model.to_api(&AttrPath::root()).unwrap(), api);
	}

	#[test]
	fn accumulates_errors_across_list_elements() {
		let mut model = UserFiltersModel::from_api(&UserFilters {
			file_patterns: vec![PatternsFilter::default(), PatternsFilter::default()],
			..Default::default()
		});
		if let Value::Value(patterns) = &mut model.file_patterns {
			patterns[0].path = Value::Unknown;
			patterns[1].deny_policy = Value::Unknown;
		}

		let errors = model.to_api(&AttrPath::root().attr("filters")).unwrap_err();
		let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
		assert_eq!(
			paths,
			["filters.file_patterns[0].path", "filters.file_patterns[1].deny_policy"]
		);
		assert!(errors.iter().all(|e| e.kind == ConvertErrorKind::Unknown));
	}
}
