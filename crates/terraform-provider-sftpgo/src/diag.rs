// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Turns provider-side errors into Terraform diagnostics.

use sftpgo_client::ClientError;
use sftpgo_provider_config::ConfigError;
use tf_provider::attribute_path::AttributePath;
use tf_provider::Diagnostics;

use crate::convert::{AttrPath, ConvertError, Step};

/// Converts a path into the host representation. The root has none.
pub fn attribute_path(path: &AttrPath) -> Option<AttributePath> {
	let (first, rest) = path.steps().split_first()?;
	let Step::Attr(name) = first else {
		return None;
	};
	let mut out = AttributePath::new(*name);
	for step in rest {
		out = match step {
			Step::Attr(name) => out.attribute(*name),
			Step::Index(index) => out.index(*index as i64),
			Step::Key(key) => out.key(key.clone()),
		};
	}
	Some(out)
}

/// One diagnostic per error, attached to the attribute it concerns.
pub fn convert_errors(
	diags: &mut Diagnostics,
	summary: &str,
	errors: impl IntoIterator<Item = ConvertError>,
) {
	for error in errors {
		match attribute_path(&error.path) {
			Some(attribute) => diags.error(summary.to_string(), error.kind.to_string(), attribute),
			None => diags.root_error(summary.to_string(), error.to_string()),
		}
	}
}

pub fn client_error(diags: &mut Diagnostics, action: &str, error: &ClientError) {
	diags.root_error(format!("Unable to {action}"), error.to_string());
}

pub fn config_error(diags: &mut Diagnostics, error: ConfigError) {
	const SUMMARY: &str = "Invalid provider configuration";
	match error {
		ConfigError::Validation(issues) => {
			for issue in issues {
				diags.error(SUMMARY, issue.message, AttributePath::new(issue.attribute));
			}
		}
		other => diags.root_error(SUMMARY, other.to_string()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn root_path_has_no_attribute() {
		assert!(attribute_path(&AttrPath::root()).is_none());
		assert!(attribute_path(&AttrPath::root().attr("filters").index(0)).is_some());
	}

	#[test]
	fn nested_path_maps_every_step() {
		let path = AttrPath::root()
			.attr("virtual_folders")
			.index(1)
			.attr("name");
		let expected = AttributePath::new("virtual_folders").index(1).attribute("name");
		assert_eq!(
			format!("{:?}", attribute_path(&path)),
			format!("{:?}", Some(expected))
		);

		let path = AttrPath::root().attr("permissions").key("/in");
		let expected = AttributePath::new("permissions").key("/in");
		assert_eq!(
			format!("{:?}", attribute_path(&path)),
			format!("{:?}", Some(expected))
		);
	}

	#[test]
	fn conversion_errors_take_a_formatted_summary() {
		let mut diags = Diagnostics::default();
		let summary = format!("Invalid {} attributes", "user");
		convert_errors(
			&mut diags,
			&summary,
			[
				ConvertError::unknown(&AttrPath::root().attr("username")),
				ConvertError::unknown(&AttrPath::root()),
			],
		);
		assert_eq!(diags.errors.len(), 2);
	}
}
