// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("failed to read {key} from {path}: {source}")]
	FileRead {
		key: String,
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid value for {key}: {message}")]
	InvalidValue { key: String, message: String },

	#[error("invalid provider configuration: {}", join(.0))]
	Validation(Vec<ValidationIssue>),
}

/// One problem with one provider attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
	/// Provider block attribute, e.g. `host` or `headers`.
	pub attribute: &'static str,
	pub message: String,
}

impl ValidationIssue {
	pub fn new(attribute: &'static str, message: impl Into<String>) -> Self {
		Self {
			attribute,
			message: message.into(),
		}
	}
}

impl fmt::Display for ValidationIssue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.attribute, self.message)
	}
}

fn join(issues: &[ValidationIssue]) -> String {
	issues
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join("; ")
}

pub type Result<T> = std::result::Result<T, ConfigError>;
