// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Conversion between Terraform attribute trees and SFTPGo API objects.
//!
//! `to_api` maps null attributes to the zero value of the API field and fails
//! on values that are still unknown or discriminants outside their range.
//! `from_api` cannot fail: zero API values become null attributes, except for
//! fields that always materialize (ids, status, timestamps, discriminants,
//! nested block lists).

mod path;
pub mod permissions;
pub mod secret;
pub mod value;

use std::fmt;

pub use path::{AttrPath, Step};

/// A Terraform attribute model with an SFTPGo API counterpart.
pub trait ApiModel: Sized {
	type Api;

	fn to_api(&self, path: &AttrPath) -> Result<Self::Api>;

	fn from_api(api: &Self::Api) -> Self;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertErrorKind {
	#[error("value is not known yet")]
	Unknown,

	#[error("null is not allowed here")]
	Null,

	#[error("invalid {field} {value}, expected {min} to {max}")]
	InvalidDiscriminant {
		field: &'static str,
		value: i64,
		min: i64,
		max: i64,
	},

	#[error("{0}")]
	Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{path}: {kind}")]
pub struct ConvertError {
	pub path: AttrPath,
	pub kind: ConvertErrorKind,
}

impl ConvertError {
	pub fn new(path: &AttrPath, kind: ConvertErrorKind) -> Self {
		Self {
			path: path.clone(),
			kind,
		}
	}

	pub fn unknown(path: &AttrPath) -> Self {
		Self::new(path, ConvertErrorKind::Unknown)
	}
}

/// Every error found while converting one value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertErrors(Vec<ConvertError>);

impl ConvertErrors {
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn push(&mut self, error: ConvertError) {
		self.0.push(error);
	}

	pub fn extend(&mut self, other: ConvertErrors) {
		self.0.extend(other.0);
	}

	pub fn iter(&self) -> std::slice::Iter<'_, ConvertError> {
		self.0.iter()
	}

	/// `Ok(value)` when no error was recorded.
	pub fn into_result<T>(self, value: T) -> Result<T> {
		if self.0.is_empty() {
			Ok(value)
		} else {
			Err(self)
		}
	}
}

impl fmt::Display for ConvertErrors {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, error) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str("; ")?;
			}
			write!(f, "{error}")?;
		}
		Ok(())
	}
}

impl std::error::Error for ConvertErrors {}

impl From<ConvertError> for ConvertErrors {
	fn from(error: ConvertError) -> Self {
		Self(vec![error])
	}
}

impl IntoIterator for ConvertErrors {
	type Item = ConvertError;
	type IntoIter = std::vec::IntoIter<ConvertError>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

pub type Result<T> = std::result::Result<T, ConvertErrors>;

/// Collects the successes of `results`, or every error if any failed.
///
/// Elements of a collection are independent, so one bad element does not hide
/// problems in the others.
pub fn collect_all<T>(results: impl IntoIterator<Item = Result<T>>) -> Result<Vec<T>> {
	let mut values = Vec::new();
	let mut errors = ConvertErrors::default();
	for result in results {
		match result {
			Ok(value) => values.push(value),
			Err(e) => errors.extend(e),
		}
	}
	errors.into_result(values)
}

pub(crate) fn discriminant_error(
	path: &AttrPath,
	field: &'static str,
	value: i64,
	min: i64,
	max: i64,
) -> ConvertErrors {
	ConvertError::new(
		path,
		ConvertErrorKind::InvalidDiscriminant {
			field,
			value,
			min,
			max,
		},
	)
	.into()
}

pub(crate) fn check_discriminant(
	value: i64,
	path: &AttrPath,
	field: &'static str,
	min: i64,
	max: i64,
) -> std::result::Result<i64, ConvertError> {
	if (min..=max).contains(&value) {
		Ok(value)
	} else {
		Err(ConvertError::new(
			path,
			ConvertErrorKind::InvalidDiscriminant {
				field,
				value,
				min,
				max,
			},
		))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn collect_all_keeps_every_error() {
		let root = AttrPath::root().attr("items");
		let results = vec![
			Ok(1),
			Err(ConvertError::unknown(&root.index(1)).into()),
			Ok(3),
			Err(ConvertError::new(&root.index(3), ConvertErrorKind::Null).into()),
		];
		let errors = collect_all(results).unwrap_err();
		assert_eq!(errors.len(), 2);
		assert_eq!(
			errors.to_string(),
			"items[1]: value is not known yet; items[3]: null is not allowed here"
		);
	}

	#[test]
	fn collect_all_succeeds_without_errors() {
		let values = collect_all(vec![Ok::<_, ConvertErrors>(1), Ok(2)]).unwrap();
		assert_eq!(values, vec![1, 2]);
	}
}
