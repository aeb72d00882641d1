// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Helpers between `tf_provider::Value` attributes and plain API fields.

use std::collections::BTreeMap;

use tf_provider::Value;

use super::{collect_all, ApiModel, AttrPath, ConvertError, ConvertErrorKind, Result};

pub type StringValue = Value<String>;
pub type IntValue = Value<i64>;
pub type BoolValue = Value<bool>;
pub type StringList = Value<Vec<Value<String>>>;
pub type IntList = Value<Vec<Value<i64>>>;
pub type StringMap = Value<BTreeMap<String, Value<String>>>;

fn scalar<T: Clone + Default>(value: &Value<T>, path: &AttrPath) -> Result<T> {
	match value {
		Value::Value(v) => Ok(v.clone()),
		Value::Null => Ok(T::default()),
		Value::Unknown => Err(ConvertError::unknown(path).into()),
	}
}

/// A collection element, which must not be null.
pub(crate) fn element<T: Clone>(value: &Value<T>, path: &AttrPath) -> Result<T> {
	match value {
		Value::Value(v) => Ok(v.clone()),
		Value::Null => Err(ConvertError::new(path, ConvertErrorKind::Null).into()),
		Value::Unknown => Err(ConvertError::unknown(path).into()),
	}
}

pub fn string(value: &StringValue, path: &AttrPath) -> Result<String> {
	scalar(value, path)
}

pub fn int(value: &IntValue, path: &AttrPath) -> Result<i64> {
	scalar(value, path)
}

pub fn flag(value: &BoolValue, path: &AttrPath) -> Result<bool> {
	scalar(value, path)
}

/// A server-managed attribute. It is unknown while planning a create, which
/// is not an error because SFTPGo ignores whatever is sent for it.
pub fn computed<T: Clone + Default>(value: &Value<T>) -> T {
	match value {
		Value::Value(v) => v.clone(),
		_ => T::default(),
	}
}

fn scalars<T: Clone>(value: &Value<Vec<Value<T>>>, path: &AttrPath) -> Result<Vec<T>> {
	match value {
		Value::Value(items) => collect_all(
			items
				.iter()
				.enumerate()
				.map(|(i, item)| element(item, &path.index(i))),
		),
		Value::Null => Ok(Vec::new()),
		Value::Unknown => Err(ConvertError::unknown(path).into()),
	}
}

pub fn strings(value: &StringList, path: &AttrPath) -> Result<Vec<String>> {
	scalars(value, path)
}

pub fn ints(value: &IntList, path: &AttrPath) -> Result<Vec<i64>> {
	scalars(value, path)
}

/// A list of nested blocks.
pub fn list<M: ApiModel>(value: &Value<Vec<M>>, path: &AttrPath) -> Result<Vec<M::Api>> {
	match value {
		Value::Value(items) => collect_all(
			items
				.iter()
				.enumerate()
				.map(|(i, item)| item.to_api(&path.index(i))),
		),
		Value::Null => Ok(Vec::new()),
		Value::Unknown => Err(ConvertError::unknown(path).into()),
	}
}

/// A single nested block; absent means the API default.
pub fn object<M>(value: &Value<M>, path: &AttrPath) -> Result<M::Api>
where
	M: ApiModel,
	M::Api: Default,
{
	Ok(optional_object(value, path)?.unwrap_or_default())
}

pub fn optional_object<M: ApiModel>(value: &Value<M>, path: &AttrPath) -> Result<Option<M::Api>> {
	match value {
		Value::Value(model) => model.to_api(path).map(Some),
		Value::Null => Ok(None),
		Value::Unknown => Err(ConvertError::unknown(path).into()),
	}
}

/// Null for the zero value of `T`.
pub fn non_zero<T: Default + PartialEq + Clone>(value: &T) -> Value<T> {
	if *value == T::default() {
		Value::Null
	} else {
		Value::Value(value.clone())
	}
}

/// Always materialized, even at zero.
pub fn known<T: Clone>(value: &T) -> Value<T> {
	Value::Value(value.clone())
}

/// Null for an empty list.
pub fn non_empty<T: Clone>(values: &[T]) -> Value<Vec<Value<T>>> {
	if values.is_empty() {
		Value::Null
	} else {
		Value::Value(values.iter().cloned().map(Value::Value).collect())
	}
}

/// Nested block lists are never null on the Terraform side.
pub fn blocks<M: ApiModel>(values: &[M::Api]) -> Value<Vec<M>> {
	Value::Value(values.iter().map(M::from_api).collect())
}

/// Null for an object whose fields are all zero.
pub fn non_zero_object<M>(api: &M::Api) -> Value<M>
where
	M: ApiModel,
	M::Api: Default + PartialEq,
{
	if *api == M::Api::default() {
		Value::Null
	} else {
		Value::Value(M::from_api(api))
	}
}

pub fn known_str(value: &StringValue) -> Option<&str> {
	match value {
		Value::Value(s) => Some(s.as_str()),
		_ => None,
	}
}

pub fn known_int(value: &IntValue) -> Option<i64> {
	match value {
		Value::Value(v) => Some(*v),
		_ => None,
	}
}

/// Runs `f` on the contents of two nested blocks when both are present.
pub fn with_nested<M>(target: &mut Value<M>, source: &Value<M>, f: impl FnOnce(&mut M, &M)) {
	if let (Value::Value(target), Value::Value(source)) = (target, source) {
		f(target, source);
	}
}

/// Runs `f` pairwise over two lists of nested blocks.
pub fn with_nested_list<M>(
	target: &mut Value<Vec<M>>,
	source: &Value<Vec<M>>,
	mut f: impl FnMut(&mut M, &M),
) {
	if let (Value::Value(target), Value::Value(source)) = (target, source) {
		for (t, s) in target.iter_mut().zip(source) {
			f(t, s);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn null_scalars_map_to_zero() {
		let path = AttrPath::root().attr("quota_size");
		assert_eq!(int(&Value::Null, &path).unwrap(), 0);
		assert_eq!(string(&Value::Null, &path).unwrap(), "");
		assert!(!flag(&Value::Null, &path).unwrap());
		assert_eq!(int(&Value::Value(5), &path).unwrap(), 5);
	}

	#[test]
	fn computed_attributes_tolerate_unknown() {
		assert_eq!(computed::<i64>(&Value::Unknown), 0);
		assert_eq!(computed(&Value::Value(1700000000000i64)), 1700000000000);
	}

	#[test]
	fn unknown_scalar_is_an_error() {
		let path = AttrPath::root().attr("home_dir");
		let err = string(&Value::Unknown, &path).unwrap_err();
		assert_eq!(err.to_string(), "home_dir: value is not known yet");
	}

	#[test]
	fn list_errors_name_every_bad_element() {
		let list: StringList = Value::Value(vec![
			Value::Value("a".to_string()),
			Value::Unknown,
			Value::Null,
		]);
		let err = strings(&list, &AttrPath::root().attr("public_keys")).unwrap_err();
		assert_eq!(
			err.to_string(),
			"public_keys[1]: value is not known yet; public_keys[2]: null is not allowed here"
		);
	}

	#[test]
	fn zero_values_read_back_as_null() {
		assert_eq!(non_zero(&0i64), Value::Null);
		assert_eq!(non_zero(&String::new()), Value::Null);
		assert_eq!(non_zero(&false), Value::Null);
		assert_eq!(non_zero(&3i64), Value::Value(3));
		assert_eq!(non_empty::<String>(&[]), Value::Null);
		assert_eq!(known(&0i64), Value::Value(0));
	}
}
