// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Terraform attribute models for every SFTPGo object.
//!
//! Each model mirrors one API struct field for field, with every leaf wrapped
//! in [`tf_provider::Value`] so it can be null or not yet known. Conversion in
//! both directions goes through [`ApiModel`]; the resource lifecycle hooks
//! live on [`ResourceModel`].

pub mod admin;
pub mod event_action;
pub mod event_rule;
pub mod filesystem;
pub mod filters;
pub mod folder;
pub mod group;
pub mod ip_list;
pub mod role;
pub mod user;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tf_provider::Value;

use crate::convert::value::StringValue;
use crate::convert::{ApiModel, AttrPath, ConvertError};

/// A model that is the full state of a managed resource.
pub trait ResourceModel:
	ApiModel + Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
	/// The Terraform `id` attribute.
	fn id(&self) -> &StringValue;

	/// Marks server-assigned attributes as unknown for a create plan.
	fn computed_unknown(&mut self);

	/// Copies server-assigned attributes from `server`.
	fn merge_computed(&mut self, server: &Self);

	/// Copies write-only secrets from `desired`.
	fn merge_secrets(&mut self, _desired: &Self) {}

	/// Marks the modification timestamp as unknown for an update plan.
	fn mark_updated(&mut self) {}

	/// Attributes that differ from `prior` and cannot be changed in place.
	fn requires_replace(&self, prior: &Self) -> Vec<AttrPath>;

	/// Range checks on known discriminants.
	fn validate(&self) -> Vec<ConvertError> {
		Vec::new()
	}
}

/// Picks the state to store after the server answered.
///
/// When the desired state and the server view convert to the same API value
/// they only differ in how zero values are spelled, and the desired state
/// wins so that explicit zeros in the configuration do not show up as a diff.
/// Otherwise the server view is stored and the drift is visible.
pub fn settle<M>(desired: &M, mut server: M) -> M
where
	M: ResourceModel,
	M::Api: PartialEq,
{
	server.merge_secrets(desired);
	let mut candidate = desired.clone();
	candidate.merge_computed(&server);

	let root = AttrPath::root();
	match (candidate.to_api(&root), server.to_api(&root)) {
		(Ok(wanted), Ok(actual)) if wanted == actual => candidate,
		_ => server,
	}
}

/// Appends `path` to `paths` when the two values differ.
pub(crate) fn replace_if_changed<T: PartialEq>(
	paths: &mut Vec<AttrPath>,
	name: &'static str,
	proposed: &Value<T>,
	prior: &Value<T>,
) {
	if proposed != prior {
		paths.push(AttrPath::root().attr(name));
	}
}
